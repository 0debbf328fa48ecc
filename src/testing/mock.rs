//! Instrumented upstream for checking how lazily a stage pulls.

use crate::error::Result;
use crate::op::DataOp;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct Counts {
    opens: AtomicUsize,
    pulls: AtomicUsize,
    yielded: AtomicUsize,
}

/// Handle onto the counts of a [`CountingOp`]; stays readable after the op
/// has been moved into a chain.
#[derive(Clone, Debug, Default)]
pub struct PullCounter {
    counts: Arc<Counts>,
}

impl PullCounter {
    /// Calls to `open`.
    #[must_use]
    pub fn opens(&self) -> usize {
        self.counts.opens.load(Ordering::SeqCst)
    }

    /// Calls to `next`, including the one that reported exhaustion.
    #[must_use]
    pub fn pulls(&self) -> usize {
        self.counts.pulls.load(Ordering::SeqCst)
    }

    /// Calls to `next` that produced an element.
    #[must_use]
    pub fn yielded(&self) -> usize {
        self.counts.yielded.load(Ordering::SeqCst)
    }
}

/// Pass-through stage that counts calls into its upstream.
///
/// # Example
///
/// ```
/// use flare::*;
/// use flare::testing::CountingOp;
///
/// # fn main() -> anyhow::Result<()> {
/// let (upstream, counter) = CountingOp::new(from_vec(vec![1, 2, 3]));
/// let mut doubled = upstream.map(|x: i32| x * 2);
/// doubled.open()?;
/// doubled.next()?;
/// assert_eq!(counter.pulls(), 1);
/// # Ok(())
/// # }
/// ```
pub struct CountingOp<O> {
    upstream: O,
    counter: PullCounter,
}

impl<O> CountingOp<O> {
    pub fn new(upstream: O) -> (Self, PullCounter) {
        let counter = PullCounter::default();
        (
            Self {
                upstream,
                counter: counter.clone(),
            },
            counter,
        )
    }
}

impl<O: DataOp> DataOp for CountingOp<O> {
    type Item = O::Item;

    fn open(&mut self) -> Result<()> {
        self.counter.counts.opens.fetch_add(1, Ordering::SeqCst);
        self.upstream.open()
    }

    fn next(&mut self) -> Result<Option<O::Item>> {
        self.counter.counts.pulls.fetch_add(1, Ordering::SeqCst);
        let item = self.upstream.next()?;
        if item.is_some() {
            self.counter.counts.yielded.fetch_add(1, Ordering::SeqCst);
        }
        Ok(item)
    }
}
