//! The pull-based operator contract.
//!
//! Every stage of a Flare chain implements [`DataOp`]: one `open` call to
//! acquire resources, then repeated `next` calls until `Ok(None)`. Transform
//! stages own their upstream by value, so a chain is a singly linked list that
//! is consumed from its tail and dropped as a unit, releasing the source's
//! file handle.
//!
//! ```
//! use flare::*;
//!
//! let mut words = from_vec(vec!["a b".to_string(), "c".to_string()])
//!     .flat_map(|s: String| s.split(' ').map(String::from).collect())
//!     .map(|w: String| w.to_uppercase());
//!
//! words.open()?;
//! assert_eq!(words.next()?, Some("A".to_string()));
//! assert_eq!(words.next()?, Some("B".to_string()));
//! assert_eq!(words.next()?, Some("C".to_string()));
//! assert_eq!(words.next()?, None);
//! # Ok::<(), flare::FlareError>(())
//! ```

use crate::error::Result;
use crate::transforms::{FilterOp, FlatMapOp, MapOp};

/// A lazily evaluated, single-consumer stage of a pipeline.
pub trait DataOp {
    type Item;

    /// Prepare the stage (and, transitively, its upstream). Call exactly once
    /// before the first [`next`](DataOp::next).
    fn open(&mut self) -> Result<()>;

    /// Pull the next element. `Ok(None)` means exhausted; an exhausted
    /// stage keeps returning `Ok(None)`.
    fn next(&mut self) -> Result<Option<Self::Item>>;

    /// Apply `f` to every element, one upstream pull per output.
    fn map<U, F>(self, f: F) -> MapOp<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U,
    {
        MapOp::new(self, f)
    }

    /// Keep only elements matching `pred`.
    fn filter<P>(self, pred: P) -> FilterOp<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        FilterOp::new(self, pred)
    }

    /// Expand every element into zero or more outputs.
    fn flat_map<U, F>(self, f: F) -> FlatMapOp<Self, F, U>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> Vec<U>,
    {
        FlatMapOp::new(self, f)
    }

    /// Erase the concrete chain type.
    fn boxed<'a>(self) -> BoxedOp<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    /// Borrow an opened chain as a std iterator of results.
    fn iter(&mut self) -> OpIter<'_, Self>
    where
        Self: Sized,
    {
        OpIter {
            op: self,
            done: false,
        }
    }

    /// Open the chain and drain it into a `Vec`.
    ///
    /// # Errors
    /// The first error raised by `open` or by any `next` call.
    fn collect_vec(mut self) -> Result<Vec<Self::Item>>
    where
        Self: Sized,
    {
        self.open()?;
        self.iter().collect()
    }
}

/// Type-erased chain.
pub type BoxedOp<'a, T> = Box<dyn DataOp<Item = T> + 'a>;

impl<O: DataOp + ?Sized> DataOp for Box<O> {
    type Item = O::Item;

    fn open(&mut self) -> Result<()> {
        O::open(self)
    }

    fn next(&mut self) -> Result<Option<Self::Item>> {
        O::next(self)
    }
}

/// Iterator view over an opened [`DataOp`]; fused after exhaustion or the
/// first error.
pub struct OpIter<'a, O> {
    op: &'a mut O,
    done: bool,
}

impl<O: DataOp> Iterator for OpIter<'_, O> {
    type Item = Result<O::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match DataOp::next(&mut *self.op) {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
