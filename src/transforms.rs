//! Element-wise transform stages.
//!
//! Each stage wraps exactly one upstream [`DataOp`] and exposes the same pull
//! contract. Nothing runs until the consumer calls `next`:
//!
//! - [`MapOp`] pulls one upstream element per output (strict 1:1).
//! - [`FilterOp`] pulls until an element passes or upstream is exhausted. A
//!   predicate that rejects everything drains the upstream in a single call.
//! - [`FlatMapOp`] buffers the expansion of one upstream element and yields it
//!   piecewise, skipping inputs whose expansion is empty.

use crate::error::Result;
use crate::op::DataOp;
use std::vec;

pub struct MapOp<O, F> {
    upstream: O,
    f: F,
}

impl<O, F> MapOp<O, F> {
    pub(crate) fn new(upstream: O, f: F) -> Self {
        Self { upstream, f }
    }

    /// Unwrap the stage, returning its upstream.
    pub fn into_inner(self) -> O {
        self.upstream
    }
}

impl<O, F, U> DataOp for MapOp<O, F>
where
    O: DataOp,
    F: FnMut(O::Item) -> U,
{
    type Item = U;

    fn open(&mut self) -> Result<()> {
        self.upstream.open()
    }

    fn next(&mut self) -> Result<Option<U>> {
        Ok(self.upstream.next()?.map(&mut self.f))
    }
}

pub struct FilterOp<O, P> {
    upstream: O,
    pred: P,
}

impl<O, P> FilterOp<O, P> {
    pub(crate) fn new(upstream: O, pred: P) -> Self {
        Self { upstream, pred }
    }

    pub fn into_inner(self) -> O {
        self.upstream
    }
}

impl<O, P> DataOp for FilterOp<O, P>
where
    O: DataOp,
    P: FnMut(&O::Item) -> bool,
{
    type Item = O::Item;

    fn open(&mut self) -> Result<()> {
        self.upstream.open()
    }

    fn next(&mut self) -> Result<Option<O::Item>> {
        while let Some(item) = self.upstream.next()? {
            if (self.pred)(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}

/// One-to-many stage.
///
/// `pending` is the unread tail of the most recent expansion; it is replaced
/// only once fully consumed.
pub struct FlatMapOp<O, F, U> {
    upstream: O,
    f: F,
    pending: vec::IntoIter<U>,
}

impl<O, F, U> FlatMapOp<O, F, U> {
    pub(crate) fn new(upstream: O, f: F) -> Self {
        Self {
            upstream,
            f,
            pending: Vec::new().into_iter(),
        }
    }

    /// Number of buffered outputs not yet yielded.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn into_inner(self) -> O {
        self.upstream
    }
}

impl<O, F, U> DataOp for FlatMapOp<O, F, U>
where
    O: DataOp,
    F: FnMut(O::Item) -> Vec<U>,
{
    type Item = U;

    fn open(&mut self) -> Result<()> {
        self.upstream.open()?;
        self.pending = Vec::new().into_iter();
        Ok(())
    }

    fn next(&mut self) -> Result<Option<U>> {
        loop {
            if let Some(out) = self.pending.next() {
                return Ok(Some(out));
            }
            let Some(item) = self.upstream.next()? else {
                return Ok(None);
            };
            self.pending = (self.f)(item).into_iter();
        }
    }
}
