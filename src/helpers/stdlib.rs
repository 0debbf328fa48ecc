//! In-memory sources built from native Rust collections.
//!
//! These leaves follow the same `open`/`next` protocol as
//! [`TextFileOp`](crate::TextFileOp), which makes them handy for tests, demos,
//! and small self-contained pipelines that don't need a file at all.
//!
//! ### Example
//! ```
//! use flare::*;
//!
//! let squared = from_iter(1..=5).map(|n: i32| n * n).collect_vec()?;
//! assert_eq!(squared, vec![1, 4, 9, 16, 25]);
//! # Ok::<(), flare::FlareError>(())
//! ```

use crate::error::{FlareError, Result};
use crate::op::DataOp;
use std::vec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Lifecycle {
    #[default]
    Unopened,
    Open,
    Exhausted,
}

impl Lifecycle {
    fn begin(&mut self) -> Result<()> {
        if *self != Self::Unopened {
            return Err(FlareError::AlreadyOpened);
        }
        *self = Self::Open;
        Ok(())
    }
}

/// Leaf operator yielding the elements of a `Vec` in order.
pub struct VecOp<T> {
    items: vec::IntoIter<T>,
    state: Lifecycle,
}

impl<T> DataOp for VecOp<T> {
    type Item = T;

    fn open(&mut self) -> Result<()> {
        self.state.begin()
    }

    fn next(&mut self) -> Result<Option<T>> {
        match self.state {
            Lifecycle::Unopened => Err(FlareError::NotOpened),
            Lifecycle::Exhausted => Ok(None),
            Lifecycle::Open => {
                let item = self.items.next();
                if item.is_none() {
                    self.state = Lifecycle::Exhausted;
                }
                Ok(item)
            }
        }
    }
}

/// Create a [`VecOp<T>`] from a pre-existing [`Vec<T>`].
///
/// ### Example
/// ```
/// use flare::*;
///
/// let mut op = from_vec(vec![10, 20]);
/// op.open()?;
/// assert_eq!(op.next()?, Some(10));
/// # Ok::<(), flare::FlareError>(())
/// ```
pub fn from_vec<T>(data: Vec<T>) -> VecOp<T> {
    VecOp {
        items: data.into_iter(),
        state: Lifecycle::Unopened,
    }
}

/// Create a [`VecOp<T>`] from anything implementing [`IntoIterator`].
///
/// The iterator is collected eagerly; only the downstream stages are lazy.
pub fn from_iter<T, I>(iter: I) -> VecOp<T>
where
    I: IntoIterator<Item = T>,
{
    from_vec(iter.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_before_open_is_an_error() {
        let mut op = from_vec(vec![1]);
        assert!(matches!(op.next(), Err(FlareError::NotOpened)));
    }

    #[test]
    fn second_open_is_an_error() {
        let mut op = from_vec(vec![1]);
        op.open().unwrap();
        assert!(matches!(op.open(), Err(FlareError::AlreadyOpened)));
    }

    #[test]
    fn stays_exhausted() {
        let mut op = from_vec(vec![1]);
        op.open().unwrap();
        assert_eq!(op.next().unwrap(), Some(1));
        assert_eq!(op.next().unwrap(), None);
        assert_eq!(op.next().unwrap(), None);
    }
}
