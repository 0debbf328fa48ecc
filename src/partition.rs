//! Byte-range partitioning of line-oriented files.
//!
//! A [`PartitionSet`] splits `[0, file_size)` into one contiguous
//! [`PartitionRange`] per worker. Cut points are pushed forward so every range
//! ends one byte past a `\n` (or at the end of the file), which means no line
//! is ever split between two workers.
//!
//! # Layout rules
//! - The nominal block size is `max(MIN_BLOCK_SIZE, file_size / partition_count)`.
//! - Each tentative cut `begin + block` is moved to one past the next `\n` at
//!   or after it; if no `\n` follows, the cut becomes `file_size`.
//! - Each of the `partition_count` workers gets a range. The last worker's
//!   range runs to `file_size`, and workers left over once the data is used up
//!   get empty ranges at `file_size`.
//!
//! ```
//! use flare::partition::PartitionSet;
//! use std::io::Cursor;
//!
//! let text = b"aaaa\nbbbb\ncccc\ndddd\n";
//! let set = PartitionSet::compute(Cursor::new(text), text.len() as u64, 2)?;
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.range(0)?.end, set.range(1)?.start);
//! assert_eq!(set.range(1)?.end, text.len() as u64);
//! # Ok::<(), flare::FlareError>(())
//! ```

use crate::error::{FlareError, Result};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Smallest block size the calculator will propose.
pub const MIN_BLOCK_SIZE: u64 = 10;

/// Half-open byte range `[start, end)` measured from the start of the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PartitionRange {
    pub start: u64,
    pub end: u64,
}

impl PartitionRange {
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "range end {end} before start {start}");
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, offset: u64) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Ordered, immutable set of ranges; index `i` belongs to worker `i`.
///
/// Only the ranges that hold data are stored. Workers past them, up to the
/// requested count, read the empty range at `file_size`, so the footprint is
/// bounded by the file rather than by the partition count.
///
/// Computed once and then only read, so it can be shared between worker
/// chains behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionSet {
    ranges: Vec<PartitionRange>,
    partition_count: usize,
    file_size: u64,
}

impl PartitionSet {
    /// Read the size of `path` and compute `partition_count` ranges over it.
    ///
    /// # Errors
    /// [`FlareError::InvalidPartitionCount`] for a zero count, or
    /// [`FlareError::Io`] if the file cannot be opened, sized or scanned.
    pub fn from_path(path: impl AsRef<Path>, partition_count: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FlareError::io(path, e))?;
        let file_size = file
            .metadata()
            .map_err(|e| FlareError::io(path, e))?
            .len();
        Self::compute(file, file_size, partition_count).map_err(|e| match e {
            FlareError::Read(source) => FlareError::io(path, source),
            other => other,
        })
    }

    /// Compute ranges over any seekable byte source of length `file_size`.
    ///
    /// # Errors
    /// [`FlareError::InvalidPartitionCount`] for a zero count, or
    /// [`FlareError::Read`] when seeking or scanning for a line end fails.
    pub fn compute<R: Read + Seek>(
        reader: R,
        file_size: u64,
        partition_count: usize,
    ) -> Result<Self> {
        if partition_count == 0 {
            return Err(FlareError::InvalidPartitionCount);
        }
        let block = (file_size / partition_count as u64).max(MIN_BLOCK_SIZE);
        let mut rdr = BufReader::new(reader);
        let mut ranges = Vec::new();

        let mut begin = 0u64;
        while begin < file_size && ranges.len() < partition_count {
            let tentative = begin.saturating_add(block);
            let end = if ranges.len() + 1 == partition_count || tentative >= file_size {
                file_size
            } else {
                line_end_after(&mut rdr, tentative, file_size)?
            };
            ranges.push(PartitionRange::new(begin, end));
            begin = end;
        }

        for (i, r) in ranges.iter().enumerate() {
            debug!("partition {i}: [{}, {})", r.start, r.end);
        }
        if ranges.len() < partition_count {
            debug!(
                "partitions {}..{partition_count}: empty at {file_size}",
                ranges.len()
            );
        }
        Ok(Self {
            ranges,
            partition_count,
            file_size,
        })
    }

    /// Range assigned to `worker_id`.
    ///
    /// # Errors
    /// [`FlareError::WorkerOutOfRange`] if `worker_id >= len()`.
    pub fn range(&self, worker_id: usize) -> Result<PartitionRange> {
        if worker_id >= self.partition_count {
            return Err(FlareError::WorkerOutOfRange {
                worker_id,
                parallel_degree: self.partition_count,
            });
        }
        Ok(self.range_or_empty(worker_id))
    }

    fn range_or_empty(&self, worker_id: usize) -> PartitionRange {
        self.ranges
            .get(worker_id)
            .copied()
            .unwrap_or(PartitionRange::new(self.file_size, self.file_size))
    }

    /// The ranges that hold data, in worker order. Every later worker's range
    /// is empty.
    #[must_use]
    pub fn ranges(&self) -> &[PartitionRange] {
        &self.ranges
    }

    /// Number of partitions, including the empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.partition_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partition_count == 0
    }

    #[must_use]
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Every worker's range, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = PartitionRange> + '_ {
        (0..self.partition_count).map(|w| self.range_or_empty(w))
    }
}

/// Offset one past the first `\n` at or after `from`, capped at `file_size`.
fn line_end_after<R: Read + Seek>(rdr: &mut BufReader<R>, from: u64, file_size: u64) -> Result<u64> {
    rdr.seek(SeekFrom::Start(from))?;
    let skipped = rdr.skip_until(b'\n')? as u64;
    Ok(from.saturating_add(skipped).min(file_size))
}
