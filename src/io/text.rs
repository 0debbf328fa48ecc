//! Line reader over one partition of a text file.
//!
//! [`TextFileOp`] is the leaf of a file-backed chain. It is bound to a single
//! [`PartitionRange`] chosen by its [`WorkerContext`] and walks the states
//! `Unopened -> Ranging -> Exhausted`:
//!
//! - `open` opens the file and seeks to `range.start`.
//! - `next` yields `\n`-delimited lines (terminator stripped) while the read
//!   offset is still before `range.end`; a line that starts inside the range
//!   is always read to its end.
//! - Once the range is passed, the file handle is released and every later
//!   `next` returns `Ok(None)`.
//!
//! Dropping the operator in any state closes the file.
//!
//! ```no_run
//! use flare::*;
//!
//! let ctx = WorkerContext::new(0, 4)?;
//! let mut lines = TextFileOp::new(ctx, "input.txt")?;
//! lines.open()?;
//! while let Some(line) = lines.next()? {
//!     println!("{line}");
//! }
//! # Ok::<(), flare::FlareError>(())
//! ```

use crate::context::WorkerContext;
use crate::error::{FlareError, Result};
use crate::op::DataOp;
use crate::partition::{PartitionRange, PartitionSet};
use log::trace;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
enum SourceState {
    Unopened,
    Ranging { reader: BufReader<File>, pos: u64 },
    Exhausted,
}

#[derive(Debug)]
pub struct TextFileOp {
    ctx: WorkerContext,
    path: PathBuf,
    partitions: Arc<PartitionSet>,
    range: PartitionRange,
    state: SourceState,
    line: Vec<u8>,
}

impl TextFileOp {
    /// Size `path`, partition it by `ctx.parallel_degree()`, and bind to the
    /// range of `ctx.worker_id()`.
    ///
    /// # Errors
    /// [`FlareError::Io`] if the file cannot be opened or sized.
    pub fn new(ctx: WorkerContext, path: impl AsRef<Path>) -> Result<Self> {
        let partitions = PartitionSet::from_path(&path, ctx.parallel_degree())?;
        Self::with_partitions(ctx, path, Arc::new(partitions))
    }

    /// Bind to a range of a partition set computed elsewhere, typically
    /// shared between the chains of all workers.
    ///
    /// # Errors
    /// [`FlareError::WorkerOutOfRange`] if `partitions` has no range for
    /// `ctx.worker_id()`, or [`FlareError::Config`] if the set was computed
    /// for a different parallel degree.
    pub fn with_partitions(
        ctx: WorkerContext,
        path: impl AsRef<Path>,
        partitions: Arc<PartitionSet>,
    ) -> Result<Self> {
        if partitions.len() != ctx.parallel_degree() {
            return Err(FlareError::Config(format!(
                "partition set has {} ranges but parallel degree is {}",
                partitions.len(),
                ctx.parallel_degree()
            )));
        }
        let range = partitions.range(ctx.worker_id())?;
        Ok(Self {
            ctx,
            path: path.as_ref().to_path_buf(),
            partitions,
            range,
            state: SourceState::Unopened,
            line: Vec::new(),
        })
    }

    #[must_use]
    pub fn context(&self) -> WorkerContext {
        self.ctx
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn range(&self) -> PartitionRange {
        self.range
    }

    #[must_use]
    pub fn partitions(&self) -> &Arc<PartitionSet> {
        &self.partitions
    }

    /// Whether the operator currently holds an open file handle.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, SourceState::Ranging { .. })
    }

    fn close(&mut self) {
        if self.is_open() {
            trace!(
                "worker {}: closing {} at end of [{}, {})",
                self.ctx.worker_id(),
                self.path.display(),
                self.range.start,
                self.range.end
            );
        }
        self.state = SourceState::Exhausted;
    }
}

impl DataOp for TextFileOp {
    type Item = String;

    fn open(&mut self) -> Result<()> {
        if !matches!(self.state, SourceState::Unopened) {
            return Err(FlareError::AlreadyOpened);
        }
        let file = File::open(&self.path).map_err(|e| FlareError::io(&self.path, e))?;
        let mut reader = BufReader::new(file);
        reader
            .seek(SeekFrom::Start(self.range.start))
            .map_err(|e| FlareError::io(&self.path, e))?;
        trace!(
            "worker {}: opened {} at offset {}",
            self.ctx.worker_id(),
            self.path.display(),
            self.range.start
        );
        self.state = SourceState::Ranging {
            reader,
            pos: self.range.start,
        };
        Ok(())
    }

    fn next(&mut self) -> Result<Option<String>> {
        let (reader, pos) = match &mut self.state {
            SourceState::Unopened => return Err(FlareError::NotOpened),
            SourceState::Exhausted => return Ok(None),
            SourceState::Ranging { reader, pos } => (reader, pos),
        };
        if *pos >= self.range.end {
            self.close();
            return Ok(None);
        }

        let offset = *pos;
        self.line.clear();
        let read = match reader.read_until(b'\n', &mut self.line) {
            Ok(n) => n,
            Err(e) => {
                self.close();
                return Err(FlareError::io(&self.path, e));
            }
        };
        if read == 0 {
            // file shrank since it was partitioned
            self.close();
            return Ok(None);
        }
        *pos += read as u64;

        if self.line.last() == Some(&b'\n') {
            self.line.pop();
        }
        match String::from_utf8(std::mem::take(&mut self.line)) {
            Ok(line) => Ok(Some(line)),
            Err(_) => {
                self.close();
                Err(FlareError::InvalidUtf8 {
                    path: self.path.clone(),
                    offset,
                })
            }
        }
    }
}
