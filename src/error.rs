//! Error types for Flare pipelines.
//!
//! Every fallible operation in the crate (partition computation, `open`,
//! `next`, config loading, the runner) returns [`Result`], so callers decide
//! per partition whether to abort the whole run or skip the failing chain.
//! Nothing is retried.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlareError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Read(#[from] io::Error),

    #[error("partition count must be at least 1")]
    InvalidPartitionCount,

    #[error("worker id {worker_id} is out of range for parallel degree {parallel_degree}")]
    WorkerOutOfRange {
        worker_id: usize,
        parallel_degree: usize,
    },

    #[error("invalid UTF-8 in {} at byte offset {offset}", .path.display())]
    InvalidUtf8 { path: PathBuf, offset: u64 },

    #[error("operator used before open()")]
    NotOpened,

    #[error("open() called twice on the same operator")]
    AlreadyOpened,

    #[error("invalid config: {0}")]
    Config(String),

    #[error("runner failed: {0}")]
    Runner(String),
}

impl FlareError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlareError>;
