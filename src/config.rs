//! Construction parameters for a file-backed chain.
//!
//! A [`SourceConfig`] names the input file, how many partitions to split it
//! into, and which partition this chain reads. It can be built in code or
//! loaded from JSON:
//!
//! ```json
//! { "path": "data/small.txt", "parallel_degree": 6, "worker_id": 0 }
//! ```
//!
//! `parallel_degree` defaults to the number of CPUs and `worker_id` to `0`.

use crate::context::WorkerContext;
use crate::error::{FlareError, Result};
use crate::io::TextFileOp;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_degree: Option<usize>,
    #[serde(default)]
    pub worker_id: usize,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            parallel_degree: None,
            worker_id: 0,
        }
    }

    #[must_use]
    pub fn with_parallel_degree(mut self, parallel_degree: usize) -> Self {
        self.parallel_degree = Some(parallel_degree);
        self
    }

    #[must_use]
    pub fn with_worker_id(mut self, worker_id: usize) -> Self {
        self.worker_id = worker_id;
        self
    }

    /// # Errors
    /// [`FlareError::Config`] if `json` is not a valid config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FlareError::Config(e.to_string()))
    }

    /// # Errors
    /// [`FlareError::Io`] if the file cannot be read, or
    /// [`FlareError::Config`] if it does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| FlareError::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| FlareError::Config(format!("{}: {e}", path.display())))
    }

    /// Effective partition count.
    #[must_use]
    pub fn parallel_degree(&self) -> usize {
        self.parallel_degree.unwrap_or_else(num_cpus::get)
    }

    /// # Errors
    /// Same as [`WorkerContext::new`].
    pub fn context(&self) -> Result<WorkerContext> {
        WorkerContext::new(self.worker_id, self.parallel_degree())
    }

    /// Validate the config and build the source for its worker.
    ///
    /// # Errors
    /// Configuration errors from [`context`](SourceConfig::context), or I/O
    /// errors from probing the file.
    pub fn open_source(&self) -> Result<TextFileOp> {
        TextFileOp::new(self.context()?, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg = SourceConfig::from_json_str(r#"{"path":"a.txt"}"#).unwrap();
        assert_eq!(cfg, SourceConfig::new("a.txt"));
        assert_eq!(cfg.parallel_degree(), num_cpus::get());
    }

    #[test]
    fn unknown_field_rejected() {
        let err = SourceConfig::from_json_str(r#"{"path":"a.txt","threads":2}"#).unwrap_err();
        assert!(matches!(err, FlareError::Config(_)));
    }

    #[test]
    fn worker_outside_degree_rejected() {
        let cfg = SourceConfig::new("a.txt")
            .with_parallel_degree(2)
            .with_worker_id(5);
        assert!(matches!(
            cfg.context(),
            Err(FlareError::WorkerOutOfRange {
                worker_id: 5,
                parallel_degree: 2
            })
        ));
    }
}
