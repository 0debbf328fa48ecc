//! Drives one independent chain per partition.
//!
//! The core operators never spawn threads. [`Runner`] plays the role of the
//! external caller: it computes the [`PartitionSet`] once, hands every worker
//! its own [`TextFileOp`] (sharing only the read-only set), lets a
//! caller-supplied closure attach transforms, and drains each chain.
//!
//! ```no_run
//! use flare::*;
//!
//! let words = Runner::default().run_flatten("input.txt", 4, |src| {
//!     src.flat_map(|l: String| l.split(' ').map(String::from).collect())
//!         .filter(|w: &String| !w.is_empty())
//! })?;
//! # Ok::<(), flare::FlareError>(())
//! ```

use crate::context::WorkerContext;
use crate::error::{FlareError, Result};
use crate::io::TextFileOp;
use crate::op::DataOp;
use crate::partition::PartitionSet;
use log::debug;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    /// Run the chains one after another on the calling thread, in worker order.
    Sequential,
    /// Run the chains on a dedicated rayon pool; `None` uses rayon's default size.
    Parallel { threads: Option<usize> },
}

#[derive(Clone, Copy, Debug)]
pub struct Runner {
    pub mode: ExecMode,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel { threads: None },
        }
    }
}

impl Runner {
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
        }
    }

    #[must_use]
    pub fn parallel(threads: Option<usize>) -> Self {
        Self {
            mode: ExecMode::Parallel { threads },
        }
    }

    /// Run one chain per worker and return each worker's output, indexed by
    /// worker id.
    ///
    /// # Errors
    /// Partitioning and configuration errors, [`FlareError::Runner`] when the
    /// per-worker output table cannot be allocated, or the error of the
    /// lowest-numbered failing worker. A failed chain fails the whole run.
    /// Sequential mode stops at that worker; parallel mode lets the other
    /// chains finish before reporting it.
    pub fn run_collect<O, F>(
        &self,
        path: impl AsRef<Path>,
        parallel_degree: usize,
        build: F,
    ) -> Result<Vec<Vec<O::Item>>>
    where
        O: DataOp,
        O::Item: Send,
        F: Fn(TextFileOp) -> O + Sync,
    {
        let path = path.as_ref();
        WorkerContext::new(0, parallel_degree)?;
        let partitions = Arc::new(PartitionSet::from_path(path, parallel_degree)?);

        let run_one = |worker_id: usize| -> Result<Vec<O::Item>> {
            let ctx = WorkerContext::new(worker_id, parallel_degree)?;
            let source = TextFileOp::with_partitions(ctx, path, Arc::clone(&partitions))?;
            let range = source.range();
            debug!("worker {worker_id}: running [{}, {})", range.start, range.end);
            let out = build(source).collect_vec()?;
            debug!("worker {worker_id}: produced {} elements", out.len());
            Ok(out)
        };

        match self.mode {
            ExecMode::Sequential => {
                let mut outputs = with_slots(parallel_degree)?;
                for worker_id in 0..parallel_degree {
                    outputs.push(run_one(worker_id)?);
                }
                Ok(outputs)
            }
            ExecMode::Parallel { threads } => {
                let mut results = with_slots(parallel_degree)?;
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.unwrap_or(0))
                    .build()
                    .map_err(|e| FlareError::Runner(e.to_string()))?;
                pool.install(|| {
                    (0..parallel_degree)
                        .into_par_iter()
                        .map(run_one)
                        .collect_into_vec(&mut results);
                });
                results.into_iter().collect()
            }
        }
    }

    /// Like [`run_collect`](Runner::run_collect), concatenated in partition
    /// order. For a bare source this reproduces the file's lines in order.
    ///
    /// # Errors
    /// Same as [`run_collect`](Runner::run_collect).
    pub fn run_flatten<O, F>(
        &self,
        path: impl AsRef<Path>,
        parallel_degree: usize,
        build: F,
    ) -> Result<Vec<O::Item>>
    where
        O: DataOp,
        O::Item: Send,
        F: Fn(TextFileOp) -> O + Sync,
    {
        Ok(self
            .run_collect(path, parallel_degree, build)?
            .into_iter()
            .flatten()
            .collect())
    }
}

/// An empty vec with room for one entry per worker.
fn with_slots<T>(parallel_degree: usize) -> Result<Vec<T>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(parallel_degree).map_err(|e| {
        FlareError::Runner(format!("no room for {parallel_degree} worker outputs: {e}"))
    })?;
    Ok(slots)
}
