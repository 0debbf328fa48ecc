use crate::error::{FlareError, Result};

/// Identifies which partition a chain reads.
///
/// `parallel_degree` is the number of partitions the input is split into and
/// `worker_id` selects one of them. Nothing here spawns threads; an external
/// caller (for example [`Runner`](crate::Runner)) builds one chain per worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkerContext {
    worker_id: usize,
    parallel_degree: usize,
}

impl WorkerContext {
    /// Build a validated context.
    ///
    /// # Errors
    /// [`FlareError::InvalidPartitionCount`] when `parallel_degree == 0`, and
    /// [`FlareError::WorkerOutOfRange`] when `worker_id >= parallel_degree`.
    pub fn new(worker_id: usize, parallel_degree: usize) -> Result<Self> {
        if parallel_degree == 0 {
            return Err(FlareError::InvalidPartitionCount);
        }
        if worker_id >= parallel_degree {
            return Err(FlareError::WorkerOutOfRange {
                worker_id,
                parallel_degree,
            });
        }
        Ok(Self {
            worker_id,
            parallel_degree,
        })
    }

    /// Context for a single-partition run.
    #[must_use]
    pub fn single() -> Self {
        Self {
            worker_id: 0,
            parallel_degree: 1,
        }
    }

    #[must_use]
    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    #[must_use]
    pub fn parallel_degree(&self) -> usize {
        self.parallel_degree
    }

    /// Every context of the same degree, in worker order.
    pub fn siblings(self) -> impl Iterator<Item = WorkerContext> {
        let parallel_degree = self.parallel_degree;
        (0..parallel_degree).map(move |worker_id| WorkerContext {
            worker_id,
            parallel_degree,
        })
    }
}
