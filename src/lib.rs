//! # Flare
//!
//! A **minimal lazy dataflow pipeline** over line-oriented text files. A file
//! is split into contiguous, line-aligned byte ranges (one per worker), and
//! each worker reads its range through a chain of pull-based stages.
//!
//! ## Key Features
//!
//! - **Line-aligned partitioning** - no line is ever split across two workers
//! - **Pull iteration** - stages run only when the consumer asks for the next element
//! - **Stateless transforms** - map, filter, flat_map, composable without intermediate collections
//! - **One chain per worker** - chains share nothing but the read-only partition set
//! - **Typed errors** - I/O and configuration failures are returned, never fatal to the process
//!
//! ## Quick Start
//!
//! ```no_run
//! use flare::*;
//!
//! # fn main() -> flare::Result<()> {
//! let ctx = WorkerContext::new(0, 4)?;
//! let mut words = TextFileOp::new(ctx, "input.txt")?
//!     .flat_map(|line: String| line.split(' ').map(String::from).collect())
//!     .filter(|w: &String| w.len() == 3);
//!
//! words.open()?;
//! while let Some(w) = words.next()? {
//!     println!("{w}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Operators
//!
//! Every stage implements [`DataOp`]: `open` once, then `next` until it
//! returns `Ok(None)`. Transform stages own their upstream, so a chain is
//! built source-first and dropped as a unit, which closes the source file.
//!
//! ### Partitions
//!
//! [`PartitionSet`] holds one [`PartitionRange`] per worker. A
//! [`WorkerContext`] picks which range a [`TextFileOp`] reads.
//!
//! ### Execution
//!
//! The operators never spawn threads. Drive a single chain yourself, or let
//! [`Runner`] build and drain one chain per worker, sequentially or on a
//! rayon pool.
//!
//! ## Module Overview
//!
//! - [`op`] - the `DataOp` contract and iterator bridge
//! - [`transforms`] - map, filter and flat_map stages
//! - [`partition`] - byte-range partitioning
//! - [`io`] - the partitioned text file source
//! - [`helpers`] - in-memory sources
//! - [`runner`] - per-worker driver
//! - [`config`] - JSON-loadable construction parameters
//! - [`testing`] - assertions, fixtures and mocks for tests

pub mod config;
pub mod context;
pub mod error;
pub mod helpers;
pub mod io;
pub mod op;
pub mod partition;
pub mod runner;
pub mod testing;
pub mod transforms;

// General re-exports
pub use config::SourceConfig;
pub use context::WorkerContext;
pub use error::{FlareError, Result};
pub use helpers::*;
pub use io::TextFileOp;
pub use op::{BoxedOp, DataOp, OpIter};
pub use partition::{PartitionRange, PartitionSet};
pub use runner::{ExecMode, Runner};
pub use transforms::{FilterOp, FlatMapOp, MapOp};
