//! Testing utilities for Flare pipelines.
//!
//! - **Assertions**: compare chain outputs and check partition layouts
//! - **Fixtures**: scratch text files backed by `tempfile`
//! - **Mocks**: [`CountingOp`] records how often a stage is pulled
//!
//! # Quick Start
//!
//! ```
//! use flare::*;
//! use flare::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let fixture = TextFixture::new(SAMPLE_TEXT)?;
//! let ctx = WorkerContext::single();
//! let words = TextFileOp::new(ctx, fixture.path())?
//!     .flat_map(|l: String| l.split(' ').map(String::from).collect())
//!     .collect_vec()?;
//!
//! assert_collections_equal(&words, &["line", "one", "line", "two", "line", "three"].map(String::from));
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock;

pub use assertions::*;
pub use fixtures::*;
pub use mock::*;
