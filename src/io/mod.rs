//! File-backed sources.

pub mod text;

pub use text::TextFileOp;
