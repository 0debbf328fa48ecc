//! Scratch text files for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Three short lines, 29 bytes, newline-terminated.
pub const SAMPLE_TEXT: &str = "line one\nline two\nline three\n";

/// A text file inside its own temporary directory, removed on drop.
pub struct TextFixture {
    #[allow(dead_code)]
    dir: TempDir,
    path: PathBuf,
}

impl TextFixture {
    /// Write `contents` to a fresh `input.txt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn new(contents: impl AsRef<[u8]>) -> Result<Self> {
        let dir = TempDir::new().context("create temp dir")?;
        let path = dir.path().join("input.txt");
        fs::write(&path, contents.as_ref())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(Self { dir, path })
    }

    /// A fixture holding `numbered_lines(count)`.
    ///
    /// # Errors
    ///
    /// Same as [`TextFixture::new`].
    pub fn numbered(count: usize) -> Result<Self> {
        Self::new(numbered_lines(count))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file metadata cannot be read.
    pub fn size(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path)
            .with_context(|| format!("stat {}", self.path.display()))?
            .len())
    }

    /// The file's lines, terminators stripped, as the source would yield them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read back.
    pub fn lines(&self) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        Ok(text.lines().map(String::from).collect())
    }
}

/// `count` lines of varying length: `"row 0"`, `"row 1 x"`, `"row 2 xx"`, ...
///
/// # Example
///
/// ```
/// use flare::testing::numbered_lines;
///
/// assert_eq!(numbered_lines(2), "row 0\nrow 1 x\n");
/// ```
#[must_use]
pub fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| {
            let pad = "x".repeat(i % 7);
            if pad.is_empty() {
                format!("row {i}\n")
            } else {
                format!("row {i} {pad}\n")
            }
        })
        .collect()
}
