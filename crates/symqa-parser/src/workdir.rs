//! Scratch directory holding the parser's input file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

const INPUT_FILE: &str = "sentences.txt";

/// A temporary directory for one parser invocation.
///
/// On drop, the directory and the input file are removed.
pub struct ParseWorkdir {
    dir: TempDir,
}

impl ParseWorkdir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("symqa-parse-")
            .tempdir()
            .context("failed to create temp directory")?;
        Ok(Self { dir })
    }

    /// Get the path to the working directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write the sentences, one per line, and return the input file path.
    pub fn write_sentences(&self, sentences: &[String]) -> Result<PathBuf> {
        let path = self.dir.path().join(INPUT_FILE);
        let mut content = sentences.join("\n");
        content.push('\n');
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
