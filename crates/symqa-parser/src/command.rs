//! Subprocess-backed constituency parser.
//!
//! Writes the sentences to a scratch file, runs the configured command with
//! the file path appended to its arguments, and reads one bracketed tree per
//! non-empty stdout line.

use std::process::Stdio;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use symqa_core::traits::ConstituencyParser;

use crate::config::ParserConfig;
use crate::error::ParserError;
use crate::workdir::ParseWorkdir;

/// Default time allowed for one parser run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs an external parser command per batch of sentences.
#[derive(Debug, Clone)]
pub struct CommandParser {
    name: String,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandParser {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        Self {
            name: program.clone(),
            program,
            args,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build the parser described by a `[parser]` configuration table.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(config.program.clone(), config.command_args())
            .with_name(config.name())
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ConstituencyParser for CommandParser {
    fn name(&self) -> &str {
        &self.name
    }

    async fn parse(&self, sentences: &[String]) -> Result<Vec<String>> {
        let workdir = ParseWorkdir::new()?;
        let input = workdir.write_sentences(sentences)?;
        let start = Instant::now();

        let mut cmd = Command::new(&self.program);
        // Runs in the caller's directory so relative jar and grammar paths resolve.
        cmd.args(&self.args)
            .arg(&input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| ParserError::Spawn {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ParserError::Timeout(self.timeout))?
            .map_err(|e| ParserError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ParserError::ExitStatus {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let trees = parse_tree_lines(&String::from_utf8_lossy(&output.stdout));
        debug!(
            parser = %self.name,
            sentences = sentences.len(),
            trees = trees.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "parser finished"
        );
        Ok(trees)
    }
}

/// One tree per non-empty output line.
pub fn parse_tree_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
