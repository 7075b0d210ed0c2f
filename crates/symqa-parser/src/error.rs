//! Parser adapter error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when running an external constituency parser.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The parser process could not be started.
    #[error("failed to start parser '{program}': {message}")]
    Spawn { program: String, message: String },

    /// The parser did not finish in time.
    #[error("parser timed out after {0:?}")]
    Timeout(Duration),

    /// The parser exited unsuccessfully.
    #[error("parser exited with {}: {stderr}", describe_code(.code))]
    ExitStatus { code: Option<i32>, stderr: String },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}
