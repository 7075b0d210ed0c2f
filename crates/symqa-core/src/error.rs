//! Tree reading error types.
//!
//! A malformed bracketed tree aborts only the sentence it belongs to, so the
//! pipeline needs to tell these apart from process or I/O failures.

use thiserror::Error;

/// Errors produced while reading a bracketed parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The input held no tree at all.
    #[error("empty tree string")]
    Empty,

    /// A token appeared where it is not allowed.
    #[error("unexpected '{found}' at byte {position}")]
    Unexpected { found: String, position: usize },

    /// Input ended with open brackets.
    #[error("unbalanced brackets: {0} left open")]
    Unclosed(usize),

    /// More input followed a complete tree.
    #[error("trailing input after tree at byte {0}")]
    TrailingInput(usize),
}
