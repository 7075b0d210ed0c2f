//! Core trait definitions for the external parser, the parse cache storage,
//! and answer sources.
//!
//! Parsers are implemented by the `symqa-parser` crate; stores and the
//! symbolic engine live in this crate.

use async_trait::async_trait;

use crate::model::SentenceMap;

// ---------------------------------------------------------------------------
// Constituency parser
// ---------------------------------------------------------------------------

/// A constituency parser producing bracketed trees.
#[async_trait]
pub trait ConstituencyParser: Send + Sync {
    /// Human-readable parser name (e.g. "stanford-cintil").
    fn name(&self) -> &str;

    /// Parse a batch of sentences, one per entry.
    ///
    /// Returns the bracketed tree of every non-empty output line, in order.
    async fn parse(&self, sentences: &[String]) -> anyhow::Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// Parse cache storage
// ---------------------------------------------------------------------------

/// Storage backing the passage parse cache.
///
/// Last write wins; entries are never evicted.
#[async_trait]
pub trait ParseStore: Send + Sync {
    /// Look up the stored sentence map of `passage`.
    async fn get(&self, passage: &str) -> anyhow::Result<Option<SentenceMap>>;

    /// Store (or replace) the sentence map of `passage`.
    async fn put(&self, passage: &str, sentences: SentenceMap) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Answer source
// ---------------------------------------------------------------------------

/// Anything that answers a question about a passage.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Human-readable source name, used in reports.
    fn name(&self) -> &str;

    /// Answer `question` from `context`. An empty string means no answer.
    async fn answer(&self, context: &str, question: &str) -> anyhow::Result<String>;
}
