//! Passage to sentence map: split, parse, extract.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::model::SentenceMap;
use crate::phrases::build_sentence_map;
use crate::splitter::prepare_sentences;
use crate::traits::ConstituencyParser;
use crate::tree::Tree;

/// Runs the external parser over a passage and extracts its sentences.
pub struct SyntacticPipeline {
    parser: Arc<dyn ConstituencyParser>,
}

impl SyntacticPipeline {
    pub fn new(parser: Arc<dyn ConstituencyParser>) -> Self {
        Self { parser }
    }

    pub fn parser_name(&self) -> &str {
        self.parser.name()
    }

    /// Build the sentence map of `passage`.
    ///
    /// An empty passage yields an empty map without calling the parser.
    /// Parser failures are returned as errors.
    pub async fn parse_passage(&self, passage: &str) -> Result<SentenceMap> {
        let sentences = prepare_sentences(passage);
        if sentences.is_empty() {
            debug!("passage has no sentences, skipping parser");
            return Ok(SentenceMap::new());
        }

        debug!(
            parser = self.parser.name(),
            sentences = sentences.len(),
            "invoking constituency parser"
        );
        let trees = self
            .parser
            .parse(&sentences)
            .await
            .with_context(|| format!("parser '{}' failed", self.parser.name()))?;

        Ok(sentence_map_from_trees(&trees))
    }
}

/// Read bracketed trees and extract their sentences.
///
/// A tree that cannot be read is skipped; the rest of the passage is kept.
pub fn sentence_map_from_trees(trees: &[String]) -> SentenceMap {
    let parsed: Vec<Tree> = trees
        .iter()
        .enumerate()
        .filter_map(|(line, raw)| match Tree::parse(raw) {
            Ok(tree) => Some(tree),
            Err(e) => {
                warn!(line, error = %e, "skipping malformed parse tree");
                None
            }
        })
        .collect();

    build_sentence_map(&parsed)
}
