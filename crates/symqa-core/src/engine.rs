//! Symbolic answer engine.
//!
//! Picks the passage sentence that shares the most stemmed content words
//! with the question. Parses are memoized per passage through the
//! [`PassageCache`].

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::PassageCache;
use crate::model::{SentenceMap, TieBreak};
use crate::pipeline::SyntacticPipeline;
use crate::text::LexicalPreprocessor;
use crate::traits::{AnswerSource, ConstituencyParser, ParseStore};

/// Configuration for the symbolic engine.
#[derive(Debug, Clone, Default)]
pub struct SymbolicEngineConfig {
    /// How equal overlap counts are resolved.
    pub tie_break: TieBreak,
}

/// Answers questions by sentence selection over constituency parses.
pub struct SymbolicEngine {
    pipeline: SyntacticPipeline,
    cache: PassageCache,
    preprocessor: LexicalPreprocessor,
    config: SymbolicEngineConfig,
}

impl SymbolicEngine {
    pub fn new(
        parser: Arc<dyn ConstituencyParser>,
        store: Arc<dyn ParseStore>,
        config: SymbolicEngineConfig,
    ) -> Self {
        Self {
            pipeline: SyntacticPipeline::new(parser),
            cache: PassageCache::new(store),
            preprocessor: LexicalPreprocessor::portuguese(),
            config,
        }
    }

    pub fn config(&self) -> &SymbolicEngineConfig {
        &self.config
    }

    /// Answer `question` from `passage`.
    ///
    /// Never fails: every error is logged and yields an empty answer.
    pub async fn answer(&self, passage: &str, question: &str) -> String {
        match self.try_answer(passage, question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("symbolic answer failed, returning empty answer: {e:#}");
                String::new()
            }
        }
    }

    /// Answer `question` from `passage`, surfacing parser and cache errors.
    pub async fn try_answer(&self, passage: &str, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            debug!("blank question, skipping parse");
            return Ok(String::new());
        }

        let question_tokens = self.preprocessor.tokenize_for_matching(question);
        let sentences = self.cache.get_or_parse(passage, &self.pipeline).await?;
        Ok(self.select_sentence(&question_tokens, &sentences))
    }

    /// Pick the sentence with the highest question-token overlap.
    ///
    /// Sentences are visited in index order and the first one is always
    /// adopted. Bundles without exactly one sentence span are skipped.
    pub fn select_sentence(&self, question_tokens: &[String], sentences: &SentenceMap) -> String {
        let mut best: Option<(usize, &str)> = None;

        for bundle in sentences.values() {
            let Some(sentence) = bundle.sentence_text() else {
                continue;
            };
            let sentence_tokens = self.preprocessor.tokenize_for_matching(sentence);
            let count = overlap_count(question_tokens, &sentence_tokens);

            let adopt = match (best, self.config.tie_break) {
                (None, _) => true,
                (Some((best_count, _)), TieBreak::LastWins) => count >= best_count,
                (Some((best_count, _)), TieBreak::FirstWins) => count > best_count,
            };
            if adopt {
                best = Some((count, sentence));
            }
        }

        best.map(|(_, sentence)| sentence.to_string())
            .unwrap_or_default()
    }
}

/// Number of question tokens (with repetition) that occur in the sentence.
pub fn overlap_count(question_tokens: &[String], sentence_tokens: &[String]) -> usize {
    let sentence: HashSet<&str> = sentence_tokens.iter().map(String::as_str).collect();
    question_tokens
        .iter()
        .filter(|token| sentence.contains(token.as_str()))
        .count()
}

#[async_trait]
impl AnswerSource for SymbolicEngine {
    fn name(&self) -> &str {
        "symbolic"
    }

    async fn answer(&self, context: &str, question: &str) -> Result<String> {
        Ok(SymbolicEngine::answer(self, context, question).await)
    }
}
