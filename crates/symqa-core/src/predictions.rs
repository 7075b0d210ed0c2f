//! Precomputed answers, e.g. the output of a neural reader.
//!
//! Predictions use the SQuAD convention: a JSON object mapping question IDs
//! to answer strings.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::model::QaExample;
use crate::traits::AnswerSource;

/// Load a `{ "<question id>": "<answer>" }` predictions file.
pub fn load_predictions(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read predictions file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse predictions: {}", path.display()))
}

/// Answer source that replays stored answers.
///
/// Answers are looked up by `(context, question)`, the pair an
/// [`AnswerSource`] is asked about. Questions with identical text over the
/// same passage therefore share one answer: the prediction of the last such
/// question in dataset order wins, and the collision is logged.
#[derive(Debug, Clone)]
pub struct PrecomputedAnswers {
    name: String,
    answers: HashMap<(String, String), String>,
}

impl PrecomputedAnswers {
    /// Attach predictions (keyed by question ID) to their examples.
    ///
    /// Predictions for IDs not present in `examples` are ignored.
    pub fn from_predictions(
        name: impl Into<String>,
        examples: &[QaExample],
        predictions: &HashMap<String, String>,
    ) -> Self {
        let mut answers: HashMap<(String, String), String> = HashMap::new();
        let mut owners: HashMap<(String, String), &str> = HashMap::new();

        for example in examples {
            let Some(answer) = predictions.get(&example.id) else {
                continue;
            };
            let key = (example.context.clone(), example.question.clone());
            if let Some(previous) = owners.insert(key.clone(), &example.id) {
                warn!(
                    kept = %example.id,
                    replaced = %previous,
                    "questions share passage and text; keeping the later prediction"
                );
            }
            answers.insert(key, answer.clone());
        }

        debug!(
            matched = answers.len(),
            total = predictions.len(),
            "loaded precomputed answers"
        );

        Self {
            name: name.into(),
            answers,
        }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[async_trait]
impl AnswerSource for PrecomputedAnswers {
    fn name(&self) -> &str {
        &self.name
    }

    async fn answer(&self, context: &str, question: &str) -> Result<String> {
        self.answers
            .get(&(context.to_string(), question.to_string()))
            .cloned()
            .with_context(|| format!("no precomputed answer for question: {question}"))
    }
}
