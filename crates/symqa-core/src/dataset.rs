//! SQuAD-format dataset loader (SQuAD 1.1, FaQuAD).
//!
//! Flattens `data[].paragraphs[].qas[]` into one [`QaExample`] per question.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{QaExample, ReferenceAnswer};

#[derive(Debug, Deserialize)]
struct SquadFile {
    data: Vec<SquadArticle>,
}

#[derive(Debug, Deserialize)]
struct SquadArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    paragraphs: Vec<SquadParagraph>,
}

#[derive(Debug, Deserialize)]
struct SquadParagraph {
    context: String,
    #[serde(default)]
    qas: Vec<SquadQuestion>,
}

#[derive(Debug, Deserialize)]
struct SquadQuestion {
    #[serde(default)]
    id: Option<String>,
    question: String,
    #[serde(default)]
    answers: Vec<ReferenceAnswer>,
}

/// Load a SQuAD-format JSON file.
pub fn load_squad(path: &Path) -> Result<Vec<QaExample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file: {}", path.display()))?;

    parse_squad_str(&content)
        .with_context(|| format!("failed to parse dataset: {}", path.display()))
}

/// Parse SQuAD-format JSON from a string.
///
/// Questions without an `id` get `{title}-{paragraph}-{question}`.
pub fn parse_squad_str(content: &str) -> Result<Vec<QaExample>> {
    let parsed: SquadFile = serde_json::from_str(content).context("invalid SQuAD JSON")?;

    let mut examples = Vec::new();
    for article in parsed.data {
        for (p, paragraph) in article.paragraphs.into_iter().enumerate() {
            for (q, qa) in paragraph.qas.into_iter().enumerate() {
                let id = qa
                    .id
                    .unwrap_or_else(|| format!("{}-{p}-{q}", article.title));
                examples.push(QaExample {
                    id,
                    title: article.title.clone(),
                    context: paragraph.context.clone(),
                    question: qa.question,
                    answers: qa.answers,
                });
            }
        }
    }

    Ok(examples)
}

/// A warning from dataset validation.
#[derive(Debug, Clone)]
pub struct DatasetWarning {
    /// The question ID.
    pub id: String,
    /// Warning message.
    pub message: String,
}

/// Check a loaded dataset for issues that skew evaluation.
pub fn validate_dataset(examples: &[QaExample]) -> Vec<DatasetWarning> {
    let mut warnings = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    for example in examples {
        if !seen_ids.insert(example.id.as_str()) {
            warnings.push(DatasetWarning {
                id: example.id.clone(),
                message: format!("duplicate question ID: {}", example.id),
            });
        }
        if example.question.trim().is_empty() {
            warnings.push(DatasetWarning {
                id: example.id.clone(),
                message: "question is empty".into(),
            });
        }
        if example.answers.is_empty() {
            warnings.push(DatasetWarning {
                id: example.id.clone(),
                message: "no reference answers; scored against the empty answer".into(),
            });
        }
    }

    warnings
}
