//! The `symqa answer` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use symqa_core::model::TieBreak;
use symqa_parser::load_config_from;

use super::build_engine;

pub async fn execute(
    question: String,
    passage: Option<String>,
    passage_file: Option<PathBuf>,
    tie_break: Option<TieBreak>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let passage = match (passage, passage_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read passage file: {}", path.display()))?,
        (None, None) => anyhow::bail!("either --passage or --passage-file is required"),
    };

    let config = load_config_from(config_path.as_deref())?;
    let engine = build_engine(&config, tie_break);

    // An empty line means the engine found no answer.
    let answer = engine.answer(&passage, &question).await;
    println!("{answer}");

    Ok(())
}
