//! The `symqa validate` command.

use std::path::PathBuf;

use anyhow::Result;

use symqa_core::dataset::{load_squad, validate_dataset};

pub fn execute(dataset_path: PathBuf) -> Result<()> {
    let examples = load_squad(&dataset_path)?;
    let passages: std::collections::HashSet<&str> =
        examples.iter().map(|e| e.context.as_str()).collect();

    println!(
        "Dataset: {} ({} questions, {} passages)",
        dataset_path.display(),
        examples.len(),
        passages.len()
    );

    let warnings = validate_dataset(&examples);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.id, w.message);
    }

    if warnings.is_empty() {
        println!("Dataset valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
