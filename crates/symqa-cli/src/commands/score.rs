//! The `symqa score` command.

use anyhow::Result;

use symqa_core::scoring::score_against_references;

pub fn execute(prediction: String, references: Vec<String>, format: String) -> Result<()> {
    let score = score_against_references(&prediction, &references);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&score)?),
        "text" => {
            println!("exact_match: {}", score.exact_match);
            println!("f1: {:.2}", score.f1);
        }
        other => anyhow::bail!("unknown format '{other}', expected text or json"),
    }

    Ok(())
}
