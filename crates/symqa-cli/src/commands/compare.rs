//! The `symqa compare` command.

use std::path::PathBuf;

use anyhow::Result;

use symqa_core::report::EvalReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = EvalReport::load_json(&baseline_path)?;
    let current = EvalReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Mean F1: {:.1}% -> {:.1}%",
                report.baseline_f1 * 100.0,
                report.current_f1 * 100.0
            );
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} F1 {:.2} -> {:.2} ({:+.2})",
                        r.id, r.baseline_f1, r.current_f1, r.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} F1 {:.2} -> {:.2} ({:+.2})",
                        i.id, i.baseline_f1, i.current_f1, i.delta
                    );
                }
            }

            if report.new_examples > 0 {
                println!("\n{} new question(s)", report.new_examples);
            }
            if report.removed_examples > 0 {
                println!("{} removed question(s)", report.removed_examples);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
