//! The `symqa eval` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use symqa_core::dataset::load_squad;
use symqa_core::evaluation::{Evaluator, EvaluatorConfig, ProgressReporter};
use symqa_core::model::TieBreak;
use symqa_core::predictions::{load_predictions, PrecomputedAnswers};
use symqa_core::report::{EvalReport, ExampleResult};
use symqa_core::traits::AnswerSource;
use symqa_parser::load_config_from;

use super::build_engine;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_example_start(&self, _id: &str) {}

    fn on_example_complete(&self, result: &ExampleResult) {
        let icon = if result.score.exact_match { "EM" } else { "--" };
        eprintln!(
            "  Done: {} [{}] F1 {:.2} ({}ms)",
            result.id, icon, result.score.f1, result.latency_ms
        );
    }

    fn on_example_error(&self, id: &str, error: &str) {
        eprintln!("  ERROR: {id}: {error}");
    }

    fn on_run_complete(&self, total: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {total} questions, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

/// Arguments of `symqa eval`.
pub struct EvalArgs {
    pub dataset: PathBuf,
    pub predictions: Option<PathBuf>,
    pub parallelism: Option<usize>,
    pub limit: Option<usize>,
    pub output: Option<PathBuf>,
    pub tie_break: Option<TieBreak>,
    pub config: Option<PathBuf>,
}

pub async fn execute(args: EvalArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let parallelism = args.parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let mut examples = load_squad(&args.dataset)?;
    if let Some(limit) = args.limit {
        examples.truncate(limit);
    }

    let source: Arc<dyn AnswerSource> = match &args.predictions {
        Some(path) => {
            let predictions = load_predictions(path)?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "predictions".to_string());
            Arc::new(PrecomputedAnswers::from_predictions(
                name,
                &examples,
                &predictions,
            ))
        }
        None => Arc::new(build_engine(&config, args.tie_break)),
    };

    eprintln!(
        "symqa v{}: evaluating '{}' on {} questions",
        env!("CARGO_PKG_VERSION"),
        source.name(),
        examples.len()
    );
    eprintln!();

    let dataset_name = args
        .dataset
        .file_name()
        .map(|s| s.to_string_lossy().to_string());
    let evaluator = Evaluator::new(EvaluatorConfig {
        parallelism,
        dataset: dataset_name,
    });
    let report = evaluator.run(&examples, source, &ConsoleReporter).await?;

    print_summary(&report);

    let output = args.output.unwrap_or(config.output_dir);
    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let path = output.join(format!("report-{timestamp}.json"));
    report.save_json(&path)?;
    eprintln!("Results saved to: {}", path.display());

    Ok(())
}

fn print_summary(report: &EvalReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Source",
        "Questions",
        "Exact Match",
        "F1",
        "Failed",
        "Duration",
    ]);

    let summary = &report.summary;
    table.add_row(vec![
        Cell::new(&report.source),
        Cell::new(summary.examples),
        Cell::new(format!("{:.1}%", summary.exact_match * 100.0)),
        Cell::new(format!("{:.1}%", summary.f1 * 100.0)),
        Cell::new(summary.failed),
        Cell::new(format!("{:.1}s", report.duration_ms as f64 / 1000.0)),
    ]);

    eprintln!("\n{table}");
}
