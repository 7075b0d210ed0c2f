//! Evaluation report types with JSON persistence and regression detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ScorePair;

/// A complete evaluation report for one answer source over one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Name of the answer source that was evaluated.
    pub source: String,
    /// Dataset the examples came from, if known.
    #[serde(default)]
    pub dataset: Option<String>,
    /// Per-example results, in dataset order.
    pub results: Vec<ExampleResult>,
    /// Aggregate scores.
    pub summary: EvalSummary,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Outcome of one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleResult {
    /// Question identifier.
    pub id: String,
    pub question: String,
    /// The answer produced (empty when the source failed).
    pub prediction: String,
    pub references: Vec<String>,
    /// Best scores over the references.
    pub score: ScorePair,
    /// Time spent answering, in milliseconds.
    pub latency_ms: u64,
    /// Error from the answer source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate scores of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    /// Number of examples evaluated.
    pub examples: usize,
    /// Examples whose answer source failed.
    pub failed: usize,
    /// Fraction of exact matches in `[0, 1]`.
    pub exact_match: f64,
    /// Mean F1 in `[0, 1]`.
    pub f1: f64,
}

impl EvalSummary {
    pub fn from_results(results: &[ExampleResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let n = results.len() as f64;
        let exact = results.iter().filter(|r| r.score.exact_match).count() as f64;
        let f1: f64 = results.iter().map(|r| r.score.f1).sum();

        Self {
            examples: results.len(),
            failed: results.iter().filter(|r| r.error.is_some()).count(),
            exact_match: exact / n,
            f1: f1 / n,
        }
    }
}

impl EvalReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvalReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare per-question F1 against a baseline report.
    ///
    /// A change larger than `threshold` (in F1 points, `0..=1`) counts as a
    /// regression or an improvement.
    pub fn compare(&self, baseline: &EvalReport, threshold: f64) -> RegressionReport {
        let f1_by_id = |report: &EvalReport| -> HashMap<String, f64> {
            report
                .results
                .iter()
                .map(|r| (r.id.clone(), r.score.f1))
                .collect()
        };

        let baseline_scores = f1_by_id(baseline);
        let current_scores = f1_by_id(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_examples = 0usize;

        for (id, &current) in &current_scores {
            let Some(&baseline_f1) = baseline_scores.get(id) else {
                new_examples += 1;
                continue;
            };
            let delta = current - baseline_f1;
            let change = ScoreChange {
                id: id.clone(),
                baseline_f1,
                current_f1: current,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_examples = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k))
            .count();

        regressions.sort_by(|a, b| a.id.cmp(&b.id));
        improvements.sort_by(|a, b| a.id.cmp(&b.id));

        RegressionReport {
            baseline_f1: baseline.summary.f1,
            current_f1: self.summary.f1,
            regressions,
            improvements,
            unchanged,
            new_examples,
            removed_examples,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Mean F1 of the baseline.
    pub baseline_f1: f64,
    /// Mean F1 of the current report.
    pub current_f1: f64,
    /// Questions whose F1 went down.
    pub regressions: Vec<ScoreChange>,
    /// Questions whose F1 went up.
    pub improvements: Vec<ScoreChange>,
    /// Questions with no significant change.
    pub unchanged: usize,
    /// Questions in current but not baseline.
    pub new_examples: usize,
    /// Questions in baseline but not current.
    pub removed_examples: usize,
}

/// F1 change of one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub id: String,
    pub baseline_f1: f64,
    pub current_f1: f64,
    pub delta: f64,
}

impl RegressionReport {
    /// Format the regression report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Mean F1:** {:.1}% -> {:.1}%\n\n",
            self.baseline_f1 * 100.0,
            self.current_f1 * 100.0
        ));
        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Question | Baseline F1 | Current F1 | Delta |\n");
            md.push_str("|----------|-------------|------------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.2} | {:.2} | {:+.2} |\n",
                    c.id, c.baseline_f1, c.current_f1, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, exact_match: bool, f1: f64) -> ExampleResult {
        ExampleResult {
            id: id.into(),
            question: format!("pergunta {id}"),
            prediction: String::new(),
            references: vec!["Rio".into()],
            score: ScorePair { exact_match, f1 },
            latency_ms: 0,
            error: None,
        }
    }

    fn make_report(results: Vec<ExampleResult>) -> EvalReport {
        EvalReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            source: "symbolic".into(),
            dataset: Some("faquad-dev".into()),
            summary: EvalSummary::from_results(&results),
            results,
            duration_ms: 0,
        }
    }

    #[test]
    fn summary_averages_scores() {
        let mut failed = result("q3", false, 0.0);
        failed.error = Some("timeout".into());
        let summary =
            EvalSummary::from_results(&[result("q1", true, 1.0), result("q2", false, 0.5), failed]);

        assert_eq!(summary.examples, 3);
        assert_eq!(summary.failed, 1);
        assert!((summary.exact_match - 1.0 / 3.0).abs() < 1e-9);
        assert!((summary.f1 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(EvalSummary::from_results(&[]), EvalSummary::default());
    }

    #[test]
    fn compare_identical_reports() {
        let baseline = make_report(vec![result("q1", true, 1.0)]);
        let current = make_report(vec![result("q1", true, 1.0)]);

        let report = current.compare(&baseline, 0.05);
        assert!(!report.has_regressions());
        assert!(report.improvements.is_empty());
        assert_eq!(report.unchanged, 1);
    }

    #[test]
    fn compare_with_regression_and_improvement() {
        let baseline = make_report(vec![result("q1", true, 1.0), result("q2", false, 0.2)]);
        let current = make_report(vec![result("q1", false, 0.4), result("q2", false, 0.8)]);

        let report = current.compare(&baseline, 0.05);
        assert_eq!(report.regressions.len(), 1);
        assert_eq!(report.regressions[0].id, "q1");
        assert_eq!(report.improvements.len(), 1);
        assert_eq!(report.improvements[0].id, "q2");
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = make_report(vec![result("old", true, 1.0)]);
        let current = make_report(vec![result("new", true, 1.0)]);

        let report = current.compare(&baseline, 0.05);
        assert_eq!(report.new_examples, 1);
        assert_eq!(report.removed_examples, 1);
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(vec![result("q1", true, 1.0)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = EvalReport::load_json(&path).unwrap();

        assert_eq!(loaded.source, "symbolic");
        assert_eq!(loaded.results.len(), 1);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn markdown_output() {
        let baseline = make_report(vec![result("q1", true, 1.0)]);
        let current = make_report(vec![result("q1", false, 0.0)]);

        let md = current.compare(&baseline, 0.05).to_markdown();
        assert!(md.contains("Regressions"));
        assert!(md.contains("q1"));
        assert!(md.contains("-1.00"));
    }
}
