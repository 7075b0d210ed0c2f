//! Batch evaluation of an answer source over a dataset.
//!
//! Examples are answered concurrently, bounded by a semaphore, and scored
//! against their reference answers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::model::QaExample;
use crate::report::{EvalReport, EvalSummary, ExampleResult};
use crate::scoring::score_against_references;
use crate::traits::AnswerSource;

/// Configuration for the evaluator.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Maximum concurrent examples.
    pub parallelism: usize,
    /// Dataset label recorded in the report.
    pub dataset: Option<String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            dataset: None,
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_example_start(&self, id: &str);
    fn on_example_complete(&self, result: &ExampleResult);
    fn on_example_error(&self, id: &str, error: &str);
    fn on_run_complete(&self, total: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_example_start(&self, _: &str) {}
    fn on_example_complete(&self, _: &ExampleResult) {}
    fn on_example_error(&self, _: &str, _: &str) {}
    fn on_run_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Runs an answer source over a set of examples.
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Answer and score every example.
    ///
    /// A failing answer counts as the empty answer and is recorded in the
    /// example's `error`. Results keep the order of `examples`.
    pub async fn run(
        &self,
        examples: &[QaExample],
        source: Arc<dyn AnswerSource>,
        progress: &dyn ProgressReporter,
    ) -> Result<EvalReport> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));

        let mut futures = FuturesUnordered::new();

        for (index, example) in examples.iter().enumerate() {
            let source = Arc::clone(&source);
            let semaphore = Arc::clone(&semaphore);

            futures.push(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| anyhow::anyhow!("semaphore closed"))?;

                progress.on_example_start(&example.id);
                let answer_start = Instant::now();
                let outcome = source.answer(&example.context, &example.question).await;
                let latency_ms = answer_start.elapsed().as_millis() as u64;

                let (prediction, error) = match outcome {
                    Ok(answer) => (answer, None),
                    Err(e) => {
                        tracing::error!("answer failed for {}: {e:#}", example.id);
                        progress.on_example_error(&example.id, &format!("{e:#}"));
                        (String::new(), Some(format!("{e:#}")))
                    }
                };

                let references: Vec<String> =
                    example.answers.iter().map(|a| a.text.clone()).collect();
                let score = score_against_references(&prediction, &references);

                let result = ExampleResult {
                    id: example.id.clone(),
                    question: example.question.clone(),
                    prediction,
                    references,
                    score,
                    latency_ms,
                    error,
                };
                progress.on_example_complete(&result);
                anyhow::Ok((index, result))
            });
        }

        let mut indexed = Vec::with_capacity(examples.len());
        while let Some(outcome) = futures.next().await {
            indexed.push(outcome?);
        }
        indexed.sort_by_key(|(index, _)| *index);
        let results: Vec<ExampleResult> = indexed.into_iter().map(|(_, r)| r).collect();

        let summary = EvalSummary::from_results(&results);
        let elapsed = start.elapsed();
        progress.on_run_complete(results.len(), summary.failed, elapsed);

        Ok(EvalReport {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            source: source.name().to_string(),
            dataset: self.config.dataset.clone(),
            results,
            summary,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceAnswer;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn example(id: &str, question: &str, answers: &[&str]) -> QaExample {
        QaExample {
            id: id.into(),
            title: "teste".into(),
            context: "Rio de Janeiro é uma cidade.".into(),
            question: question.into(),
            answers: answers
                .iter()
                .map(|a| ReferenceAnswer {
                    answer_start: 0,
                    text: a.to_string(),
                })
                .collect(),
        }
    }

    /// Echoes the question back, fails on questions starting with "erro",
    /// and tracks peak concurrency.
    struct EchoSource {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl EchoSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                active: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AnswerSource for EchoSource {
        fn name(&self) -> &str {
            "echo"
        }

        async fn answer(&self, _context: &str, question: &str) -> Result<String> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            if question.starts_with("erro") {
                anyhow::bail!("source unavailable");
            }
            Ok(question.to_string())
        }
    }

    #[derive(Default)]
    struct CountingReporter {
        completed: AtomicUsize,
        errors: AtomicUsize,
    }

    impl ProgressReporter for CountingReporter {
        fn on_example_start(&self, _: &str) {}
        fn on_example_complete(&self, _: &ExampleResult) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
        fn on_example_error(&self, _: &str, _: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
        fn on_run_complete(&self, _: usize, _: usize, _: Duration) {}
    }

    #[tokio::test]
    async fn scores_every_example_in_order() {
        let examples = vec![
            example("q1", "Rio", &["O Rio", "Rio de Janeiro"]),
            example("q2", "cidade grande", &["cidade"]),
            example("q3", "praia", &["montanha"]),
        ];
        let evaluator = Evaluator::new(EvaluatorConfig {
            parallelism: 2,
            dataset: Some("amostra".into()),
        });

        let report = evaluator
            .run(&examples, EchoSource::new(), &NoopReporter)
            .await
            .unwrap();

        let ids: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
        assert!(report.results[0].score.exact_match);
        assert_eq!(report.results[1].score.f1, 0.67);
        assert_eq!(report.results[2].score.f1, 0.0);
        assert_eq!(report.source, "echo");
        assert_eq!(report.dataset.as_deref(), Some("amostra"));
        assert_eq!(report.summary.examples, 3);
        assert!((report.summary.exact_match - 1.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn source_errors_count_as_empty_answers() {
        let examples = vec![
            example("q1", "erro aqui", &["Rio"]),
            example("q2", "sem resposta", &[]),
            example("q3", "erro sem referência", &[]),
        ];
        let reporter = CountingReporter::default();

        let report = Evaluator::new(EvaluatorConfig::default())
            .run(&examples, EchoSource::new(), &reporter)
            .await
            .unwrap();

        assert_eq!(report.summary.failed, 2);
        assert_eq!(reporter.errors.load(Ordering::SeqCst), 2);
        assert_eq!(reporter.completed.load(Ordering::SeqCst), 3);

        let failed = &report.results[0];
        assert_eq!(failed.prediction, "");
        assert!(failed.error.as_deref().unwrap().contains("source unavailable"));
        assert_eq!(failed.score.f1, 0.0);

        // No references: only the empty answer scores.
        assert_eq!(report.results[1].score.f1, 0.0);
        assert_eq!(report.results[2].score.f1, 1.0);
    }

    #[tokio::test]
    async fn parallelism_is_bounded() {
        let examples: Vec<QaExample> = (0..12)
            .map(|i| example(&format!("q{i}"), "Rio", &["Rio"]))
            .collect();
        let source = EchoSource::new();

        Evaluator::new(EvaluatorConfig {
            parallelism: 3,
            dataset: None,
        })
        .run(&examples, source.clone(), &NoopReporter)
        .await
        .unwrap();

        assert!(source.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn empty_dataset() {
        let report = Evaluator::new(EvaluatorConfig::default())
            .run(&[], EchoSource::new(), &NoopReporter)
            .await
            .unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.summary, EvalSummary::default());
    }
}
