//! symqa CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use symqa_core::model::TieBreak;

mod commands;

#[derive(Parser)]
#[command(
    name = "symqa",
    version,
    about = "Symbolic question answering over Portuguese passages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question from a passage
    Answer {
        /// The question
        #[arg(long)]
        question: String,

        /// Passage text
        #[arg(long, conflicts_with = "passage_file", required_unless_present = "passage_file")]
        passage: Option<String>,

        /// File containing the passage
        #[arg(long)]
        passage_file: Option<PathBuf>,

        /// Tie-break between equally relevant sentences: last_wins, first_wins
        #[arg(long)]
        tie_break: Option<TieBreak>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a candidate answer against reference answers
    Score {
        /// Candidate answer
        #[arg(long)]
        prediction: String,

        /// Reference answer (repeatable)
        #[arg(long = "reference")]
        references: Vec<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Evaluate an answer source over a SQuAD-format dataset
    Eval {
        /// Dataset JSON (SQuAD / FaQuAD format)
        #[arg(long)]
        dataset: PathBuf,

        /// Precomputed answers `{ "<question id>": "<answer>" }`; the
        /// symbolic engine is used when omitted
        #[arg(long)]
        predictions: Option<PathBuf>,

        /// Max concurrent examples
        #[arg(long)]
        parallelism: Option<usize>,

        /// Only evaluate the first N questions
        #[arg(long)]
        limit: Option<usize>,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Tie-break between equally relevant sentences: last_wins, first_wins
        #[arg(long)]
        tie_break: Option<TieBreak>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two evaluation reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Regression threshold in F1 points
        #[arg(long, default_value = "0.05")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check a dataset for duplicate IDs, empty questions and missing answers
    Validate {
        /// Dataset JSON
        #[arg(long)]
        dataset: PathBuf,
    },

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symqa=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Answer {
            question,
            passage,
            passage_file,
            tie_break,
            config,
        } => commands::answer::execute(question, passage, passage_file, tie_break, config).await,
        Commands::Score {
            prediction,
            references,
            format,
        } => commands::score::execute(prediction, references, format),
        Commands::Eval {
            dataset,
            predictions,
            parallelism,
            limit,
            output,
            tie_break,
            config,
        } => {
            commands::eval::execute(commands::eval::EvalArgs {
                dataset,
                predictions,
                parallelism,
                limit,
                output,
                tie_break,
                config,
            })
            .await
        }
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { dataset } => commands::validate::execute(dataset),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
