//! End-to-end engine tests over real parser adapters.
//!
//! These tests wire the symbolic engine to the mock parser and to a shell
//! command standing in for the Java parser, with both cache stores.

use std::sync::Arc;

use symqa_core::cache::{JsonFileStore, MemoryStore};
use symqa_core::engine::{SymbolicEngine, SymbolicEngineConfig};
use symqa_core::model::TieBreak;
use symqa_core::traits::ConstituencyParser;
use symqa_parser::config::parse_config_str;
use symqa_parser::{create_parser, CommandParser, MockParser};

const PASSAGE: &str = "Rio de Janeiro é uma cidade. É famosa por suas praias.";
const QUESTION: &str = "Qual cidade é famosa por praias?";

/// Wraps each input line into a flat clause, like a one-level parser.
fn sed_parser() -> CommandParser {
    CommandParser::new(
        "sh",
        vec![
            "-c".into(),
            r#"sed -e "s/^/(ROOT (S (NP /" -e "s/$/)))/" "$0""#.into(),
        ],
    )
}

fn engine_with(parser: Arc<dyn ConstituencyParser>) -> SymbolicEngine {
    SymbolicEngine::new(
        parser,
        Arc::new(MemoryStore::new()),
        SymbolicEngineConfig::default(),
    )
}

#[tokio::test]
async fn mock_parser_answers_from_best_sentence() {
    let parser = Arc::new(MockParser::flat());
    let engine = engine_with(parser.clone());

    assert_eq!(
        engine.answer(PASSAGE, QUESTION).await,
        "É famosa por suas praias."
    );
    assert_eq!(
        parser.last_sentences().unwrap(),
        vec!["Rio de Janeiro é uma cidade.", "É famosa por suas praias."]
    );
}

#[tokio::test]
async fn command_parser_answers_from_best_sentence() {
    let engine = engine_with(Arc::new(sed_parser()));
    assert_eq!(
        engine.answer(PASSAGE, QUESTION).await,
        "É famosa por suas praias."
    );
}

#[tokio::test]
async fn failing_command_yields_empty_answer() {
    let engine = engine_with(Arc::new(CommandParser::new("false", vec![])));
    assert_eq!(engine.answer(PASSAGE, QUESTION).await, "");
}

#[tokio::test]
async fn missing_java_yields_empty_answer() {
    let config = parse_config_str(
        r#"
[parser]
program = "symqa-missing-java"
"#,
    )
    .unwrap();
    let engine = engine_with(create_parser(&config.parser));
    assert_eq!(engine.answer(PASSAGE, QUESTION).await, "");
}

#[tokio::test]
async fn persisted_cache_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("data").join("preprocess_context.json");

    let first_parser = Arc::new(MockParser::flat());
    let first = SymbolicEngine::new(
        first_parser.clone(),
        Arc::new(JsonFileStore::new(&cache_path)),
        SymbolicEngineConfig::default(),
    );
    let answer = first.answer(PASSAGE, QUESTION).await;
    assert_eq!(first_parser.call_count(), 1);
    assert!(cache_path.exists());

    // A new engine over the same file never calls its (failing) parser.
    let second_parser = Arc::new(MockParser::failing("should not run"));
    let second = SymbolicEngine::new(
        second_parser.clone(),
        Arc::new(JsonFileStore::new(&cache_path)),
        SymbolicEngineConfig::default(),
    );
    assert_eq!(second.answer(PASSAGE, QUESTION).await, answer);
    assert_eq!(second_parser.call_count(), 0);
}

#[tokio::test]
async fn malformed_tree_drops_only_its_sentence() {
    let parser = Arc::new(MockParser::with_fixed_trees(&[
        "(ROOT (S (NP Rio) (VP é uma cidade)))",
        "(ROOT (S (NP É famosa",
    ]));
    let engine = engine_with(parser);
    assert_eq!(engine.answer(PASSAGE, QUESTION).await, "Rio é uma cidade");
}

#[tokio::test]
async fn tie_break_policies_differ_on_equal_overlap() {
    let passage = "A praia é bonita. Outra praia existe.";
    let question = "Qual praia?";

    let last = engine_with(Arc::new(MockParser::flat()));
    assert_eq!(last.answer(passage, question).await, "Outra praia existe.");

    let first = SymbolicEngine::new(
        Arc::new(MockParser::flat()),
        Arc::new(MemoryStore::new()),
        SymbolicEngineConfig {
            tie_break: TieBreak::FirstWins,
        },
    );
    assert_eq!(first.answer(passage, question).await, "A praia é bonita.");
}
