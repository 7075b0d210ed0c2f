//! Mock parser for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use symqa_core::traits::ConstituencyParser;

enum Mode {
    /// One flat clause per sentence: `(ROOT (S (NP w0) (VP w1 ...)))`.
    Flat,
    /// The same trees for every call.
    Fixed(Vec<String>),
    /// Every call fails with this message.
    Failing(String),
}

/// A mock constituency parser for testing the engine without Java.
pub struct MockParser {
    mode: Mode,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Sentences received by the last call.
    last_sentences: Mutex<Option<Vec<String>>>,
}

impl MockParser {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            call_count: AtomicU32::new(0),
            last_sentences: Mutex::new(None),
        }
    }

    /// Parse every sentence into a flat `S` clause: the first word is the
    /// noun phrase, the rest the verb phrase.
    pub fn flat() -> Self {
        Self::with_mode(Mode::Flat)
    }

    /// Create a mock that always returns the same trees.
    pub fn with_fixed_trees(trees: &[&str]) -> Self {
        Self::with_mode(Mode::Fixed(trees.iter().map(|t| t.to_string()).collect()))
    }

    /// Create a mock that always fails.
    pub fn failing(message: &str) -> Self {
        Self::with_mode(Mode::Failing(message.to_string()))
    }

    /// Get the number of calls made to this parser.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the sentences of the last call.
    pub fn last_sentences(&self) -> Option<Vec<String>> {
        self.last_sentences
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn flat_tree(sentence: &str) -> String {
    let mut words = sentence.split_whitespace();
    let Some(first) = words.next() else {
        return "(ROOT (S))".to_string();
    };
    let rest: Vec<&str> = words.collect();
    if rest.is_empty() {
        format!("(ROOT (S (NP {first})))")
    } else {
        format!("(ROOT (S (NP {first}) (VP {})))", rest.join(" "))
    }
}

#[async_trait]
impl ConstituencyParser for MockParser {
    fn name(&self) -> &str {
        "mock"
    }

    async fn parse(&self, sentences: &[String]) -> anyhow::Result<Vec<String>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_sentences
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(sentences.to_vec());

        match &self.mode {
            Mode::Flat => Ok(sentences.iter().map(|s| flat_tree(s)).collect()),
            Mode::Fixed(trees) => Ok(trees.clone()),
            Mode::Failing(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symqa_core::tree::Tree;

    #[tokio::test]
    async fn flat_trees_are_readable() {
        let parser = MockParser::flat();
        let trees = parser
            .parse(&["Ana corre no parque.".to_string(), "Chove.".to_string()])
            .await
            .unwrap();

        assert_eq!(trees[0], "(ROOT (S (NP Ana) (VP corre no parque.)))");
        assert_eq!(trees[1], "(ROOT (S (NP Chove.)))");
        for tree in &trees {
            Tree::parse(tree).unwrap();
        }
        assert_eq!(parser.call_count(), 1);
        assert_eq!(parser.last_sentences().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn fixed_and_failing_modes() {
        let fixed = MockParser::with_fixed_trees(&["(ROOT (S (NP x)))"]);
        assert_eq!(
            fixed.parse(&["qualquer".to_string()]).await.unwrap(),
            vec!["(ROOT (S (NP x)))"]
        );

        let failing = MockParser::failing("grammar not found");
        let err = failing.parse(&["a".to_string()]).await.unwrap_err();
        assert_eq!(err.to_string(), "grammar not found");
        assert_eq!(failing.call_count(), 1);
    }
}
