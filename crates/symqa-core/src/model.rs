//! Core data model types for symqa.
//!
//! These are the types shared by the pipeline, the parse cache, the answer
//! engine, and the evaluation layer.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Position of an extracted sentence within its passage (0-based, insertion order).
pub type SentenceIndex = usize;

/// Extracted sentences of one passage, keyed by their position.
pub type SentenceMap = BTreeMap<SentenceIndex, PhraseBundle>;

/// Phrases extracted from one sentence subtree.
///
/// `S` always holds exactly one entry when built by the pipeline: the full
/// sentence span. The other lists are filled from the direct children of
/// every clause node inside the sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseBundle {
    /// The sentence span.
    #[serde(rename = "S")]
    pub sentence: Vec<String>,
    /// Noun phrases.
    #[serde(rename = "NP", default)]
    pub noun_phrases: Vec<String>,
    /// Prepositional phrases.
    #[serde(rename = "PP", default)]
    pub prepositional_phrases: Vec<String>,
    /// Verb phrases.
    #[serde(rename = "VP", default)]
    pub verb_phrases: Vec<String>,
}

impl PhraseBundle {
    /// Create a bundle seeded with its sentence span.
    pub fn new(sentence: impl Into<String>) -> Self {
        Self {
            sentence: vec![sentence.into()],
            ..Default::default()
        }
    }

    /// The sentence text, if the bundle holds exactly one sentence span.
    pub fn sentence_text(&self) -> Option<&str> {
        match self.sentence.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    /// Append a phrase under its constituent label.
    ///
    /// Returns `false` (and stores nothing) for labels other than
    /// `NP`, `PP` and `VP`.
    pub fn push_phrase(&mut self, label: &str, phrase: String) -> bool {
        let list = match label {
            "NP" => &mut self.noun_phrases,
            "PP" => &mut self.prepositional_phrases,
            "VP" => &mut self.verb_phrases,
            _ => return false,
        };
        list.push(phrase);
        true
    }
}

/// Exact-match and F1 for one (candidate, reference) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    /// Whether the normalized strings are identical.
    pub exact_match: bool,
    /// Token-set F1 in `[0, 1]`, rounded to two decimals.
    pub f1: f64,
}

/// A reference answer as stored in a SQuAD-format dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAnswer {
    /// Character offset of the answer within the context.
    #[serde(default)]
    pub answer_start: usize,
    /// Answer text.
    pub text: String,
}

/// One question over one passage, with its reference answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaExample {
    /// Question identifier.
    pub id: String,
    /// Title of the article the passage belongs to.
    #[serde(default)]
    pub title: String,
    /// The passage.
    pub context: String,
    /// The question.
    pub question: String,
    /// Reference answers.
    #[serde(default)]
    pub answers: Vec<ReferenceAnswer>,
}

impl QaExample {
    /// Reference answer texts, in dataset order.
    pub fn reference_texts(&self) -> Vec<&str> {
        self.answers.iter().map(|a| a.text.as_str()).collect()
    }
}

/// How the answer engine resolves equal overlap counts between sentences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// A later sentence with an equal count replaces the current best.
    #[default]
    LastWins,
    /// The earliest sentence with the highest count is kept.
    FirstWins,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::LastWins => write!(f, "last_wins"),
            TieBreak::FirstWins => write!(f, "first_wins"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "last_wins" | "last" => Ok(TieBreak::LastWins),
            "first_wins" | "first" => Ok(TieBreak::FirstWins),
            other => Err(format!("unknown tie-break policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_display_and_parse() {
        assert_eq!(TieBreak::LastWins.to_string(), "last_wins");
        assert_eq!("first".parse::<TieBreak>().unwrap(), TieBreak::FirstWins);
        assert_eq!(
            "Last-Wins".parse::<TieBreak>().unwrap(),
            TieBreak::LastWins
        );
        assert!("random".parse::<TieBreak>().is_err());
        assert_eq!(TieBreak::default(), TieBreak::LastWins);
    }

    #[test]
    fn phrase_bundle_uses_constituent_keys() {
        let mut bundle = PhraseBundle::new("O gato dorme");
        assert!(bundle.push_phrase("NP", "O gato".into()));
        assert!(bundle.push_phrase("VP", "dorme".into()));
        assert!(!bundle.push_phrase("ADV", "hoje".into()));

        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["S"][0], "O gato dorme");
        assert_eq!(json["NP"][0], "O gato");
        assert_eq!(json["VP"][0], "dorme");
        assert!(json["PP"].as_array().unwrap().is_empty());
    }

    #[test]
    fn sentence_text_requires_single_span() {
        let bundle = PhraseBundle::new("Uma frase.");
        assert_eq!(bundle.sentence_text(), Some("Uma frase."));

        let empty = PhraseBundle::default();
        assert_eq!(empty.sentence_text(), None);

        let doubled = PhraseBundle {
            sentence: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert_eq!(doubled.sentence_text(), None);
    }

    #[test]
    fn sentence_map_roundtrips_through_json() {
        let mut map = SentenceMap::new();
        map.insert(0, PhraseBundle::new("Primeira."));
        map.insert(1, PhraseBundle::new("Segunda."));

        let json = serde_json::to_string(&map).unwrap();
        let back: SentenceMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
