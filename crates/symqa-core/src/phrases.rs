//! Sentence and phrase extraction over constituency trees.

use crate::model::{PhraseBundle, SentenceMap};
use crate::tree::Tree;

/// Label of clause/sentence nodes.
pub const SENTENCE_LABEL: &str = "S";

/// Collect the sentence subtrees of a list of parse trees.
///
/// A subtree labeled `S` qualifies when at least one of its direct children
/// is a subtree labeled something other than `S`. Each qualifying node is
/// recorded once, in pre-order across the input trees. De-duplication is by
/// value: a sentence repeated verbatim in the passage, with the same parse,
/// is kept only at its first position.
pub fn extract_sentences(trees: &[Tree]) -> Vec<&Tree> {
    let mut sentences: Vec<&Tree> = Vec::new();

    for tree in trees {
        for subtree in tree.subtrees() {
            if subtree.label() != SENTENCE_LABEL {
                continue;
            }
            for child in subtree.child_trees() {
                if child.label() != SENTENCE_LABEL
                    && !sentences.contains(&subtree)
                {
                    sentences.push(subtree);
                }
            }
        }
    }

    sentences
}

/// Build the phrase bundle of one sentence subtree.
///
/// `S` gets the whole span; `NP`, `PP` and `VP` get the direct children of
/// every clause node inside the sentence, the sentence itself included.
pub fn extract_phrases(sentence: &Tree) -> PhraseBundle {
    let mut bundle = PhraseBundle::new(sentence.text());

    for clause in sentence.subtrees() {
        if clause.label() != SENTENCE_LABEL {
            continue;
        }
        for child in clause.child_trees() {
            bundle.push_phrase(child.label(), child.text());
        }
    }

    bundle
}

/// Index the phrase bundles of every sentence found in `trees`.
pub fn build_sentence_map(trees: &[Tree]) -> SentenceMap {
    extract_sentences(trees)
        .into_iter()
        .enumerate()
        .map(|(index, sentence)| (index, extract_phrases(sentence)))
        .collect()
}
