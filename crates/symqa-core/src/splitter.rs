//! Portuguese sentence splitting for the parser input.
//!
//! Rule-based, in the style of the Moses splitter: a boundary is terminal
//! punctuation followed by whitespace and something that can start a
//! sentence (uppercase letter, digit, opening quote or dash), unless the
//! word before a full stop is a known non-breaking abbreviation.

use std::sync::OnceLock;

use regex::Regex;

/// Abbreviations that never end a sentence.
const NON_BREAKING_PREFIXES: &[&str] = &[
    "Av", "Arq", "Bel", "Cel", "Cia", "Dr", "Dra", "Drs", "Dras", "Eng", "Enga", "Exa", "Exmo",
    "Exma", "Gen", "Ilmo", "Ilma", "Jr", "Ltda", "Ma", "Me", "Min", "Mons", "Pe", "Pres",
    "Prof", "Profa", "Profs", "Rev", "Sr", "Sra", "Sras", "Srs", "Srta", "Sto", "Sta", "St",
    "Tel", "Ten", "Vol", "adj", "aprox", "art", "cap", "cf", "ex", "fig", "ib", "ibid",
    "id", "n", "nº", "núm", "obs", "op", "p", "pág", "pp", "séc", "sr", "sra", "tel", "vol",
];

/// Abbreviations that do not end a sentence when a number follows.
const NUMERIC_ONLY_PREFIXES: &[&str] = &["No", "Nos", "Art", "Nr", "N", "Nº"];

fn boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| {
        Regex::new(r#"[.!?…]+["'”»’]*\s+"#).expect("sentence boundary pattern is valid")
    })
}

/// Remove parenthesis characters, keeping their contents.
pub fn strip_parentheses(text: &str) -> String {
    text.chars().filter(|c| *c != '(' && *c != ')').collect()
}

fn can_start_sentence(ch: char) -> bool {
    ch.is_uppercase()
        || ch.is_numeric()
        || matches!(ch, '"' | '“' | '«' | '\'' | '‘' | '¿' | '¡' | '-' | '—' | '–')
}

fn word_before(text: &str, end: usize) -> &str {
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &head[start..]
}

fn is_abbreviation(text: &str, terminator: &str, boundary_start: usize, next: char) -> bool {
    if terminator != "." {
        return false;
    }
    let word = word_before(text, boundary_start);
    if word.is_empty() {
        return false;
    }
    if NON_BREAKING_PREFIXES.contains(&word) {
        return true;
    }
    if next.is_numeric() && NUMERIC_ONLY_PREFIXES.contains(&word) {
        return true;
    }
    // Single uppercase initials ("J. Silva"), and dotted acronyms ("E.U.A.").
    let mut chars = word.chars();
    let single_initial =
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase());
    single_initial || (word.contains('.') && word.chars().all(|c| c == '.' || c.is_alphabetic()))
}

/// Split `text` into sentences.
///
/// Returns the trimmed sentences in order; whitespace-only input yields none.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for found in boundary().find_iter(text) {
        let Some(next) = text[found.end()..].chars().next() else {
            continue;
        };
        if !can_start_sentence(next) {
            continue;
        }
        let matched = found.as_str();
        let terminator = matched.trim_end();
        let punctuation: String = terminator
            .chars()
            .filter(|c| matches!(c, '.' | '!' | '?' | '…'))
            .collect();
        if is_abbreviation(text, &punctuation, found.start(), next) {
            continue;
        }

        let sentence = text[start..found.start() + terminator.len()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = found.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prepare a passage for the parser: one sentence per entry.
///
/// Parentheses are removed first. When the splitter cannot split the text
/// (a single sentence equal to the whole passage), commas are used as
/// boundaries instead. Every sentence is collapsed onto one line.
pub fn prepare_sentences(passage: &str) -> Vec<String> {
    let stripped = strip_parentheses(passage);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let sentences = split_sentences(trimmed);
    let pieces = if sentences.len() == 1 && sentences[0] == trimmed {
        trimmed.split(',').map(str::to_string).collect()
    } else {
        sentences
    };

    pieces
        .iter()
        .map(|s| collapse_whitespace(s))
        .filter(|s| !s.is_empty())
        .collect()
}
