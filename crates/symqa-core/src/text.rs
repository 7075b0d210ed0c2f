//! Text normalization and lexical preprocessing.
//!
//! Two different canonical forms live here:
//!
//! - [`normalize`] prepares answers for exact-match / F1 scoring.
//! - [`LexicalPreprocessor`] turns questions and sentences into stemmed,
//!   stopword-free token sequences for relevance scoring in the answer
//!   engine. It is stricter than `normalize` and never used for scoring.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

fn articles() -> &'static Regex {
    static ARTICLES: OnceLock<Regex> = OnceLock::new();
    ARTICLES.get_or_init(|| Regex::new(r"\b(um|uma|o)\b").expect("article pattern is valid"))
}

/// Canonicalize a string for answer comparison.
///
/// Lowercases, drops ASCII punctuation, removes the articles "um", "uma"
/// and "o" as whole words, then collapses whitespace.
pub fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase();
    let without_punctuation: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    let without_articles = articles().replace_all(&without_punctuation, " ");
    without_articles
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Portuguese stopwords (NLTK list).
const PORTUGUESE_STOPWORDS: &[&str] = &[
    "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às",
    "até", "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois", "do",
    "dos", "e", "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram", "éramos",
    "essa", "essas", "esse", "esses", "esta", "está", "estamos", "estão", "estar", "estas",
    "estava", "estavam", "estávamos", "este", "esteja", "estejam", "estejamos", "estes",
    "esteve", "estive", "estivemos", "estiver", "estivera", "estiveram", "estivéramos",
    "estiverem", "estivermos", "estivesse", "estivessem", "estivéssemos", "estou", "eu",
    "foi", "fomos", "for", "fora", "foram", "fôramos", "forem", "formos", "fosse", "fossem",
    "fôssemos", "fui", "há", "haja", "hajam", "hajamos", "hão", "havemos", "haver", "hei",
    "houve", "houvemos", "houver", "houvera", "houverá", "houveram", "houvéramos",
    "houverão", "houverei", "houverem", "houveremos", "houveria", "houveriam",
    "houveríamos", "houvermos", "houvesse", "houvessem", "houvéssemos", "isso", "isto",
    "já", "lhe", "lhes", "mais", "mas", "me", "mesmo", "meu", "meus", "minha", "minhas",
    "muito", "na", "não", "nas", "nem", "no", "nos", "nós", "nossa", "nossas", "nosso",
    "nossos", "num", "numa", "o", "os", "ou", "para", "pela", "pelas", "pelo", "pelos",
    "por", "qual", "quando", "que", "quem", "são", "se", "seja", "sejam", "sejamos", "sem",
    "ser", "será", "serão", "serei", "seremos", "seria", "seriam", "seríamos", "seu", "seus",
    "só", "somos", "sou", "sua", "suas", "também", "te", "tem", "tém", "temos", "tenha",
    "tenham", "tenhamos", "tenho", "terá", "terão", "terei", "teremos", "teria", "teriam",
    "teríamos", "teu", "teus", "teve", "tinha", "tinham", "tínhamos", "tive", "tivemos",
    "tiver", "tivera", "tiveram", "tivéramos", "tiverem", "tivermos", "tivesse", "tivessem",
    "tivéssemos", "tu", "tua", "tuas", "um", "uma", "você", "vocês", "vos",
];

fn stopwords() -> &'static HashSet<&'static str> {
    static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOPWORDS.get_or_init(|| PORTUGUESE_STOPWORDS.iter().copied().collect())
}

/// Returns `true` if `token` (already lowercased) is a Portuguese stopword.
pub fn is_stopword(token: &str) -> bool {
    stopwords().contains(token)
}

/// Tokenizer used for question/sentence relevance matching.
///
/// Lowercases, keeps only alphanumeric characters and whitespace, splits on
/// whitespace, drops stopwords, and reduces every remaining token to its
/// Snowball stem.
pub struct LexicalPreprocessor {
    stemmer: Stemmer,
    language: &'static str,
}

impl LexicalPreprocessor {
    /// Preprocessor for Portuguese text.
    pub fn portuguese() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::Portuguese),
            language: "portuguese",
        }
    }

    /// Tokenize `text` into its matching form.
    pub fn tokenize_for_matching(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let cleaned: String = lowered
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| !is_stopword(token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect()
    }
}

impl Default for LexicalPreprocessor {
    fn default() -> Self {
        Self::portuguese()
    }
}

impl fmt::Debug for LexicalPreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalPreprocessor")
            .field("language", &self.language)
            .finish()
    }
}

/// Tokenize with the shared Portuguese preprocessor.
pub fn tokenize_for_matching(text: &str) -> Vec<String> {
    static DEFAULT: OnceLock<LexicalPreprocessor> = OnceLock::new();
    DEFAULT
        .get_or_init(LexicalPreprocessor::portuguese)
        .tokenize_for_matching(text)
}
