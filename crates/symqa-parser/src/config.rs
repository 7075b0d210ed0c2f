//! symqa configuration and parser factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use symqa_core::model::TieBreak;
use symqa_core::traits::ConstituencyParser;

use crate::command::CommandParser;

const PARSER_CLASS: &str = "edu.stanford.nlp.parser.lexparser.LexicalizedParser";
const UNKNOWN_WORD_MODEL: &str = "edu.stanford.nlp.parser.lexparser.BaseUnknownWordModel";

/// Configuration of the external constituency parser.
///
/// By default this describes the Stanford LexicalizedParser with the
/// CINTIL Portuguese grammar. Setting `args` replaces the generated Java
/// command line entirely; the input file path is always appended last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Display name used in logs.
    #[serde(default)]
    pub name: Option<String>,
    /// Executable to run.
    #[serde(default = "default_program")]
    pub program: String,
    /// JVM maximum heap (`-Xmx`).
    #[serde(default = "default_max_heap")]
    pub max_heap: String,
    /// Parser jar.
    #[serde(default = "default_classpath")]
    pub classpath: String,
    /// Serialized grammar.
    #[serde(default = "default_grammar")]
    pub grammar: String,
    /// Explicit argument list, replacing the Stanford command line.
    #[serde(default)]
    pub args: Option<Vec<String>>,
    /// Seconds allowed per parser run.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_program() -> String {
    "java".to_string()
}
fn default_max_heap() -> String {
    "500m".to_string()
}
fn default_classpath() -> String {
    "stanford-parser-2010-11-30/stanford-parser.jar".to_string()
}
fn default_grammar() -> String {
    "cintil.ser/cintil.ser".to_string()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            name: None,
            program: default_program(),
            max_heap: default_max_heap(),
            classpath: default_classpath(),
            grammar: default_grammar(),
            args: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ParserConfig {
    /// Name used in logs and errors.
    pub fn name(&self) -> String {
        match (&self.name, &self.args) {
            (Some(name), _) => name.clone(),
            (None, Some(_)) => self.program.clone(),
            (None, None) => "stanford-cintil".to_string(),
        }
    }

    /// Arguments placed before the input file path.
    pub fn command_args(&self) -> Vec<String> {
        if let Some(args) = &self.args {
            return args.clone();
        }
        vec![
            format!("-Xmx{}", self.max_heap),
            "-cp".into(),
            self.classpath.clone(),
            PARSER_CLASS.into(),
            "-tokenized".into(),
            "-sentences".into(),
            "newline".into(),
            "-outputFormat".into(),
            "oneline".into(),
            "-uwModel".into(),
            UNKNOWN_WORD_MODEL.into(),
            self.grammar.clone(),
        ]
    }
}

/// Top-level symqa configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymqaConfig {
    /// Persisted parse cache file.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    /// Max concurrent examples during evaluation.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Sentence selection tie-break.
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Output directory for evaluation reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// External parser.
    #[serde(default)]
    pub parser: ParserConfig,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("data/preprocess_context.json")
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./symqa-results")
}

impl Default for SymqaConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            parallelism: default_parallelism(),
            tie_break: TieBreak::default(),
            output_dir: default_output_dir(),
            parser: ParserConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in every path-like field.
fn resolve_config(config: &mut SymqaConfig) {
    config.cache_path = PathBuf::from(resolve_env_vars(&config.cache_path.to_string_lossy()));
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    let parser = &mut config.parser;
    parser.program = resolve_env_vars(&parser.program);
    parser.classpath = resolve_env_vars(&parser.classpath);
    parser.grammar = resolve_env_vars(&parser.grammar);
    if let Some(args) = parser.args.as_mut() {
        for arg in args.iter_mut() {
            *arg = resolve_env_vars(arg);
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `symqa.toml` in the current directory
/// 2. `~/.config/symqa/config.toml`
///
/// Environment variable overrides: `SYMQA_PARSER_JAR`, `SYMQA_GRAMMAR`,
/// `SYMQA_CACHE_PATH`.
pub fn load_config() -> Result<SymqaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SymqaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("symqa.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SymqaConfig::default(),
    };

    // Apply env var overrides
    if let Ok(jar) = std::env::var("SYMQA_PARSER_JAR") {
        config.parser.classpath = jar;
    }
    if let Ok(grammar) = std::env::var("SYMQA_GRAMMAR") {
        config.parser.grammar = grammar;
    }
    if let Ok(cache) = std::env::var("SYMQA_CACHE_PATH") {
        config.cache_path = PathBuf::from(cache);
    }

    resolve_config(&mut config);
    Ok(config)
}

/// Parse a TOML config string (without env overrides).
pub fn parse_config_str(content: &str) -> Result<SymqaConfig> {
    toml::from_str::<SymqaConfig>(content).context("invalid symqa config")
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("symqa"))
}

/// Create the parser described by the configuration.
pub fn create_parser(config: &ParserConfig) -> Arc<dyn ConstituencyParser> {
    Arc::new(CommandParser::from_config(config))
}
