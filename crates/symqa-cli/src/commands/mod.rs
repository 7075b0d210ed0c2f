pub mod answer;
pub mod compare;
pub mod eval;
pub mod init;
pub mod score;
pub mod validate;

use std::sync::Arc;

use symqa_core::cache::JsonFileStore;
use symqa_core::engine::{SymbolicEngine, SymbolicEngineConfig};
use symqa_core::model::TieBreak;
use symqa_parser::{create_parser, SymqaConfig};

/// Build the symbolic engine described by the configuration.
pub fn build_engine(config: &SymqaConfig, tie_break: Option<TieBreak>) -> SymbolicEngine {
    let parser = create_parser(&config.parser);
    let store = Arc::new(JsonFileStore::new(&config.cache_path));
    tracing::debug!(
        parser = parser.name(),
        cache = %config.cache_path.display(),
        "building symbolic engine"
    );
    SymbolicEngine::new(
        parser,
        store,
        SymbolicEngineConfig {
            tie_break: tie_break.unwrap_or(config.tie_break),
        },
    )
}
