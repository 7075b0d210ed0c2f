//! symqa-parser: External constituency parser integration.
//!
//! Implements the `ConstituencyParser` trait by running a parser process
//! (the Stanford LexicalizedParser with the CINTIL grammar by default), and
//! loads the symqa configuration that describes it.

pub mod command;
pub mod config;
pub mod error;
pub mod mock;
pub mod workdir;

pub use command::CommandParser;
pub use config::{create_parser, load_config, load_config_from, ParserConfig, SymqaConfig};
pub use error::ParserError;
pub use mock::MockParser;
