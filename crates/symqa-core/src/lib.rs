//! symqa-core: Symbolic answer extraction, parse caching, and scoring.
//!
//! This crate defines the data model, the ports to external collaborators
//! (constituency parser, parse store, answer sources), the syntactic
//! pipeline, and the exact-match / F1 scoring the rest of symqa builds on.

pub mod cache;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod phrases;
pub mod pipeline;
pub mod predictions;
pub mod report;
pub mod scoring;
pub mod splitter;
pub mod text;
pub mod traits;
pub mod tree;
