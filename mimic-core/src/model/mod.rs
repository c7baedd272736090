//! Top-level module for the Markov chain generator.
//!
//! This module provides a word-level, per-author Markov chain, including:
//! - The chain itself with training and generation (`MarkovChain`)
//! - Immutable engine settings (`EngineConfig`)
//! - The filtered vocabulary used to accept or reject sentences (`Vocabulary`)
//! - Internal prefix window and per-author tables (`Prefix`, `Bucket`)

/// Word-level Markov chain holding one bucket per author.
///
/// Handles ingestion (with the pooled bucket dual write), rejection-sampled
/// generation, statistics and merging of partial chains.
pub mod chain;

/// Engine configuration: order, vocabulary, acceptance threshold and retry cap.
pub mod config;

/// Case-insensitive set of filtered vocabulary words.
pub mod vocabulary;

/// Per-author table from prefix key to candidate next words.
pub mod bucket;

/// Fixed-size sliding window over the last N emitted words.
pub mod prefix;

pub use bucket::Bucket;
pub use chain::{ChainStats, MarkovChain, MAX_SENTENCE_WORDS, POOLED_AUTHOR};
pub use config::EngineConfig;
pub use prefix::Prefix;
pub use vocabulary::Vocabulary;
