//! Per-author Markov chain text generation.
//!
//! This crate provides everything needed to imitate the way people write
//! in an issue tracker:
//! - A word-level, order-N Markov chain with one bucket per author
//!   (plus a pooled bucket covering everybody)
//! - Rejection sampling against a filtered vocabulary
//! - A text normalizer for the markup found in tracker descriptions
//! - Access to the tracker corpus (remote search, local snapshot cache)
//!
//! The binaries (`mimic`, `mimic-server`) are thin layers over
//! [`model::MarkovChain::ingest`] and [`model::MarkovChain::generate`].

/// Markov chain, configuration and vocabulary.
pub mod model;

/// Markup stripping and whitespace normalization.
pub mod text;

/// Issue tracker corpus: data model, fetching, caching and training.
pub mod corpus;

/// Command-line option groups shared by the binaries.
pub mod options;

/// Error types.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{GenerateError, MimicError, Result};
