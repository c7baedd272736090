use crate::error::{MimicError, Result};
use super::vocabulary::Vocabulary;

/// Immutable settings of a [`MarkovChain`](super::MarkovChain).
///
/// # Responsibilities
/// - Fix the chain order (the "semantic accuracy": more context words give
///   more grammatical but less creative sentences)
/// - Hold the filtered vocabulary and how many of its words an accepted
///   sentence must contain
/// - Optionally cap rejection sampling
///
/// # Invariants
/// - `order >= 1`
#[derive(Clone, Debug)]
pub struct EngineConfig {
	/// Number of preceding words used as context.
	order: usize,

	/// Words counted against `min_matches`.
	vocabulary: Vocabulary,

	/// Minimum vocabulary hits per accepted sentence.
	min_matches: usize,

	/// Maximum attempts per generation; `None` retries forever.
	max_attempts: Option<usize>,
}

impl EngineConfig {
	/// Creates a configuration of the given order with an empty vocabulary,
	/// no acceptance threshold and unbounded retries.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		if order < 1 {
			return Err(MimicError::InvalidOrder);
		}
		Ok(Self {
			order,
			vocabulary: Vocabulary::default(),
			min_matches: 0,
			max_attempts: None,
		})
	}

	pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
		self.vocabulary = vocabulary;
		self
	}

	pub fn with_min_matches(mut self, min_matches: usize) -> Self {
		self.min_matches = min_matches;
		self
	}

	/// Caps the attempts of a single generation.
	///
	/// `Some(0)` is treated like `Some(1)`: at least one attempt always runs.
	pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
		self.max_attempts = max_attempts;
		self
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	pub fn min_matches(&self) -> usize {
		self.min_matches
	}

	pub fn max_attempts(&self) -> Option<usize> {
		self.max_attempts
	}
}
