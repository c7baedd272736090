use std::collections::HashMap;

use rand::Rng;

use crate::error::{GenerateError, MimicError, Result};
use super::bucket::Bucket;
use super::config::EngineConfig;
use super::prefix::Prefix;

/// Bucket name shared by every author.
pub const POOLED_AUTHOR: &str = "";

/// Runaway guard: an attempt growing past this many words is rejected.
pub const MAX_SENTENCE_WORDS: usize = 1000;

/// Size of a trained chain, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChainStats {
	/// Named authors (the pooled bucket is not counted).
	pub authors: usize,
	/// Distinct prefix keys over all buckets.
	pub prefixes: usize,
	/// Stored candidates over all buckets, duplicates included.
	pub transitions: usize,
}

/// Word-level Markov chain with one bucket per author.
///
/// The chain is built in two phases: every text is ingested first, then
/// sentences are generated from the read-only table. Generation takes
/// `&self` and keeps its prefix and output buffers local, so a trained chain
/// can be shared between threads.
///
/// # Responsibilities
/// - Learn word transitions per author, mirrored into the pooled bucket
/// - Generate sentences by walking the chain from the start state
/// - Reject runaway sentences and sentences lacking vocabulary words
///
/// # Invariants
/// - Every candidate stored under a key was observed right after that key
///   for that author
/// - Buckets only grow
#[derive(Clone, Debug)]
pub struct MarkovChain {
	config: EngineConfig,

	/// Author name to its transition table. `POOLED_AUTHOR` holds everybody.
	buckets: HashMap<String, Bucket>,
}

impl MarkovChain {
	/// Creates an untrained chain.
	pub fn new(config: EngineConfig) -> Self {
		Self {
			config,
			buckets: HashMap::new(),
		}
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Learns the word transitions of `text` for `author`.
	///
	/// The text is split on ASCII whitespace and tokens are stored verbatim.
	/// When `author` is not the pooled author, every transition is also
	/// recorded in the pooled bucket.
	///
	/// # Notes
	/// - Buckets are created lazily, so empty text leaves an author unknown.
	/// - Every text starts again from the start state.
	pub fn ingest(&mut self, author: &str, text: &str) {
		let mut prefix = Prefix::new(self.config.order());

		for word in text.split_ascii_whitespace() {
			let key = prefix.key();

			self.buckets
				.entry(author.to_owned())
				.or_default()
				.add_transition(&key, word);

			if author != POOLED_AUTHOR {
				self.buckets
					.entry(POOLED_AUTHOR.to_owned())
					.or_default()
					.add_transition(&key, word);
			}

			prefix.shift(word);
		}
	}

	/// Generates a sentence for `author` using the thread-local random generator.
	///
	/// See [`generate_with`](Self::generate_with).
	pub fn generate(&self, author: &str) -> std::result::Result<String, GenerateError> {
		self.generate_with(author, &mut rand::rng())
	}

	/// Generates a sentence for `author`, drawing words from `rng`.
	///
	/// Attempts are repeated until one is accepted. An attempt ends when the
	/// last word ends with a period, when the current prefix has no
	/// continuation, or (rejected) when it grows past [`MAX_SENTENCE_WORDS`].
	/// It is also rejected when it holds fewer vocabulary words than
	/// configured.
	///
	/// # Errors
	/// - `UnknownAuthor` if nothing was ever ingested for `author`
	/// - `Unsatisfiable` if `max_attempts` is configured and exhausted;
	///   without a cap an unsatisfiable threshold never returns
	pub fn generate_with<R: Rng + ?Sized>(
		&self,
		author: &str,
		rng: &mut R,
	) -> std::result::Result<String, GenerateError> {
		let bucket = self
			.buckets
			.get(author)
			.ok_or_else(|| GenerateError::UnknownAuthor(author.to_owned()))?;

		let mut attempts = 0;
		loop {
			attempts += 1;

			if let Some(sentence) = self.attempt(bucket, rng) {
				return Ok(sentence.join(" "));
			}
			log::trace!("rejected attempt {attempts} for '{author}'");

			if let Some(max_attempts) = self.config.max_attempts()
				&& attempts >= max_attempts
			{
				return Err(GenerateError::Unsatisfiable {
					author: author.to_owned(),
					attempts,
				});
			}
		}
	}

	/// Walks the chain once from the start state.
	///
	/// Returns `None` when the attempt is rejected.
	fn attempt<'a, R: Rng + ?Sized>(&self, bucket: &'a Bucket, rng: &mut R) -> Option<Vec<&'a str>> {
		let mut prefix = Prefix::new(self.config.order());
		let mut sentence = Vec::new();

		while let Some(word) = bucket.pick(&prefix.key(), rng) {
			sentence.push(word);

			if word.ends_with('.') {
				break;
			}

			prefix.shift(word);

			if sentence.len() > MAX_SENTENCE_WORDS {
				return None;
			}
		}

		let matches = self.config.vocabulary().count_matches(sentence.iter().copied());
		if matches < self.config.min_matches() {
			return None;
		}

		Some(sentence)
	}

	/// Returns `true` if at least one transition was ingested for `author`.
	pub fn has_author(&self, author: &str) -> bool {
		self.buckets.contains_key(author)
	}

	/// Named authors, sorted. The pooled author is not listed.
	pub fn authors(&self) -> Vec<&str> {
		let mut authors: Vec<&str> = self
			.buckets
			.keys()
			.map(String::as_str)
			.filter(|author| *author != POOLED_AUTHOR)
			.collect();
		authors.sort_unstable();
		authors
	}

	/// The transition table of `author`, if any.
	pub fn bucket(&self, author: &str) -> Option<&Bucket> {
		self.buckets.get(author)
	}

	pub fn stats(&self) -> ChainStats {
		ChainStats {
			authors: self.authors().len(),
			prefixes: self.buckets.values().map(Bucket::len).sum(),
			transitions: self.buckets.values().map(Bucket::transitions).sum(),
		}
	}

	/// Merges another chain into this one.
	///
	/// Candidates of `other` are appended after this chain's own, so merging
	/// partial chains in ingestion order reproduces sequential training.
	///
	/// # Errors
	/// Returns an error if the chain orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.config.order() != other.config.order() {
			return Err(MimicError::OrderMismatch {
				expected: self.config.order(),
				found: other.config.order(),
			});
		}

		for (author, bucket) in &other.buckets {
			if let Some(existing) = self.buckets.get_mut(author) {
				existing.merge(bucket);
			} else {
				self.buckets.insert(author.clone(), bucket.clone());
			}
		}

		Ok(())
	}
}
