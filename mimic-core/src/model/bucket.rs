use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;

/// Transition table of a single author (or of the pooled author).
///
/// Conceptually, each prefix key is a node of a Markov chain and its
/// candidate list holds every word observed right after it. Duplicates are
/// kept, so a word seen K times out of T is picked with probability K/T.
///
/// ## Responsibilities:
/// - Accumulate observed transitions during training
/// - Pick a next word uniformly over the stored occurrences
/// - Merge with another bucket (parallel training support)
///
/// ## Invariants
/// - Candidate lists are never empty
/// - Candidates keep their ingestion order
#[derive(Clone, Debug, Default)]
pub struct Bucket {
	/// Prefix key to observed next words.
	/// Example: { "" => ["hi", "the"], "hi" => ["there"] }
	transitions: HashMap<String, Vec<String>>,
}

impl Bucket {
	/// Creates an empty bucket.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records that `word` followed the prefix `key`.
	pub fn add_transition(&mut self, key: &str, word: &str) {
		match self.transitions.get_mut(key) {
			Some(candidates) => candidates.push(word.to_owned()),
			None => {
				self.transitions.insert(key.to_owned(), vec![word.to_owned()]);
			}
		}
	}

	/// Every word observed after `key`, in ingestion order.
	///
	/// Unknown keys yield an empty slice (a dead-end).
	pub fn candidates(&self, key: &str) -> &[String] {
		self.transitions.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Picks the next word for `key`, or `None` on a dead-end.
	pub fn pick<R: Rng + ?Sized>(&self, key: &str, rng: &mut R) -> Option<&str> {
		self.candidates(key).choose(rng).map(String::as_str)
	}

	/// Number of distinct prefix keys.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Total number of stored candidates, duplicates included.
	pub fn transitions(&self) -> usize {
		self.transitions.values().map(Vec::len).sum()
	}

	/// Appends the candidates of `other` after this bucket's own.
	///
	/// Merging partial buckets in ingestion order gives the same table as
	/// ingesting everything into one bucket.
	pub fn merge(&mut self, other: &Self) {
		for (key, candidates) in &other.transitions {
			self.transitions
				.entry(key.clone())
				.or_default()
				.extend(candidates.iter().cloned());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn duplicates_are_kept() {
		let mut bucket = Bucket::new();
		bucket.add_transition("", "a");
		bucket.add_transition("", "a");
		bucket.add_transition("", "b");

		assert_eq!(bucket.candidates(""), ["a", "a", "b"]);
		assert_eq!(bucket.len(), 1);
		assert_eq!(bucket.transitions(), 3);
	}

	#[test]
	fn unknown_key_is_a_dead_end() {
		let bucket = Bucket::new();
		let mut rng = StdRng::seed_from_u64(7);

		assert!(bucket.candidates("nothing here").is_empty());
		assert_eq!(bucket.pick("nothing here", &mut rng), None);
	}

	#[test]
	fn pick_follows_frequencies() {
		let mut bucket = Bucket::new();
		for _ in 0..9 {
			bucket.add_transition("k", "common");
		}
		bucket.add_transition("k", "rare");

		let mut rng = StdRng::seed_from_u64(42);
		let common = (0..2000)
			.filter(|_| bucket.pick("k", &mut rng) == Some("common"))
			.count();

		// Expected 1800
		assert!((1650..=1950).contains(&common), "common picked {common} times");
	}

	#[test]
	fn merge_appends_in_order() {
		let mut first = Bucket::new();
		first.add_transition("", "a");
		let mut second = Bucket::new();
		second.add_transition("", "b");
		second.add_transition("b", "c");

		first.merge(&second);

		assert_eq!(first.candidates(""), ["a", "b"]);
		assert_eq!(first.candidates("b"), ["c"]);
	}
}
