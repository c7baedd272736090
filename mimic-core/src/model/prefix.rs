/// The last N words emitted (or ingested), oldest first.
///
/// A fresh prefix holds N empty strings, and its key is the empty string:
/// the start state of every sentence.
///
/// # Invariants
/// - The window length is fixed at construction and never changes
/// - Empty slots only ever appear at the front of the window
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
	words: Vec<String>,
}

impl Prefix {
	/// Creates the start-state window for a chain of the given order.
	pub fn new(order: usize) -> Self {
		Self { words: vec![String::new(); order] }
	}

	/// Number of words in the window.
	pub fn order(&self) -> usize {
		self.words.len()
	}

	/// Lookup key: the words joined by single spaces, trimmed.
	pub fn key(&self) -> String {
		self.words.join(" ").trim().to_owned()
	}

	/// Drops the oldest word and appends `word` at the end.
	pub fn shift(&mut self, word: &str) {
		if self.words.is_empty() {
			return;
		}
		self.words.rotate_left(1);
		if let Some(last) = self.words.last_mut() {
			word.clone_into(last);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn start_state_key_is_empty() {
		assert_eq!(Prefix::new(3).key(), "");
	}

	#[test]
	fn shift_keeps_a_fixed_window() {
		let mut prefix = Prefix::new(2);

		prefix.shift("hi");
		assert_eq!(prefix.key(), "hi");

		prefix.shift("there");
		assert_eq!(prefix.key(), "hi there");

		prefix.shift("friend.");
		assert_eq!(prefix.key(), "there friend.");
		assert_eq!(prefix.order(), 2);
	}

	#[test]
	fn order_one_only_remembers_the_last_word() {
		let mut prefix = Prefix::new(1);
		prefix.shift("a");
		prefix.shift("b");
		assert_eq!(prefix.key(), "b");
	}
}
