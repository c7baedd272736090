use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::io::read_file;

/// Filtered vocabulary: lowercase words whose presence gates generated sentences.
///
/// Membership is case-insensitive on the tested word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
	words: HashSet<String>,
}

impl Vocabulary {
	/// Builds a vocabulary, trimming and lowercasing each entry.
	///
	/// Blank entries are ignored.
	pub fn from_words<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let words = words
			.into_iter()
			.map(|word| word.as_ref().trim().to_lowercase())
			.filter(|word| !word.is_empty())
			.collect();
		Self { words }
	}

	/// Loads a vocabulary file holding one word per line.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let vocabulary = Self::from_words(read_file(path)?);
		log::debug!("loaded {} vocabulary words from {}", vocabulary.len(), path.display());
		Ok(vocabulary)
	}

	pub fn contains(&self, word: &str) -> bool {
		self.words.contains(&word.to_lowercase())
	}

	/// Counts how many of `words` belong to the vocabulary (repeats count each time).
	pub fn count_matches<'a, I>(&self, words: I) -> usize
	where
		I: IntoIterator<Item = &'a str>,
	{
		if self.words.is_empty() {
			return 0;
		}
		words.into_iter().filter(|word| self.contains(word)).count()
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}
