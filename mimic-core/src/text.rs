//! Normalization of tracker markup into plain text.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

/// Markup tags found in tracker descriptions and comments.
static TAGS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"</?(div|p|img|a|li|ul|br|b|i|hr|span|ins|h\d|tt|font|em|ol|table|tr|td|tbody|thead|th|del).*?>",
	)
	.unwrap()
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Turns a tracker text field into plain text.
///
/// - Decodes HTML entities, so escaped tags become real tags
/// - Removes the known tags (their content is kept)
/// - Collapses every whitespace run into a single space and trims
/// - Decodes entities once more, for doubly escaped text
pub fn clean(text: &str) -> String {
	let decoded = decode_html_entities(text);
	let stripped = TAGS.replace_all(&decoded, "");
	let collapsed = WHITESPACE.replace_all(&stripped, " ");
	decode_html_entities(collapsed.trim()).into_owned()
}

/// Forces compilation of the patterns.
///
/// Called at startup so a broken pattern aborts before any work is done.
pub fn init() {
	LazyLock::force(&TAGS);
	LazyLock::force(&WHITESPACE);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_known_tags_and_keeps_content() {
		assert_eq!(
			clean("<p>The <b>build</b> is <span class=\"red\">broken</span>.</p>"),
			"The build is broken."
		);
	}

	#[test]
	fn collapses_whitespace() {
		assert_eq!(clean("  one\n\n two\t\tthree  "), "one two three");
	}

	#[test]
	fn line_breaks_become_spaces() {
		assert_eq!(clean("first line<br/>\nsecond line"), "first line second line");
	}

	#[test]
	fn escaped_tags_are_stripped_too() {
		assert_eq!(clean("&lt;div&gt;hello&lt;/div&gt;"), "hello");
	}

	#[test]
	fn double_escaping_is_resolved() {
		assert_eq!(clean("a &amp;lt; b"), "a < b");
	}

	#[test]
	fn unknown_tags_are_kept() {
		assert_eq!(clean("use <code>foo</code>"), "use <code>foo</code>");
	}

	#[test]
	fn heading_tags_are_stripped() {
		assert_eq!(clean("<h2>Title</h2>body"), "Titlebody");
	}

	#[test]
	fn empty_input() {
		assert_eq!(clean(""), "");
		assert_eq!(clean(" \n\t "), "");
	}
}
