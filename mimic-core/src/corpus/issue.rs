use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` as the default value.
///
/// Only self-describing formats can carry `null`; the binary cache is
/// read as-is.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	if deserializer.is_human_readable() {
		Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
	} else {
		T::deserialize(deserializer)
	}
}

/// One page of the tracker search API, also used as the cached snapshot.
///
/// Only the fields used for training are modelled; everything else in the
/// API response is ignored.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchPage {
	#[serde(deserialize_with = "null_as_default")]
	pub start_at: usize,
	#[serde(deserialize_with = "null_as_default")]
	pub max_results: usize,
	#[serde(deserialize_with = "null_as_default")]
	pub total: usize,
	#[serde(deserialize_with = "null_as_default")]
	pub issues: Vec<Issue>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Issue {
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub key: String,
	#[serde(deserialize_with = "null_as_default")]
	pub fields: IssueFields,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct IssueFields {
	pub summary: Option<String>,
	pub description: Option<String>,
	pub reporter: Option<User>,
	pub comment: Option<CommentPage>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(deserialize_with = "null_as_default")]
	pub display_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentPage {
	#[serde(deserialize_with = "null_as_default")]
	pub start_at: usize,
	#[serde(deserialize_with = "null_as_default")]
	pub max_results: usize,
	#[serde(deserialize_with = "null_as_default")]
	pub total: usize,
	#[serde(deserialize_with = "null_as_default")]
	pub comments: Vec<Comment>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Comment {
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	pub author: Option<User>,
	pub body: Option<String>,
}

impl SearchPage {
	/// Wraps a complete issue list, as stored in the cache.
	pub fn snapshot(issues: Vec<Issue>) -> Self {
		Self {
			start_at: 0,
			max_results: issues.len(),
			total: issues.len(),
			issues,
		}
	}
}

/// A piece of text attributed to an author.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
	pub author: String,
	pub text: String,
}

impl Record {
	pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			author: author.into(),
			text: text.into(),
		}
	}
}

fn user_name(user: Option<&User>) -> &str {
	user.map(|user| user.name.as_str()).unwrap_or_default()
}

impl Issue {
	/// The description (by the reporter), then every comment (by its author).
	///
	/// Missing texts are skipped; missing authors give the pooled author.
	pub fn records(&self) -> Vec<Record> {
		let fields = &self.fields;
		let mut records = Vec::new();

		if let Some(description) = &fields.description {
			records.push(Record::new(user_name(fields.reporter.as_ref()), description.as_str()));
		}

		if let Some(page) = &fields.comment {
			for comment in &page.comments {
				if let Some(body) = &comment.body {
					records.push(Record::new(user_name(comment.author.as_ref()), body.as_str()));
				}
			}
		}

		records
	}
}

/// Flattens issues into records, in issue order.
pub fn records(issues: &[Issue]) -> Vec<Record> {
	issues.iter().flat_map(Issue::records).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	const PAGE: &str = r#"{
		"expand": "schema,names",
		"startAt": 0,
		"maxResults": 1000,
		"total": 2,
		"issues": [
			{
				"id": "10001",
				"key": "OPS-1",
				"fields": {
					"summary": "Disk full",
					"description": "<p>The disk is full.</p>",
					"reporter": { "name": "alice", "displayName": "Alice", "active": true },
					"comment": {
						"startAt": 0,
						"maxResults": 2,
						"total": 2,
						"comments": [
							{ "id": "1", "author": { "name": "bob" }, "body": "Cleaned it up." },
							{ "id": "2", "author": null, "body": "Thanks." }
						]
					}
				}
			},
			{
				"id": "10002",
				"key": "OPS-2",
				"fields": { "description": null, "reporter": null }
			}
		]
	}"#;

	#[test]
	fn parses_search_page_and_ignores_unknown_fields() {
		let page: SearchPage = serde_json::from_str(PAGE).unwrap();

		assert_eq!(page.total, 2);
		assert_eq!(page.issues.len(), 2);
		assert_eq!(page.issues[0].key, "OPS-1");
		assert_eq!(page.issues[0].fields.reporter.as_ref().unwrap().display_name, "Alice");
		assert!(page.issues[1].fields.comment.is_none());
	}

	#[test]
	fn records_follow_issue_order() {
		let page: SearchPage = serde_json::from_str(PAGE).unwrap();

		assert_eq!(
			records(&page.issues),
			vec![
				Record::new("alice", "<p>The disk is full.</p>"),
				Record::new("bob", "Cleaned it up."),
				Record::new("", "Thanks."),
			]
		);
	}

	#[test]
	fn null_fields_read_as_defaults() {
		let page: SearchPage = serde_json::from_str(
			r#"{"total":null,"issues":[{"id":null,"key":"A-1","fields":{
				"description":"hi.",
				"reporter":{"name":null,"displayName":null},
				"comment":{"comments":[{"id":null,"author":{"name":null},"body":"ok."}]}
			}}]}"#,
		)
		.unwrap();

		assert_eq!(page.total, 0);
		assert_eq!(page.issues[0].id, "");
		assert_eq!(
			records(&page.issues),
			vec![Record::new("", "hi."), Record::new("", "ok.")]
		);
	}

	#[test]
	fn snapshot_counts_issues() {
		let snapshot = SearchPage::snapshot(vec![Issue::default(), Issue::default()]);
		assert_eq!(snapshot.total, 2);
		assert_eq!(snapshot.max_results, 2);
	}
}
