use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{MimicError, Result};
use super::issue::SearchPage;

/// Issues requested per search page.
pub const PAGE_SIZE: usize = 1000;

/// Environment variable read before prompting for the tracker password.
pub const PASSWORD_ENV: &str = "MIMIC_JIRA_PASSWORD";

/// Blocking client for the tracker search API.
pub struct JiraClient {
	client: Client,
	base_url: String,
	username: String,
	password: String,
}

impl JiraClient {
	/// Creates a client for the tracker at `base_url` (e.g. `https://jira.example.com`).
	pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_secs(120))
			.build()?;
		Ok(Self::with_client(client, base_url, username, password))
	}

	/// Creates a client reusing an already configured HTTP client.
	pub fn with_client(client: Client, base_url: &str, username: &str, password: &str) -> Self {
		Self {
			client,
			base_url: base_url.trim_end_matches('/').to_owned(),
			username: username.to_owned(),
			password: password.to_owned(),
		}
	}

	pub fn search_url(&self) -> String {
		format!("{}/rest/api/2/search", self.base_url)
	}

	/// Fetches the page of issues starting at `start_at`.
	pub fn fetch_page(&self, start_at: usize) -> Result<SearchPage> {
		let url = self.search_url();
		let max_results = PAGE_SIZE.to_string();
		let start_at = start_at.to_string();

		let response = self.client
			.get(&url)
			.query(&[
				("fields", "*all"),
				("maxResults", max_results.as_str()),
				("startAt", start_at.as_str()),
			])
			.basic_auth(&self.username, Some(&self.password))
			.send()?;

		let status = response.status();
		if !status.is_success() {
			return Err(MimicError::Status { status: status.as_u16(), url });
		}

		Ok(serde_json::from_str(&response.text()?)?)
	}

	/// Fetches every issue, page after page, until a page comes back empty.
	pub fn fetch_all(&self) -> Result<SearchPage> {
		let mut issues = Vec::new();

		loop {
			let page = self.fetch_page(issues.len())?;
			if page.issues.is_empty() {
				break;
			}
			issues.extend(page.issues);
			log::info!("{} issues cached", issues.len());
		}

		Ok(SearchPage::snapshot(issues))
	}
}

/// Reads the tracker password from `MIMIC_JIRA_PASSWORD`, or prompts for it
/// without echo.
pub fn read_password() -> Result<String> {
	password_from(std::env::var(PASSWORD_ENV).ok(), || {
		rpassword::prompt_password("JIRA password: ")
	})
}

fn password_from<F>(configured: Option<String>, prompt: F) -> Result<String>
where
	F: FnOnce() -> std::io::Result<String>,
{
	match configured {
		Some(password) => Ok(password),
		None => prompt().map_err(MimicError::Password),
	}
}
