//! Command-line option groups shared by `mimic` and `mimic-server`.
//!
//! Every option can also be set through its `MIMIC_*` environment variable.

use std::path::PathBuf;

use clap::Args;

use crate::corpus::{cache, fetch, SearchPage};
use crate::error::{MimicError, Result};
use crate::model::{EngineConfig, Vocabulary};

/// Where the issue corpus comes from.
#[derive(Args, Clone, Debug)]
pub struct CorpusArgs {
	/// Refresh the locally cached issue snapshot from the tracker
	#[arg(short = 'r', long)]
	pub refresh: bool,

	/// Tracker username used when refreshing the cache
	#[arg(short = 'j', long = "jira-user", env = "MIMIC_JIRA_USER", default_value = "")]
	pub jira_user: String,

	/// Tracker base URL used when refreshing the cache
	#[arg(long = "jira-url", env = "MIMIC_JIRA_URL")]
	pub jira_url: Option<String>,

	/// Location of the cached issue snapshot
	#[arg(long, env = "MIMIC_CACHE", default_value_os_t = cache::default_path())]
	pub cache: PathBuf,

	/// Bundled snapshot to read instead of the cache (never refreshed)
	#[arg(long, env = "MIMIC_ARCHIVE", conflicts_with = "refresh")]
	pub archive: Option<PathBuf>,
}

impl CorpusArgs {
	/// Loads the issue snapshot.
	///
	/// # Behavior
	/// - `--refresh`: fetch everything from the tracker and rewrite the cache.
	/// - `--archive`: read the given snapshot.
	/// - Otherwise read the cache, fetching it first if it does not exist yet.
	pub fn load(&self) -> Result<SearchPage> {
		if self.refresh {
			return self.refresh_cache();
		}

		if let Some(archive) = &self.archive {
			return cache::load(archive);
		}

		match cache::load(&self.cache) {
			Err(MimicError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
				log::info!("no cache at {}, fetching issues", self.cache.display());
				self.refresh_cache()
			}
			result => result,
		}
	}

	fn refresh_cache(&self) -> Result<SearchPage> {
		let url = self.jira_url.as_deref().ok_or(MimicError::Missing("--jira-url"))?;
		let password = fetch::read_password()?;
		let client = fetch::JiraClient::new(url, &self.jira_user, &password)?;

		let snapshot = client.fetch_all()?;
		cache::save(&self.cache, &snapshot)?;
		Ok(snapshot)
	}
}

/// How the chain is built and which sentences it accepts.
#[derive(Args, Clone, Debug)]
pub struct ChainArgs {
	/// Semantic accuracy: words of context (higher = more grammatical but less creative)
	#[arg(short = 'a', long, default_value_t = 2)]
	pub accuracy: usize,

	/// File of filtered vocabulary words, one per line
	#[arg(long, env = "MIMIC_VOCABULARY")]
	pub vocabulary: Option<PathBuf>,

	/// Minimum filtered vocabulary words in every generated sentence
	#[arg(long, default_value_t = 0)]
	pub min_matches: usize,

	/// Give up on a sentence after this many rejected attempts
	#[arg(long)]
	pub max_attempts: Option<usize>,
}

impl ChainArgs {
	/// Loads the vocabulary and builds the engine configuration.
	pub fn build_config(&self) -> Result<EngineConfig> {
		let vocabulary = match &self.vocabulary {
			Some(path) => Vocabulary::load(path)?,
			None => Vocabulary::default(),
		};

		Ok(EngineConfig::new(self.accuracy)?
			.with_vocabulary(vocabulary)
			.with_min_matches(self.min_matches)
			.with_max_attempts(self.max_attempts))
	}
}
