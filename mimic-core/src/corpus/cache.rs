use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::{build_output_path, is_fresh};
use super::issue::SearchPage;

/// Default location of the JSON snapshot.
pub fn default_path() -> PathBuf {
	std::env::temp_dir().join("mimic_cache.json")
}

/// Saves `snapshot` as JSON at `path`, plus a `postcard` binary next to it.
pub fn save<P: AsRef<Path>>(path: P, snapshot: &SearchPage) -> Result<()> {
	let path = path.as_ref();
	fs::write(path, serde_json::to_vec(snapshot)?)?;
	write_binary(path, snapshot)?;
	log::info!("saved {} issues to {}", snapshot.issues.len(), path.display());
	Ok(())
}

/// Loads the snapshot stored at `path`.
///
/// # Behavior
/// - The JSON file must exist; a missing file is reported as `NotFound`.
/// - The binary sidecar is used when it is at least as recent as the JSON.
/// - Otherwise the JSON is parsed and the sidecar is rebuilt. Failing to
///   write the sidecar (e.g. read-only archive) is only logged.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SearchPage> {
	let path = path.as_ref();
	fs::metadata(path)?;

	let binary_path = build_output_path(path, "bin")?;
	if is_fresh(&binary_path, path) {
		match read_binary(&binary_path) {
			Ok(snapshot) => {
				log::debug!("loaded binary cache {}", binary_path.display());
				return Ok(snapshot);
			}
			Err(e) => log::warn!("ignoring unreadable cache {}: {e}", binary_path.display()),
		}
	}

	let snapshot: SearchPage = serde_json::from_slice(&fs::read(path)?)?;
	if let Err(e) = write_binary(path, &snapshot) {
		log::warn!("could not write binary cache for {}: {e}", path.display());
	}
	Ok(snapshot)
}

fn read_binary(path: &Path) -> Result<SearchPage> {
	Ok(postcard::from_bytes(&fs::read(path)?)?)
}

fn write_binary(path: &Path, snapshot: &SearchPage) -> Result<()> {
	let bytes = postcard::to_stdvec(snapshot)?;
	fs::write(build_output_path(path, "bin")?, bytes)?;
	Ok(())
}
