use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds a sibling path of `input_path` with a new extension.
///
/// Example:
/// `/tmp/mimic_cache.json` + `"bin"` → `/tmp/mimic_cache.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Returns `true` when `derived` exists and was written no earlier than `source`.
///
/// Missing timestamps are treated as stale.
pub(crate) fn is_fresh<P: AsRef<Path>, Q: AsRef<Path>>(derived: P, source: Q) -> bool {
	let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();

	match (modified(derived.as_ref()), modified(source.as_ref())) {
		(Some(derived), Some(source)) => derived >= source,
		_ => false,
	}
}
