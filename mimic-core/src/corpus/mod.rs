//! Issue tracker corpus.
//!
//! Issues come from the tracker search API or from a local JSON snapshot,
//! are flattened into `(author, text)` records, normalized and ingested.

/// Serde model of the tracker search API.
pub mod issue;

/// Blocking search API client.
pub mod fetch;

/// JSON snapshot with a binary sidecar.
pub mod cache;

use std::sync::mpsc;
use std::thread;

use crate::error::{MimicError, Result};
use crate::model::{EngineConfig, MarkovChain};
use crate::text;

pub use issue::{records, Issue, Record, SearchPage};

/// Builds a chain from `records`.
///
/// # Behavior
/// - Splits the records into chunks (based on CPU cores * factor).
/// - Spawns a thread per chunk that normalizes its texts and ingests them
///   into a partial chain.
/// - Merges the partial chains in chunk order, which gives exactly the
///   table a single sequential pass would build.
///
/// # Notes
/// - Each partial chain is owned by a single thread; the chains are only
///   combined once every worker is done.
pub fn train(config: &EngineConfig, records: Vec<Record>) -> Result<MarkovChain> {
	let mut final_chain = MarkovChain::new(config.clone());
	if records.is_empty() {
		return Ok(final_chain);
	}

	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = records.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	let mut spawned = 0;
	for (index, chunk) in records.chunks(chunk_size).enumerate() {
		let tx = tx.clone();
		let chunk: Vec<Record> = chunk.to_vec();
		let config = config.clone();

		thread::spawn(move || {
			let mut partial_chain = MarkovChain::new(config);
			for record in chunk {
				partial_chain.ingest(&record.author, &text::clean(&record.text));
			}
			// The receiver only goes away if training already failed.
			let _ = tx.send((index, partial_chain));
		});
		spawned += 1;
	}
	drop(tx);

	let mut partial_chains: Vec<Option<MarkovChain>> = (0..spawned).map(|_| None).collect();
	for (index, partial_chain) in rx.iter() {
		partial_chains[index] = Some(partial_chain);
	}

	for (index, partial_chain) in partial_chains.into_iter().enumerate() {
		let partial_chain = partial_chain.ok_or(MimicError::Worker(index))?;
		final_chain.merge(&partial_chain)?;
	}

	let stats = final_chain.stats();
	log::info!(
		"trained on {} records: {} authors, {} prefixes, {} transitions",
		records.len(),
		stats.authors,
		stats.prefixes,
		stats.transitions
	);

	Ok(final_chain)
}
