use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mimic_core::corpus;
use mimic_core::options::{ChainArgs, CorpusArgs};
use mimic_core::GenerateError;

/// Pause per generated character when `--wait` is set.
const WAIT_PER_CHAR: Duration = Duration::from_millis(45);

#[derive(Parser)]
#[command(name = "mimic", about = "Generate sentences written the way tracker users write")]
struct Cli {
    /// Username to generate messages for (empty = everybody)
    #[arg(short = 'u', long = "user", default_value = "")]
    user: String,

    /// Wait for a little while after generating each message
    #[arg(short, long)]
    wait: bool,

    /// Stop after this many messages (default: never)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed the random generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    chain: ChainArgs,
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    mimic_core::text::init();

    let config = cli.chain.build_config().context("invalid chain configuration")?;
    let snapshot = cli.corpus.load().context("failed to load the issue corpus")?;

    // Only the requested author's texts are needed
    let mut records = corpus::records(&snapshot.issues);
    if !cli.user.is_empty() {
        records.retain(|record| record.author == cli.user);
    }
    log::debug!("training on {} records for '{}'", records.len(), cli.user);
    let chain = corpus::train(&config, records).context("training failed")?;

    let mut rng = match cli.seed {
        Some(seed) => {
            log::debug!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let mut stdout = io::stdout().lock();
    let mut generated = 0;
    while cli.count.is_none_or(|count| generated < count) {
        let sentence = match chain.generate_with(&cli.user, &mut rng) {
            Ok(sentence) => sentence,
            Err(GenerateError::UnknownAuthor(_)) => {
                writeln!(stdout, "User does not exist in JIRA")?;
                break;
            }
            Err(e) => return Err(e).context("generation failed"),
        };

        match writeln!(stdout, "{sentence}\n").and_then(|_| stdout.flush()) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => break,
            result => result?,
        }
        generated += 1;

        if cli.wait {
            thread::sleep(WAIT_PER_CHAR * sentence.len() as u32);
        }
    }

    Ok(())
}
