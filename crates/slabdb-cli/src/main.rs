//! Throughput test driver for SlabDB blobs.
//!
//! Generates random key/value pairs for a configured geometry, writes them
//! all, reads them all back, and reports the timing of both passes. Exits
//! nonzero on the first fatal error, including probe exhaustion.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slabdb_blob::Blob;
use slabdb_common::{BlobConfig, Result, SlabError};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "slabdb",
    about = "Random-workload throughput driver for SlabDB blob files",
    version
)]
struct Cli {
    /// Blob file path
    #[arg(long, default_value = "./test.slab")]
    path: PathBuf,

    /// Capacity exponent: 2^capacity slots in total, 0 selects full-range
    /// direct mapping
    #[arg(long, default_value_t = 0)]
    capacity: u8,

    /// Key size in bytes
    #[arg(long)]
    key: u32,

    /// Value size in bytes
    #[arg(long)]
    value: u32,

    /// Number of random records to write and read back
    #[arg(long)]
    n: u64,

    /// Seed for the workload generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    if let Err(e) = run(&cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut blob = Blob::open(BlobConfig {
        path: cli.path.clone(),
        key_size: cli.key,
        value_size: cli.value,
        capacity: cli.capacity,
    })?;

    let max_key = blob.geometry().max_key();
    tracing::info!(
        "opened blob: {} slots of {} bytes, {} bytes total, max key {}",
        blob.record_count(),
        blob.geometry().record_size(),
        blob.file_size(),
        max_key
    );

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::debug!("workload seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    // Distinct nonzero keys: zero is the empty-slot sentinel, and duplicate
    // keys would make read-back verification ambiguous.
    let mut keys = HashSet::with_capacity(cli.n as usize);
    while (keys.len() as u64) < cli.n {
        keys.insert(rng.gen_range(1..=max_key));
    }

    let mut records = Vec::with_capacity(keys.len());
    for key in keys {
        let mut value = vec![0u8; cli.value as usize];
        rng.fill(&mut value[..]);
        records.push((key, value));
    }
    tracing::info!("generated {} keys and values", records.len());

    let start = Instant::now();
    let mut max_depth = 0u8;
    for (key, value) in &records {
        match blob.set(*key, value) {
            Ok((_, iters)) => max_depth = max_depth.max(iters),
            Err(e) => {
                tracing::error!("put failed for key {key}");
                return Err(e);
            }
        }
    }
    let elapsed = start.elapsed();
    tracing::info!(
        "put {} values in {:.3?} ({:.0} op/s, max probe depth {})",
        records.len(),
        elapsed,
        records.len() as f64 / elapsed.as_secs_f64(),
        max_depth
    );

    let start = Instant::now();
    let mut max_depth = 0u8;
    for (key, value) in &records {
        let (read, _, iters) = match blob.get(*key) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("get failed for key {key}");
                return Err(e);
            }
        };
        max_depth = max_depth.max(iters);
        if read.as_ref() != value.as_slice() {
            return Err(SlabError::Internal(format!(
                "inconsistent data for key {key}"
            )));
        }
    }
    let elapsed = start.elapsed();
    tracing::info!(
        "read {} values in {:.3?} ({:.0} op/s, max probe depth {})",
        records.len(),
        elapsed,
        records.len() as f64 / elapsed.as_secs_f64(),
        max_depth
    );

    blob.close()
}
