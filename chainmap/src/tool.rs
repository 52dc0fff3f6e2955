//! CLI tool for running `put`/`get`/`delete` command streams against a chained map

use chainmap::command::{run_session, SessionError, SessionStats};
use chainmap::hashing::hashers::{MaskHasher, ModuloHasher, MultiplyShiftHasher};
use chainmap::{ChainMapError, ChainedMap, HashMap, Hasher};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

#[derive(Error, Debug)]
enum ToolError {
    #[error("Failed to install the tracing subscriber: {0}")]
    Tracing(String),
    #[error(transparent)]
    Map(#[from] ChainMapError),
    #[error("Failed to open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Session(#[from] SessionError),
}

fn init_tracing(quiet: bool, verbose: u8) -> Result<LevelFilter, ToolError> {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (the library logs through `log`)
    tracing_log::LogTracer::init().map_err(|e| ToolError::Tracing(e.to_string()))?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("CHAINMAP_LOG")
        .from_env_lossy();

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ToolError::Tracing(e.to_string()))?;

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info);
    }));

    Ok(level_filter)
}

/// Bucket reduction strategy
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum HasherKind {
    /// Euclidean remainder by the exact number of buckets
    Modulo,
    /// Low bits of the key, buckets rounded up to a power of two
    Mask,
    /// Seeded pair-multiply-shift, buckets rounded up to a power of two
    MultiplyShift,
}

/// Runs a stream of put/get/delete commands against a chained hash map
#[derive(Parser, Debug)]
#[command(name = "chainmap")]
#[command(about = "Runs a stream of put/get/delete commands against a chained hash map")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Expected number of entries
    #[arg(short, long, default_value_t = 65536, allow_negative_numbers = true)]
    capacity: i64,

    /// Desirable ratio of entries to buckets
    #[arg(short, long, default_value_t = 1.0)]
    load_factor: f64,

    /// Bucket reduction strategy
    #[arg(long, value_enum, default_value_t = HasherKind::Modulo)]
    hasher: HasherKind,

    /// Seed for seeded hashers
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// File with the commands (reads stdin if omitted)
    input: Option<PathBuf>,
}

fn run<H: Hasher<i64>>(args: &ToolArgs) -> Result<SessionStats, ToolError> {
    let mut map =
        ChainedMap::<i64, i64, H>::with_params(args.capacity, args.load_factor, args.seed)?;
    info!(
        "Using {:?} hasher with {} buckets",
        args.hasher,
        map.num_buckets()
    );

    let writer = BufWriter::new(io::stdout().lock());

    let stats = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| ToolError::Open {
                path: path.clone(),
                source,
            })?;
            run_session(&mut map, BufReader::new(file), writer)?
        }
        None => run_session(&mut map, io::stdin().lock(), writer)?,
    };

    info!(
        "Executed {} commands: {} entries, load factor {:.3}, {} collisions",
        stats.commands,
        map.len(),
        map.load_factor(),
        map.num_collisions(),
    );

    Ok(stats)
}

fn main() -> ExitCode {
    let args = ToolArgs::parse();

    if let Err(e) = init_tracing(args.quiet, args.verbose) {
        let _ = writeln!(io::stderr(), "{}", e);
        return ExitCode::FAILURE;
    }
    debug!("{:?}", args);

    let result = match args.hasher {
        HasherKind::Modulo => run::<ModuloHasher<i64>>(&args),
        HasherKind::Mask => run::<MaskHasher<i64>>(&args),
        HasherKind::MultiplyShift => run::<MultiplyShiftHasher<i64>>(&args),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
