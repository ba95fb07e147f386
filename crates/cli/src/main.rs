//! Cache hierarchy simulator CLI.
//!
//! This binary replays a memory access trace through a simulated hierarchy. It performs:
//! 1. **Setup:** Builds the hierarchy from a preset or a JSON configuration file.
//! 2. **Replay:** Parses the trace (file or stdin) and issues each read or write in order.
//! 3. **Report:** Prints every value read, the total simulated time and, optionally, the
//!    per-level statistics.

/// Trace file parsing.
mod trace;

use std::io::{self, Read, Write};
use std::{fs, process};

use cachesim_core::MemoryHierarchy;
use cachesim_core::common::ConfigError;
use cachesim_core::config::HierarchyConfig;
use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::trace::{Op, TraceError};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "CPU cache hierarchy simulator",
    long_about = "Replay a memory access trace through a simulated cache hierarchy.\n\nTrace lines are `r <addr>` or `w <addr> <value>`; numbers are decimal or 0x-hex and `#` starts a comment.\nSet RUST_LOG=debug to log misses and write-backs.\n\nExamples:\n  cachesim trace.txt\n  cachesim --preset l1 --stats trace.txt\n  cachesim --config hierarchy.json < trace.txt"
)]
struct Cli {
    /// Built-in hierarchy layout (ignored when --config is given).
    #[arg(short, long, value_enum, default_value_t = Preset::L2TwoWay)]
    preset: Preset,

    /// JSON hierarchy configuration.
    #[arg(short, long)]
    config: Option<String>,

    /// Print per-level statistics after the run.
    #[arg(short, long)]
    stats: bool,

    /// Trace file; standard input when omitted.
    trace: Option<String>,
}

/// Reference hierarchy layouts.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Direct-mapped L1 only.
    L1,
    /// Direct-mapped L1 and L2.
    L2,
    /// Direct-mapped L1 over a 2-way LRU L2.
    #[value(name = "l2-2way")]
    L2TwoWay,
}

impl Preset {
    fn config(self) -> HierarchyConfig {
        match self {
            Self::L1 => HierarchyConfig::l1_only(),
            Self::L2 => HierarchyConfig::two_level(),
            Self::L2TwoWay => HierarchyConfig::two_level_two_way(),
        }
    }
}

/// Everything that can stop a run before the trace is replayed.
#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hierarchy: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid trace: {0}")]
    Trace(#[from] TraceError),

    #[error("traces use 32-bit values; word_size must be 4, not {0}")]
    WordSize(usize),

    #[error("cannot write results: {0}")]
    Output(#[from] io::Error),
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_owned(),
            source,
        }),
        None => {
            let mut text = String::new();
            let _ = io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::Io {
                    path: "<stdin>".to_owned(),
                    source,
                })?;
            Ok(text)
        }
    }
}

/// Builds and initialises a hierarchy suitable for 32-bit trace values.
fn build_hierarchy(config: &HierarchyConfig) -> Result<MemoryHierarchy, CliError> {
    if config.word_size != 4 {
        return Err(CliError::WordSize(config.word_size));
    }
    let mut mem = MemoryHierarchy::new(config)?;
    mem.init_cache();
    mem.reset_time();
    Ok(mem)
}

/// Issues `ops` in order, writing one line per read and the final time to `out`.
///
/// # Arguments
///
/// * `mem` - An initialised hierarchy.
/// * `ops` - Parsed trace operations.
/// * `stats` - Append the statistics report after the time line.
/// * `out` - Destination for the results.
fn replay<W: Write>(
    mem: &mut MemoryHierarchy,
    ops: &[Op],
    stats: bool,
    out: &mut W,
) -> Result<(), CliError> {
    tracing::info!(
        "replaying {} operations through {} cache level(s)",
        ops.len(),
        mem.config().levels.len()
    );
    for &op in ops {
        match op {
            Op::Read(addr) => writeln!(out, "{:#010x} = {:#010x}", addr, mem.read_u32(addr))?,
            Op::Write(addr, value) => mem.write_u32(addr, value),
        }
    }

    writeln!(out, "time: {}", mem.get_time())?;
    if stats {
        writeln!(out, "{}", mem.stats())?;
    }
    Ok(())
}

/// Builds the hierarchy, replays the trace and prints the results.
fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => HierarchyConfig::from_json(&read_input(Some(path))?)?,
        None => cli.preset.config(),
    };
    let mut mem = build_hierarchy(&config)?;
    let ops = trace::parse(&read_input(cli.trace.as_deref())?)?;
    replay(&mut mem, &ops, cli.stats, &mut io::stdout().lock())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
