use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use talenwf::task::TalTask;
use talenwf::{parse_upstream_bases, table, TalenConfig, TalenError};

/// talenWF CLI
#[derive(Parser, Debug)]
#[command(name = "talenwf")]
#[command(version)]
#[command(about = "TALEN window finder: enumerate TAL1/TAL2 target-site pairs", long_about = None)]
struct Cli {
    /// FASTA file; only the first record is used
    #[arg(long)]
    fasta: PathBuf,
    /// Minimum spacer length
    #[arg(long, alias = "min_spacer", default_value_t = 14)]
    min_spacer: usize,
    /// Maximum spacer length
    #[arg(long, alias = "max_spacer", default_value_t = 18)]
    max_spacer: usize,
    /// Minimum TAL array length
    #[arg(long, alias = "array_min", default_value_t = 14)]
    array_min: usize,
    /// Maximum TAL array length
    #[arg(long, alias = "array_max", default_value_t = 18)]
    array_max: usize,
    /// Output TSV path (parent directories are created). Default: stdout
    #[arg(long)]
    outpath: Option<PathBuf>,
    /// Only report pairs designed around this cut-site index
    #[arg(long, alias = "filter_base")]
    filter_base: Option<usize>,
    /// Upstream anchor bases, comma separated (e.g. "T,A")
    #[arg(long, alias = "upstream_bases", default_value = "T")]
    upstream_bases: String,
    /// Threads (0/None = all)
    #[arg(long)]
    threads: Option<usize>,
    /// Warn about invalid settings instead of failing (legacy behaviour)
    #[arg(long)]
    lenient: bool,
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (upstream_bases, problems) = parse_upstream_bases(&cli.upstream_bases);
    if !problems.is_empty() {
        if !cli.lenient {
            return Err(TalenError::Config(problems)).context("invalid --upstream-bases");
        }
        for p in &problems {
            warn!("{p}; skipping");
        }
    }

    let config = TalenConfig {
        min_spacer: cli.min_spacer,
        max_spacer: cli.max_spacer,
        array_min: cli.array_min,
        array_max: cli.array_max,
        filter_base: cli.filter_base,
        upstream_bases,
    };
    let task = TalTask {
        fasta: cli.fasta,
        config,
        outpath: cli.outpath,
        threads: cli.threads.filter(|&n| n > 0),
        lenient: cli.lenient,
    };

    info!("Starting TAL finding task...");
    let out = task
        .run()
        .with_context(|| format!("TAL finding failed for {}", task.fasta.display()))?;

    if task.outpath.is_none() {
        table::write_tsv(std::io::stdout().lock(), out.records).context("writing table to stdout")?;
    }
    info!("TAL finding task completed successfully!");
    Ok(())
}
