//! End-to-end run: read the first FASTA record, enumerate candidates, write
//! the table.
//!
//! Upstream bases are independent, so with more than one base and more than one
//! thread they are enumerated on a local Rayon pool. Results are concatenated in
//! configuration order, identical to the sequential output.
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::config::{Nucleotide, TalenConfig};
use crate::enumerate::{Candidates, PairSites};
use crate::error::{Result, TalenError};
use crate::record::CandidateRecord;
use crate::sequence::Sequence;
use crate::{seqio, table};

/// Counts describing one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub sequence_id: String,
    pub sequence_length: usize,
    pub min_dist: usize,
    pub max_dist: usize,
    pub filter_base: Option<usize>,
    /// Candidates found per upstream base, in configuration order.
    pub per_base: Vec<(Nucleotide, usize)>,
    pub total: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_base = self
            .per_base
            .iter()
            .map(|(b, n)| format!("{b}={n}"))
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "{} ({} bp): {} candidates [{}] dist={}..={}",
            self.sequence_id, self.sequence_length, self.total, per_base, self.min_dist, self.max_dist
        )?;
        if let Some(fb) = self.filter_base {
            write!(f, " cut_site={fb}")?;
        }
        Ok(())
    }
}

/// Records plus the summary of a finished run.
#[derive(Clone, Debug)]
pub struct TaskOutput {
    pub records: Vec<CandidateRecord>,
    pub summary: RunSummary,
}

/// Enumerate every candidate, grouped by upstream base in configuration order.
///
/// `threads = None` uses all logical cores; `Some(1)` stays on the caller's
/// thread.
pub fn collect_per_base(
    seq: &Sequence,
    cfg: &TalenConfig,
    threads: Option<usize>,
) -> Result<Vec<(Nucleotide, Vec<CandidateRecord>)>> {
    let enumerate = |b: Nucleotide| (b, Candidates::new(seq, PairSites::for_base(seq, cfg, b)).collect::<Vec<_>>());

    let n = threads.unwrap_or_else(num_cpus::get).max(1);
    if n == 1 || cfg.upstream_bases.len() < 2 {
        return Ok(cfg.upstream_bases.iter().map(|&b| enumerate(b)).collect());
    }
    let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
    Ok(pool.install(|| cfg.upstream_bases.par_iter().map(|&b| enumerate(b)).collect()))
}

/// A configured run over one FASTA file.
#[derive(Clone, Debug)]
pub struct TalTask {
    pub fasta: PathBuf,
    pub config: TalenConfig,
    /// Where to write the TSV table; nothing is written when `None`.
    pub outpath: Option<PathBuf>,
    pub threads: Option<usize>,
    /// Log configuration problems instead of rejecting the run.
    pub lenient: bool,
}

impl TalTask {
    pub fn new(fasta: impl Into<PathBuf>, config: TalenConfig) -> Self {
        Self { fasta: fasta.into(), config, outpath: None, threads: Some(1), lenient: false }
    }

    pub fn with_outpath(mut self, outpath: impl Into<PathBuf>) -> Self {
        self.outpath = Some(outpath.into());
        self
    }

    pub fn run(&self) -> Result<TaskOutput> {
        if let Err(problems) = self.config.validate() {
            if !self.lenient {
                return Err(TalenError::Config(problems));
            }
            for p in &problems {
                warn!("{p}; continuing, affected loops will be empty");
            }
        }

        info!("Processing FASTA file: {}", self.fasta.display());
        let seq = seqio::read_first_record(&self.fasta)?;
        info!("First sequence: {} (length: {})", seq.id(), seq.len());

        let g = self.config.geometry();
        debug!(
            "min_dist={} max_dist={} spacers={}..={} filter_base={:?} upstream_bases={:?}",
            g.min_dist, g.max_dist, g.min_spacer, g.max_spacer, self.config.filter_base, self.config.upstream_bases
        );

        let groups = collect_per_base(&seq, &self.config, self.threads)?;
        let per_base: Vec<(Nucleotide, usize)> = groups.iter().map(|(b, r)| (*b, r.len())).collect();
        let records: Vec<CandidateRecord> = groups.into_iter().flat_map(|(_, r)| r).collect();

        if let Some(out) = &self.outpath {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let n = table::write_tsv(BufWriter::new(File::create(out)?), records.iter().cloned())?;
            info!("Wrote {} rows to {}", n, out.display());
        }

        let summary = RunSummary {
            sequence_id: seq.id().to_string(),
            sequence_length: seq.len(),
            min_dist: g.min_dist,
            max_dist: g.max_dist,
            filter_base: self.config.filter_base,
            total: records.len(),
            per_base,
        };
        info!("{summary}");
        Ok(TaskOutput { records, summary })
    }
}
