//! Sequence input for **FASTA / FASTQ / gzipped** files.
//!
//! ### Design
//! - Parsed with `needletail`, which sniffs the format and compression.
//! - Only the **first** record is used; later records are ignored.
//! - The record id is the first whitespace-delimited token of the header.
//!
//! ### Errors
//! Missing files, parse failures, files without records and invalid bases all
//! surface as [`TalenError::Input`] before any enumeration runs.
//!
//! ### Example
//! ```no_run
//! let seq = talenwf::seqio::read_first_record("target.fa").unwrap();
//! println!("{} ({} bp)", seq.id(), seq.len());
//! ```
use std::path::Path;

use needletail::parse_fastx_file;

use crate::error::{Result, TalenError};
use crate::sequence::Sequence;

/// Read the first record of `path` into a validated [`Sequence`].
pub fn read_first_record<P: AsRef<Path>>(path: P) -> Result<Sequence> {
    let p = path.as_ref();
    if !p.exists() {
        return Err(TalenError::input(p, "file not found"));
    }
    let mut reader = parse_fastx_file(p).map_err(|e| TalenError::input(p, e.to_string()))?;
    let record = match reader.next() {
        Some(Ok(rec)) => rec,
        Some(Err(e)) => return Err(TalenError::input(p, e.to_string())),
        None => return Err(TalenError::input(p, "no sequence records")),
    };
    let id = record_id(record.id());
    Sequence::new(id, &record.seq()).map_err(|e| TalenError::input(p, e.to_string()))
}

fn record_id(header: &[u8]) -> String {
    let header = String::from_utf8_lossy(header);
    header.split_whitespace().next().unwrap_or_default().to_string()
}
