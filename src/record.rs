//! Candidate records: the unit of output.
//!
//! A [`PairSite`] is turned into a [`CandidateRecord`] by placing the TAL
//! windows around the cut site:
//!
//! ```text
//! tal1_start = up + 1            tal1_end = cut - spacer/2
//! tal2_start = cut + (spacer+1)/2 - 1   tal2_end = down
//! ```
//!
//! The reported `TAL2 start` is `tal2_end - 1`, the outer boundary of TAL2 on
//! the plus strand, as legacy TALEN tools report it.
use serde::{Deserialize, Serialize};

use crate::enumerate::PairSite;
use crate::sequence::Sequence;

/// Column headers, in output order.
pub const COLUMNS: [&str; 13] = [
    "Sequence Name",
    "Cut Site",
    "TAL1 start",
    "TAL2 start",
    "TAL1 length",
    "TAL2 length",
    "Spacer length",
    "Spacer range",
    "TAL1 RVDs",
    "TAL2 RVDs",
    "Plus strand sequence",
    "Unique RE sites in spacer",
    "% RVDs HD or NN/NH",
];

/// One TALEN pair candidate. Field order matches [`COLUMNS`].
///
/// RVD and restriction-site columns are always empty here; an annotation
/// stage downstream may fill them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(rename = "Sequence Name")]
    pub sequence_name: String,
    #[serde(rename = "Cut Site")]
    pub cut_site: usize,
    #[serde(rename = "TAL1 start")]
    pub tal1_start: usize,
    #[serde(rename = "TAL2 start")]
    pub tal2_start: i64,
    #[serde(rename = "TAL1 length")]
    pub tal1_length: usize,
    #[serde(rename = "TAL2 length")]
    pub tal2_length: usize,
    #[serde(rename = "Spacer length")]
    pub spacer_length: usize,
    /// `"<tal1_end>-<tal2_start>"`.
    #[serde(rename = "Spacer range")]
    pub spacer_range: String,
    #[serde(rename = "TAL1 RVDs")]
    pub tal1_rvds: String,
    #[serde(rename = "TAL2 RVDs")]
    pub tal2_rvds: String,
    /// `"<up base> <TAL1> <spacer, lower case> <TAL2> <down base>"`.
    #[serde(rename = "Plus strand sequence")]
    pub plus_strand_sequence: String,
    #[serde(rename = "Unique RE sites in spacer")]
    pub unique_re_sites: String,
    #[serde(rename = "% RVDs HD or NN/NH")]
    pub percent_rvds_hd_nn: String,
}

/// Window boundaries for one site, before clamping to the sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TalWindows {
    pub tal1_start: i64,
    pub tal1_end: i64,
    pub tal2_start: i64,
    pub tal2_end: i64,
}

impl TalWindows {
    pub fn of(site: &PairSite) -> Self {
        let (cut, spacer) = (site.cut as i64, site.spacer as i64);
        Self {
            tal1_start: site.up as i64 + 1,
            tal1_end: cut - spacer / 2,
            tal2_start: cut + (spacer + 1) / 2 - 1,
            tal2_end: site.down as i64,
        }
    }
}

/// Build the output record for `site`.
///
/// Windows are not validated; an inverted window extracts an empty string.
pub fn build_record(seq: &Sequence, site: &PairSite) -> CandidateRecord {
    let w = TalWindows::of(site);
    let tal1 = seq.window(w.tal1_start, w.tal1_end);
    let tal2 = seq.window(w.tal2_start, w.tal2_end);
    let spacer = seq.window(w.tal1_end, w.tal2_start);

    let plus_strand_sequence = format!(
        "{} {} {} {} {}",
        seq.base_at(site.up),
        tal1,
        spacer.to_ascii_lowercase(),
        tal2,
        seq.base_at(site.down)
    );

    CandidateRecord {
        sequence_name: seq.id().to_string(),
        cut_site: site.cut,
        tal1_start: site.up + 1,
        tal2_start: w.tal2_end - 1,
        tal1_length: tal1.len(),
        tal2_length: tal2.len(),
        spacer_length: site.spacer,
        spacer_range: format!("{}-{}", w.tal1_end, w.tal2_start),
        tal1_rvds: String::new(),
        tal2_rvds: String::new(),
        plus_strand_sequence,
        unique_re_sites: String::new(),
        percent_rvds_hd_nn: String::new(),
    }
}
