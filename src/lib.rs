#![forbid(unsafe_code)]
//! # talenwf
//!
//! TALEN window finder: enumerate candidate **TAL1 / TAL2** target-site pairs in
//! a DNA sequence. Each candidate is an upstream anchor base, a TAL1 window, a
//! spacer, a TAL2 window and the complementary downstream anchor base, within
//! configurable array and spacer length bounds.
//!
//! ## Modes
//! - **Unfiltered**: one linear scan with a lookback queue of upstream anchors;
//!   every anchor pair is expanded over all spacer lengths and cut sites.
//! - **Filtered**: a single cut site is fixed and anchors are searched in two
//!   windows placed symmetrically around it.
//!
//! Enumeration is lazy and a pure function of its inputs; it never logs or
//! touches the filesystem. [`task::TalTask`] wires it to FASTA input and TSV
//! output.
//!
//! ## Examples
//! ```rust
//! use talenwf::{find_tal_pairs, Sequence, TalenConfig};
//! let bases = format!("{}{}{}", "T".repeat(20), "C".repeat(21), "A".repeat(20));
//! let seq = Sequence::new("demo", bases.as_bytes()).unwrap();
//! let cfg = TalenConfig { filter_base: Some(31), ..TalenConfig::default() };
//! let first = find_tal_pairs(&seq, &cfg).next().unwrap();
//! assert_eq!(first.cut_site, 31);
//! assert!(first.plus_strand_sequence.starts_with("T "));
//! ```

pub mod config;
pub mod enumerate;
pub mod error;
pub mod record;
pub mod scan;
pub mod seqio;
pub mod sequence;
pub mod table;
pub mod task;

pub use config::{parse_upstream_bases, Geometry, Nucleotide, TalenConfig, MAX_COORDINATE};
pub use enumerate::{Candidates, PairSite, PairSites};
pub use error::{ConfigError, TalenError};
pub use record::{CandidateRecord, COLUMNS};
pub use sequence::Sequence;

/// Lazily enumerate every candidate record for `seq` under `cfg`.
///
/// The configuration is not validated here; inverted ranges simply yield
/// nothing. Use [`TalenConfig::validate`] first to reject them.
pub fn find_tal_pairs<'a>(seq: &'a Sequence, cfg: &TalenConfig) -> Candidates<'a> {
    Candidates::new(seq, PairSites::new(seq, cfg))
}

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod pair_invariant_tests {
    use super::*;
    use crate::record::TalWindows;

    fn tca() -> Sequence {
        let bases = format!("{}{}{}", "T".repeat(20), "C".repeat(21), "A".repeat(20));
        Sequence::new("test_10400_T", bases.as_bytes()).unwrap()
    }

    fn mixed() -> Sequence {
        let bases = "ATGCTTGACCTAGGTTACGGATCCATTGACTTAAGCTAGTCAGGTACCTTGAATTCGATCAGTACGTTAACG\
                     GCTTACAGTTCGATAAGGCTTCAAGTCTAGATTGCATGACCTGAAGTTAGCAACGTAATCGCATGTA";
        Sequence::new("mixed", bases.as_bytes()).unwrap()
    }

    #[test]
    fn filtered_example_produces_candidates() {
        let cfg = TalenConfig { filter_base: Some(31), ..TalenConfig::default() };
        let recs: Vec<_> = find_tal_pairs(&tca(), &cfg).collect();
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|r| r.sequence_name == "test_10400_T"));
        assert!(recs.iter().all(|r| r.plus_strand_sequence.starts_with("T ")));
        assert!(recs.iter().all(|r| r.plus_strand_sequence.ends_with(" A")));
    }

    #[test]
    fn filter_too_close_to_left_edge_is_empty() {
        let cfg = TalenConfig { filter_base: Some(5), ..TalenConfig::default() };
        assert_eq!(find_tal_pairs(&tca(), &cfg).count(), 0);
    }

    #[test]
    fn anchors_are_base_and_complement() {
        let s = mixed();
        let cfg = TalenConfig {
            min_spacer: 4,
            max_spacer: 6,
            array_min: 5,
            array_max: 8,
            filter_base: None,
            upstream_bases: vec![Nucleotide::T, Nucleotide::C],
        };
        let g = cfg.geometry();
        let mut n = 0;
        for site in PairSites::new(&s, &cfg) {
            assert_eq!(s.bases()[site.up], site.upstream.as_byte());
            assert_eq!(s.bases()[site.down], site.upstream.complement().as_byte());
            let d = site.down - site.up;
            assert!(d >= g.min_dist && d <= g.max_dist);
            assert!((cfg.min_spacer..=cfg.max_spacer).contains(&site.spacer));
            let w = TalWindows::of(&site);
            let r = record::build_record(&s, &site);
            assert!(w.tal1_end >= w.tal1_start && w.tal2_end >= w.tal2_start);
            assert_eq!(r.tal1_length as i64, w.tal1_end - w.tal1_start);
            assert_eq!(r.tal2_length as i64, w.tal2_end - w.tal2_start);
            assert_eq!(r.tal2_start, site.down as i64 - 1);
            n += 1;
        }
        assert!(n > 0);
    }

    #[test]
    fn enumeration_is_idempotent() {
        let s = mixed();
        let cfg = TalenConfig { min_spacer: 3, max_spacer: 5, array_min: 4, array_max: 7, ..TalenConfig::default() };
        let a: Vec<_> = find_tal_pairs(&s, &cfg).collect();
        let b: Vec<_> = find_tal_pairs(&s, &cfg).collect();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn filtered_sites_stay_near_the_cut() {
        let s = mixed();
        let cfg = TalenConfig {
            min_spacer: 4,
            max_spacer: 6,
            array_min: 5,
            array_max: 8,
            filter_base: Some(60),
            upstream_bases: vec![Nucleotide::T, Nucleotide::A],
        };
        let g = cfg.geometry();
        let sites: Vec<_> = PairSites::new(&s, &cfg).collect();
        assert!(!sites.is_empty());
        for p in &sites {
            assert_eq!(p.cut, 60);
            assert!(p.up < 60 && p.down > 60);
            assert_eq!(s.bases()[p.up], p.upstream.as_byte());
            assert_eq!(s.bases()[p.down], p.upstream.complement().as_byte());
            // the window is half-open on a +1 widened range, hence max_dist + 1
            let d = p.down - p.up;
            assert!(d >= g.min_dist && d <= g.max_dist + 1, "{p:?}");
        }
    }

    #[test]
    fn early_stop_is_allowed() {
        let cfg = TalenConfig::default();
        let seq = tca();
        let mut it = find_tal_pairs(&seq, &cfg);
        let first = it.next();
        assert!(first.is_some());
        drop(it);
        let again = find_tal_pairs(&tca(), &cfg).next();
        assert_eq!(first, again);
    }

    #[test]
    fn sequence_shorter_than_min_dist_is_empty() {
        let s = Sequence::new("short", b"TTTTTCCCCCAAAAA").unwrap();
        assert_eq!(find_tal_pairs(&s, &TalenConfig::default()).count(), 0);
    }
}
