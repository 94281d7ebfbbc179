//! Pair enumeration in both modes.
//!
//! - **Unfiltered**: every anchor pair from [`PositionScanner`] is expanded over
//!   all spacer lengths and all cut sites between the anchors.
//! - **Filtered**: the cut site is fixed; anchors are looked up in two windows
//!   placed symmetrically around it.
//!
//! Both are lazy. Upstream bases are processed in configuration order.
use crate::config::{Geometry, Nucleotide, TalenConfig, MAX_COORDINATE};
use crate::record::{build_record, CandidateRecord};
use crate::scan::{AnchorPair, PositionScanner};
use crate::sequence::Sequence;

/// One fully specified candidate before substrings are extracted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairSite {
    pub cut: usize,
    /// Index of the upstream anchor base (just before TAL1).
    pub up: usize,
    /// Index of the downstream anchor base (just after TAL2).
    pub down: usize,
    pub spacer: usize,
    /// The anchor base this site was found for.
    pub upstream: Nucleotide,
}

/// Expand one anchor pair: spacer lengths outer, cut sites inner.
///
/// Cut sites run over `[up + min_dist/2, down - min_dist/2)`.
pub fn expand_anchor_pair(
    geometry: Geometry,
    upstream: Nucleotide,
    pair: AnchorPair,
) -> impl Iterator<Item = PairSite> {
    let half = geometry.min_dist / 2;
    let (lo, hi) = (pair.up + half, pair.down.saturating_sub(half));
    geometry.spacers().flat_map(move |spacer| {
        (lo..hi).map(move |cut| PairSite { cut, up: pair.up, down: pair.down, spacer, upstream })
    })
}

/// Search windows around a fixed cut site. Bounds are half-open.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FilterWindow {
    pub up_lo: i64,
    pub up_hi: i64,
    pub down_lo: i64,
    pub down_hi: i64,
}

impl FilterWindow {
    /// `None` when `filter_base` is too close to either end of a sequence of
    /// length `len` for any pair to fit.
    pub fn new(filter_base: usize, geometry: Geometry, len: usize) -> Option<Self> {
        if filter_base > MAX_COORDINATE || geometry.max_dist > MAX_COORDINATE || len > MAX_COORDINATE {
            return None;
        }
        let fb = filter_base as i64;
        let (min_d, max_d) = (geometry.min_dist as i64, geometry.max_dist as i64);
        let down_hi = fb + (max_d + 1) / 2 + 1;
        if fb - max_d / 2 < 0 || down_hi > len as i64 {
            return None;
        }
        Some(Self {
            up_lo: fb - max_d / 2 - 1,
            up_hi: fb - min_d / 2 - 1,
            down_lo: fb + (min_d + 1) / 2,
            down_hi,
        })
    }
}

/// Indices in `[lo, hi)` holding `base`; negative indices never match.
fn positions_of(bases: &[u8], base: Nucleotide, lo: i64, hi: i64) -> Vec<usize> {
    let lo = lo.clamp(0, bases.len() as i64) as usize;
    let hi = hi.clamp(0, bases.len() as i64) as usize;
    if lo >= hi {
        return Vec::new();
    }
    let b = base.as_byte();
    (lo..hi).filter(|&i| bases[i] == b).collect()
}

/// All sites anchored at `filter_base` for one upstream base: upstream
/// positions outer, downstream positions middle, spacer lengths inner.
pub fn filtered_sites(
    bases: &[u8],
    geometry: Geometry,
    upstream: Nucleotide,
    filter_base: usize,
) -> impl Iterator<Item = PairSite> {
    let (ups, downs) = match FilterWindow::new(filter_base, geometry, bases.len()) {
        Some(w) => (
            positions_of(bases, upstream, w.up_lo, w.up_hi),
            positions_of(bases, upstream.complement(), w.down_lo, w.down_hi),
        ),
        None => (Vec::new(), Vec::new()),
    };
    ups.into_iter().flat_map(move |up| {
        let downs = downs.clone();
        downs.into_iter().flat_map(move |down| {
            geometry.spacers().map(move |spacer| PairSite { cut: filter_base, up, down, spacer, upstream })
        })
    })
}

/// Unfiltered sites for one upstream base.
pub fn scanned_sites(
    bases: &[u8],
    geometry: Geometry,
    upstream: Nucleotide,
) -> impl Iterator<Item = PairSite> + '_ {
    PositionScanner::new(bases, upstream, geometry.min_dist, geometry.max_dist)
        .flat_map(move |pair| expand_anchor_pair(geometry, upstream, pair))
}

/// Lazy stream of [`PairSite`]s over every configured upstream base.
pub struct PairSites<'a> {
    inner: Box<dyn Iterator<Item = PairSite> + 'a>,
}

impl<'a> PairSites<'a> {
    pub fn new(seq: &'a Sequence, cfg: &TalenConfig) -> Self {
        let inner = cfg
            .upstream_bases
            .clone()
            .into_iter()
            .flat_map(sites_for_base(seq, cfg));
        Self { inner: Box::new(inner) }
    }

    /// Sites for a single upstream base, ignoring `cfg.upstream_bases`.
    pub fn for_base(seq: &'a Sequence, cfg: &TalenConfig, upstream: Nucleotide) -> Self {
        Self { inner: sites_for_base(seq, cfg)(upstream) }
    }
}

fn sites_for_base<'a>(
    seq: &'a Sequence,
    cfg: &TalenConfig,
) -> impl Fn(Nucleotide) -> Box<dyn Iterator<Item = PairSite> + 'a> {
    let geometry = cfg.geometry();
    let filter_base = cfg.filter_base;
    move |upstream| match filter_base {
        Some(fb) => Box::new(filtered_sites(seq.bases(), geometry, upstream, fb)),
        None => Box::new(scanned_sites(seq.bases(), geometry, upstream)),
    }
}

impl Iterator for PairSites<'_> {
    type Item = PairSite;
    fn next(&mut self) -> Option<PairSite> {
        self.inner.next()
    }
}

/// Lazy stream of [`CandidateRecord`]s; see [`crate::find_tal_pairs`].
pub struct Candidates<'a> {
    seq: &'a Sequence,
    sites: PairSites<'a>,
}

impl<'a> Candidates<'a> {
    pub fn new(seq: &'a Sequence, sites: PairSites<'a>) -> Self {
        Self { seq, sites }
    }
}

impl Iterator for Candidates<'_> {
    type Item = CandidateRecord;
    fn next(&mut self) -> Option<CandidateRecord> {
        self.sites.next().map(|site| build_record(self.seq, &site))
    }
}
