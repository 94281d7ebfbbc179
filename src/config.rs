//! Core configuration types: **nucleotides**, the **search configuration** and
//! the **anchor geometry** derived from it.
//!
//! The derived distances bound how far apart the two anchor bases of a TALEN
//! pair may sit:
//!
//! ```text
//! max_dist = 2 * array_max + max_spacer
//! min_dist = 2 * array_min + min_spacer
//! ```
//!
//! # Examples
//! ```
//! use talenwf::{TalenConfig, Nucleotide};
//! let cfg = TalenConfig::default();
//! assert_eq!(cfg.upstream_bases, vec![Nucleotide::T]);
//! let g = cfg.geometry();
//! assert_eq!((g.min_dist, g.max_dist), (42, 54));
//! ```
use core::fmt;
use core::str::FromStr;

use crate::error::ConfigError;

/// One of the four DNA bases an anchor can be drawn from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    /// Uppercase ASCII byte for this base.
    pub fn as_byte(self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::C => b'C',
            Nucleotide::G => b'G',
            Nucleotide::T => b'T',
        }
    }

    /// Parse an ASCII byte, case-insensitive. Anything outside ACGT is `None`.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b.to_ascii_uppercase() {
            b'A' => Some(Nucleotide::A),
            b'C' => Some(Nucleotide::C),
            b'G' => Some(Nucleotide::G),
            b'T' => Some(Nucleotide::T),
            _ => None,
        }
    }

    /// Watson-Crick complement; the downstream anchor for an upstream base.
    pub fn complement(self) -> Self {
        match self {
            Nucleotide::A => Nucleotide::T,
            Nucleotide::C => Nucleotide::G,
            Nucleotide::G => Nucleotide::C,
            Nucleotide::T => Nucleotide::A,
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

impl FromStr for Nucleotide {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.as_bytes() {
            [b] => Nucleotide::from_byte(*b).ok_or_else(|| ConfigError::UnknownBase(t.to_string())),
            _ => Err(ConfigError::UnknownBase(t.to_string())),
        }
    }
}

/// Parse a comma-separated list such as `"T,A"`.
///
/// Returns the bases that parsed, in order, together with a problem for every
/// entry that did not. Empty entries (`"T,,A"`) are ignored.
pub fn parse_upstream_bases(list: &str) -> (Vec<Nucleotide>, Vec<ConfigError>) {
    let mut bases = Vec::new();
    let mut problems = Vec::new();
    for tok in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match tok.parse::<Nucleotide>() {
            Ok(n) => bases.push(n),
            Err(e) => problems.push(e),
        }
    }
    (bases, problems)
}

/// Largest distance or cut-site index a configuration may produce.
pub const MAX_COORDINATE: usize = (i64::MAX / 4) as usize;

fn span(array: usize, spacer: usize) -> Option<usize> {
    array.checked_mul(2)?.checked_add(spacer).filter(|&d| d <= MAX_COORDINATE)
}

/// Search configuration for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TalenConfig {
    /// Shortest spacer between TAL1 and TAL2.
    pub min_spacer: usize,
    /// Longest spacer between TAL1 and TAL2.
    pub max_spacer: usize,
    /// Shortest TAL array (binding window).
    pub array_min: usize,
    /// Longest TAL array (binding window).
    pub array_max: usize,
    /// When set, only pairs designed around this cut-site index are reported.
    pub filter_base: Option<usize>,
    /// Bases considered as the 5' anchor, processed in this order.
    pub upstream_bases: Vec<Nucleotide>,
}

impl Default for TalenConfig {
    fn default() -> Self {
        Self {
            min_spacer: 14,
            max_spacer: 18,
            array_min: 14,
            array_max: 18,
            filter_base: None,
            upstream_bases: vec![Nucleotide::T],
        }
    }
}

impl TalenConfig {
    /// Distances derived from the array and spacer bounds, capped at
    /// [`MAX_COORDINATE`].
    pub fn geometry(&self) -> Geometry {
        Geometry {
            min_spacer: self.min_spacer,
            max_spacer: self.max_spacer,
            min_dist: span(self.array_min, self.min_spacer).unwrap_or(MAX_COORDINATE),
            max_dist: span(self.array_max, self.max_spacer).unwrap_or(MAX_COORDINATE),
        }
    }

    /// Check every constraint and return all problems at once.
    ///
    /// Enumeration itself never fails on a bad configuration: inverted ranges
    /// just produce empty loops. Callers decide whether to reject or warn.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut problems = Vec::new();
        for (name, v) in [
            ("min_spacer", self.min_spacer),
            ("max_spacer", self.max_spacer),
            ("array_min", self.array_min),
            ("array_max", self.array_max),
        ] {
            if v == 0 {
                problems.push(ConfigError::NotPositive { name });
            }
        }
        if self.min_spacer > self.max_spacer {
            problems.push(ConfigError::InvertedSpacer { min: self.min_spacer, max: self.max_spacer });
        }
        if self.array_min > self.array_max {
            problems.push(ConfigError::InvertedArray { min: self.array_min, max: self.array_max });
        }
        if self.upstream_bases.is_empty() {
            problems.push(ConfigError::NoUpstreamBases);
        }
        if span(self.array_min, self.min_spacer).is_none() {
            problems.push(ConfigError::TooLarge { name: "min_dist", max: MAX_COORDINATE });
        }
        if span(self.array_max, self.max_spacer).is_none() {
            problems.push(ConfigError::TooLarge { name: "max_dist", max: MAX_COORDINATE });
        }
        if self.filter_base.is_some_and(|fb| fb > MAX_COORDINATE) {
            problems.push(ConfigError::TooLarge { name: "filter_base", max: MAX_COORDINATE });
        }
        if problems.is_empty() { Ok(()) } else { Err(problems) }
    }
}

/// Anchor distances and spacer bounds used by the enumerators.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Geometry {
    pub min_spacer: usize,
    pub max_spacer: usize,
    /// Smallest permitted `down_pos - up_pos`.
    pub min_dist: usize,
    /// Largest permitted `down_pos - up_pos`.
    pub max_dist: usize,
}

impl Geometry {
    /// Inclusive range of spacer lengths; empty when the bounds are inverted.
    pub fn spacers(&self) -> core::ops::RangeInclusive<usize> {
        self.min_spacer..=self.max_spacer
    }
}
