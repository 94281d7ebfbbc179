//! The immutable input sequence.
use thiserror::Error;

use crate::config::Nucleotide;

/// Why raw bases were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("sequence {0:?} is empty")]
    Empty(String),
    #[error("sequence {id:?} contains {base:?} at position {pos}; only A, C, G, T are allowed")]
    InvalidBase { id: String, base: char, pos: usize },
}

/// An uppercase nucleotide string with its identifier. Never mutated after load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    id: String,
    bases: Vec<u8>,
}

impl Sequence {
    /// Upper-case `raw` and check it only contains A, C, G, T.
    ///
    /// # Examples
    /// ```
    /// let s = talenwf::Sequence::new("chr1", b"acgT").unwrap();
    /// assert_eq!(s.bases(), b"ACGT");
    /// assert!(talenwf::Sequence::new("x", b"ACNT").is_err());
    /// ```
    pub fn new(id: impl Into<String>, raw: &[u8]) -> Result<Self, SequenceError> {
        let id = id.into();
        if raw.is_empty() {
            return Err(SequenceError::Empty(id));
        }
        let bases = raw.to_ascii_uppercase();
        if !bio::alphabets::dna::alphabet().is_word(&bases) {
            if let Some(pos) = bases.iter().position(|&b| Nucleotide::from_byte(b).is_none()) {
                return Err(SequenceError::InvalidBase { id, base: bases[pos] as char, pos });
            }
        }
        Ok(Self { id, bases })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Substring `[start, end)` with both ends clamped to the sequence; an
    /// inverted window is empty.
    pub fn window(&self, start: i64, end: i64) -> &str {
        let len = self.bases.len() as i64;
        let s = start.clamp(0, len) as usize;
        let e = end.clamp(0, len) as usize;
        if s >= e {
            return "";
        }
        // Only ASCII ACGT is ever stored.
        std::str::from_utf8(&self.bases[s..e]).unwrap_or_default()
    }

    /// Base at `pos` as a char, or an empty string past the end.
    pub fn base_at(&self, pos: usize) -> &str {
        self.window(pos as i64, pos as i64 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_foreign_bases() {
        assert_eq!(Sequence::new("e", b""), Err(SequenceError::Empty("e".into())));
        match Sequence::new("s", b"ACGTN") {
            Err(SequenceError::InvalidBase { base, pos, .. }) => {
                assert_eq!(base, 'N');
                assert_eq!(pos, 4);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Sequence::new("s", b"AC-T").is_err());
    }

    #[test]
    fn window_clamps_and_never_panics() {
        let s = Sequence::new("s", b"ACGTACGT").unwrap();
        assert_eq!(s.window(1, 4), "CGT");
        assert_eq!(s.window(-3, 2), "AC");
        assert_eq!(s.window(6, 100), "GT");
        assert_eq!(s.window(5, 2), "");
        assert_eq!(s.base_at(0), "A");
        assert_eq!(s.base_at(8), "");
    }
}
