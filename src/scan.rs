//! Single-pass anchor scan for unfiltered mode.
//!
//! Walks the sequence once, remembering every upstream-base index in a
//! monotonic queue. Whenever the complement base shows up at `j`, anchors older
//! than `j - max_dist` are evicted from the front and every remaining anchor at
//! or before `j - min_dist` is paired with `j`.
//!
//! # Examples
//! ```
//! use talenwf::scan::PositionScanner;
//! use talenwf::Nucleotide;
//! // T at 0 and 2, A at 5; distances 3..=5 accept both.
//! let pairs: Vec<_> = PositionScanner::new(b"TCTCCA", Nucleotide::T, 3, 5).collect();
//! assert_eq!(pairs.len(), 2);
//! assert_eq!((pairs[0].up, pairs[0].down), (0, 5));
//! ```
use crate::config::Nucleotide;

/// Upstream and downstream anchor indices of one candidate pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnchorPair {
    pub up: usize,
    pub down: usize,
}

/// Sorted buffer of anchor indices with O(1) amortized front eviction.
///
/// Indices are only ever appended in increasing order, so the live part
/// `positions[head..]` stays sorted.
#[derive(Debug, Default)]
pub struct AnchorQueue {
    positions: Vec<usize>,
    head: usize,
}

const COMPACT_MIN: usize = 1024;

impl AnchorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an index; must not be smaller than the last one pushed.
    pub fn push(&mut self, pos: usize) {
        debug_assert!(self.positions.last().map_or(true, |&last| last <= pos));
        self.positions.push(pos);
    }

    /// Drop every index strictly below `bound` from the front.
    pub fn evict_below(&mut self, bound: i64) {
        while self.head < self.positions.len() && (self.positions[self.head] as i64) < bound {
            self.head += 1;
        }
        if self.head >= COMPACT_MIN && self.head * 2 >= self.positions.len() {
            self.positions.drain(..self.head);
            self.head = 0;
        }
    }

    /// Indices still in the queue, oldest first.
    pub fn live(&self) -> &[usize] {
        &self.positions[self.head..]
    }

    pub fn len(&self) -> usize {
        self.positions.len() - self.head
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over every `(up, down)` anchor pair with
/// `min_dist <= down - up <= max_dist`, ordered by `down`, then `up`.
#[derive(Debug)]
pub struct PositionScanner<'a> {
    bases: &'a [u8],
    up: u8,
    down: u8,
    min_dist: i64,
    max_dist: i64,
    next_index: usize,
    queue: AnchorQueue,
    /// Downstream index being paired, and the offset into `queue.live()` of the
    /// next anchor to hand out.
    pending: Option<(usize, usize)>,
}

impl<'a> PositionScanner<'a> {
    pub fn new(bases: &'a [u8], upstream: Nucleotide, min_dist: usize, max_dist: usize) -> Self {
        Self {
            bases,
            up: upstream.as_byte(),
            down: upstream.complement().as_byte(),
            min_dist: min_dist as i64,
            max_dist: max_dist as i64,
            next_index: 0,
            queue: AnchorQueue::new(),
            pending: None,
        }
    }
}

impl Iterator for PositionScanner<'_> {
    type Item = AnchorPair;

    fn next(&mut self) -> Option<AnchorPair> {
        loop {
            if let Some((down, offset)) = self.pending {
                let max_allowed = down as i64 - self.min_dist;
                match self.queue.live().get(offset) {
                    Some(&up) if up as i64 <= max_allowed => {
                        self.pending = Some((down, offset + 1));
                        return Some(AnchorPair { up, down });
                    }
                    // queue is sorted: everything after is closer still
                    _ => self.pending = None,
                }
            }

            let j = self.next_index;
            let &b = self.bases.get(j)?;
            self.next_index += 1;
            if b == self.up {
                self.queue.push(j);
            } else if b == self.down {
                self.queue.evict_below(j as i64 - self.max_dist);
                if !self.queue.is_empty() {
                    self.pending = Some((j, 0));
                }
            }
        }
    }
}
