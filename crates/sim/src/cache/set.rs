//! A single cache set and its recency-ordered replacement.
//!
//! Every line carries a recency stamp. Touching or filling a line gives it
//! one more than the largest stamp currently in the set, so within a set the
//! most recently used line always holds the maximum and the least recently
//! used line always holds the minimum. Evicting the minimum is therefore LRU.
//!
//! Stamps are only ever compared inside one set; there is no global clock.

use std::collections::TryReserveError;

use super::AccessOutcome;

/// Metadata for one cache line. No block data is stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    valid: bool,
    tag: u64,
    recency: u64,
}

impl CacheLine {
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline(always)]
    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// Recency stamp; larger means more recently used.
    #[inline(always)]
    pub fn recency(&self) -> u64 {
        self.recency
    }

    #[inline(always)]
    fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// `E` lines sharing one set index.
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    /// Like [`CacheSet::new`], but reports a failed allocation instead of
    /// aborting.
    pub fn try_new(ways: usize) -> Result<Self, TryReserveError> {
        let mut lines = Vec::new();
        lines.try_reserve_exact(ways)?;
        lines.resize(ways, CacheLine::default());
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Returns the way holding `tag`, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(tag))
    }

    fn first_invalid(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.valid)
    }

    fn max_recency(&self) -> u64 {
        self.lines.iter().map(|line| line.recency).max().unwrap_or(0)
    }

    /// Way with the strictly smallest recency; ties go to the lowest way.
    fn victim(&self) -> usize {
        let mut victim = 0;
        let mut min = self.lines[0].recency;
        for (way, line) in self.lines.iter().enumerate().skip(1) {
            if line.recency < min {
                min = line.recency;
                victim = way;
            }
        }
        victim
    }

    fn touch(&mut self, way: usize) {
        self.lines[way].recency = self.max_recency() + 1;
    }

    /// Looks up `tag`, filling or replacing a line on a miss.
    ///
    /// # Arguments
    ///
    /// * `tag` - Tag bits of the accessed address.
    ///
    /// # Returns
    ///
    /// * `Hit` - a valid line already held `tag`.
    /// * `Miss` - `tag` was installed in the lowest-numbered invalid line.
    /// * `MissEviction` - the set was full and the least recently used line
    ///   was overwritten. Its valid bit is left set.
    pub fn access(&mut self, tag: u64) -> AccessOutcome {
        if let Some(way) = self.find(tag) {
            self.touch(way);
            return AccessOutcome::Hit;
        }

        let (way, outcome) = match self.first_invalid() {
            Some(way) => (way, AccessOutcome::Miss),
            None => (self.victim(), AccessOutcome::MissEviction),
        };

        self.lines[way].valid = true;
        self.lines[way].tag = tag;
        self.touch(way);
        outcome
    }
}
