//! Set-associative cache model.
//!
//! The cache holds `2^s` [`CacheSet`]s of `E` lines each and tracks only
//! validity, tag, and recency. Replacement is least-recently-used, see
//! [`set`] for how recency is kept.

pub mod set;

pub use self::set::{CacheLine, CacheSet};

use std::fmt;

use crate::common::error::CacheError;
use crate::config::Geometry;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    Hit,
    /// Cold or capacity miss that found a free line.
    Miss,
    /// Miss that had to replace a valid line.
    MissEviction,
}

impl AccessOutcome {
    pub fn is_hit(self) -> bool {
        self == AccessOutcome::Hit
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOutcome::Hit => write!(f, "hit"),
            AccessOutcome::Miss => write!(f, "miss"),
            AccessOutcome::MissEviction => write!(f, "miss eviction"),
        }
    }
}

pub struct Cache {
    geometry: Geometry,
    sets: Vec<CacheSet>,
}

impl Cache {
    /// Allocates `2^s` sets of `E` invalid lines.
    ///
    /// # Errors
    ///
    /// * [`CacheError::NoSets`] if `2^s` does not fit in `usize`.
    /// * [`CacheError::NoWays`] if `E` is zero.
    /// * [`CacheError::TooLarge`] if the line array cannot be allocated.
    pub fn new(geometry: &Geometry) -> Result<Self, CacheError> {
        let num_sets = geometry.num_sets().ok_or(CacheError::NoSets {
            set_bits: geometry.set_bits(),
        })?;
        let ways = geometry.ways();
        if ways == 0 {
            return Err(CacheError::NoWays);
        }
        let too_large = || CacheError::TooLarge {
            set_bits: geometry.set_bits(),
            ways,
        };
        num_sets.checked_mul(ways).ok_or_else(too_large)?;

        log::debug!(
            "cache: {} sets x {} ways, {}-byte blocks",
            num_sets,
            ways,
            geometry.block_size()
        );

        let mut sets = Vec::new();
        sets.try_reserve_exact(num_sets).map_err(|_| too_large())?;
        for _ in 0..num_sets {
            sets.push(CacheSet::try_new(ways).map_err(|_| too_large())?);
        }

        Ok(Self {
            geometry: *geometry,
            sets,
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Whether `address` is resident. Does not update recency.
    pub fn contains(&self, address: u64) -> bool {
        let parts = self.geometry.decompose(address);
        self.sets[parts.set_index as usize].find(parts.tag).is_some()
    }

    /// Simulates one access to `address`.
    pub fn access(&mut self, address: u64) -> AccessOutcome {
        let parts = self.geometry.decompose(address);
        let outcome = self.sets[parts.set_index as usize].access(parts.tag);
        log::trace!(
            "access {:#x}: set={} tag={:#x} -> {}",
            address,
            parts.set_index,
            parts.tag,
            outcome
        );
        outcome
    }
}
