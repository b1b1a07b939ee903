//! Simulation driver.
//!
//! A [`Simulator`] owns one [`Cache`] and one set of [`Counters`] for the
//! length of a run. It starts idle, advances one record per
//! [`Simulator::step`], and is consumed by [`Simulator::run`] or
//! [`Simulator::run_with`], which hand back the final counters. Once a run
//! has finished there is no simulator left to mutate.

use std::fmt;

use crate::cache::{AccessOutcome, Cache};
use crate::common::error::CacheError;
use crate::config::Geometry;
use crate::stats::Counters;
use crate::trace::{AccessKind, TraceRecord};

/// What the cache saw for one trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Instruction fetch; the cache was not touched.
    Ignored,
    /// Load or store.
    Single(AccessOutcome),
    /// Modify: the load, then the store to the same address.
    Modify(AccessOutcome, AccessOutcome),
}

impl Dispatch {
    /// Outcomes in the order the accesses were made.
    pub fn outcomes(&self) -> impl Iterator<Item = AccessOutcome> {
        let (first, second) = match *self {
            Dispatch::Ignored => (None, None),
            Dispatch::Single(o) => (Some(o), None),
            Dispatch::Modify(a, b) => (Some(a), Some(b)),
        };
        first.into_iter().chain(second)
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for outcome in self.outcomes() {
            write!(f, "{}{}", sep, outcome)?;
            sep = " ";
        }
        Ok(())
    }
}

pub struct Simulator {
    cache: Cache,
    counters: Counters,
}

impl Simulator {
    /// Builds an idle simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheError`] from [`Cache::new`].
    pub fn new(geometry: &Geometry) -> Result<Self, CacheError> {
        Ok(Self {
            cache: Cache::new(geometry)?,
            counters: Counters::new(),
        })
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Counters accumulated so far.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Replays one record against the cache and counts its accesses.
    pub fn step(&mut self, record: &TraceRecord) -> Dispatch {
        let Self { cache, counters } = self;
        let mut access = |address| {
            let outcome = cache.access(address);
            counters.record(outcome);
            outcome
        };

        match record.kind {
            AccessKind::Instruction => Dispatch::Ignored,
            AccessKind::Load | AccessKind::Store => Dispatch::Single(access(record.address)),
            AccessKind::Modify => {
                let load = access(record.address);
                let store = access(record.address);
                Dispatch::Modify(load, store)
            }
        }
    }

    /// Replays every record and returns the final counters.
    pub fn run<I>(self, records: I) -> Counters
    where
        I: IntoIterator<Item = TraceRecord>,
    {
        self.run_with(records, |_, _| {})
    }

    /// Like [`Simulator::run`], calling `observer` after each record.
    ///
    /// # Arguments
    ///
    /// * `records` - Trace records in program order.
    /// * `observer` - Receives each record together with what the cache did
    ///   for it.
    pub fn run_with<I, F>(mut self, records: I, mut observer: F) -> Counters
    where
        I: IntoIterator<Item = TraceRecord>,
        F: FnMut(&TraceRecord, &Dispatch),
    {
        let mut replayed = 0usize;
        for record in records {
            let dispatch = self.step(&record);
            observer(&record, &dispatch);
            replayed += 1;
        }
        log::debug!("replayed {} records: {}", replayed, self.counters);
        self.counters
    }
}
