//! Hit, miss, and eviction counters and the summary they are reported as.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::cache::AccessOutcome;

/// Default name of the machine-readable results file.
pub const RESULTS_FILE: &str = ".csim_results";

/// Aggregate outcome of a simulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one access outcome. An eviction also counts as a miss.
    pub fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Miss => self.misses += 1,
            AccessOutcome::MissEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total cache accesses counted.
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    /// Writes `"<hits> <misses> <evictions>\n"` to `path`, replacing any
    /// existing file.
    pub fn write_results(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(
            path,
            format!("{} {} {}\n", self.hits, self.misses, self.evictions),
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Prints the summary line to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}
