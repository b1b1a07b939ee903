//! Simulation configuration.
//!
//! [`Geometry`] describes the cache shape; [`SimConfig`] adds the trace source
//! and the verbosity flag. Command-line front ends fill a
//! [`SimConfigBuilder`] with whatever options they saw and call
//! [`SimConfigBuilder::build`], which reports the first missing option.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::common::AddressParts;
use crate::common::error::ConfigError;

/// Width of the simulated address space in bits.
pub const ADDRESS_BITS: u32 = u64::BITS;

/// Cache shape: `2^set_bits` sets of `ways` lines, each caching a
/// `2^block_bits`-byte block.
///
/// Fields are only reachable through [`Geometry::new`], which keeps
/// `set_bits + block_bits <= 64`. Deserialization goes through the same
/// check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GeometryFields")]
pub struct Geometry {
    set_bits: u32,
    ways: usize,
    block_bits: u32,
}

/// Unchecked wire form of [`Geometry`].
#[derive(Deserialize)]
struct GeometryFields {
    set_bits: u32,
    ways: usize,
    block_bits: u32,
}

impl TryFrom<GeometryFields> for Geometry {
    type Error = ConfigError;

    fn try_from(fields: GeometryFields) -> Result<Self, Self::Error> {
        Geometry::new(fields.set_bits, fields.ways, fields.block_bits)
    }
}

impl Geometry {
    /// Creates a geometry, rejecting bit counts that do not fit in a 64-bit
    /// address.
    ///
    /// `ways` is not checked here; a zero associativity is a construction
    /// error raised by [`crate::cache::Cache::new`].
    ///
    /// # Arguments
    ///
    /// * `set_bits` - Number of set-index bits (`s`).
    /// * `ways` - Lines per set (`E`).
    /// * `block_bits` - Number of block-offset bits (`b`).
    pub fn new(set_bits: u32, ways: usize, block_bits: u32) -> Result<Self, ConfigError> {
        match set_bits.checked_add(block_bits) {
            Some(width) if width <= ADDRESS_BITS => Ok(Self {
                set_bits,
                ways,
                block_bits,
            }),
            _ => Err(ConfigError::AddressTooWide {
                set_bits,
                block_bits,
            }),
        }
    }

    /// Set-index bit count (`s`).
    pub fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Lines per set (`E`).
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Block-offset bit count (`b`).
    pub fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of sets, `S = 2^s`, or `None` when it does not fit in `usize`.
    pub fn num_sets(&self) -> Option<usize> {
        1usize.checked_shl(self.set_bits)
    }

    /// Block size in bytes, `B = 2^b`.
    ///
    /// Returned as `u128` so that `b = 64` is representable.
    pub fn block_size(&self) -> u128 {
        1u128 << self.block_bits
    }

    /// Splits `address` into tag, set index, and offset.
    #[inline(always)]
    pub fn decompose(&self, address: u64) -> AddressParts {
        AddressParts::split(address, self.set_bits, self.block_bits)
    }

    /// Inverse of [`Geometry::decompose`].
    pub fn compose(&self, parts: &AddressParts) -> u64 {
        parts.compose(self.set_bits, self.block_bits)
    }
}

/// Everything needed for one simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub geometry: Geometry,
    /// Trace file to replay.
    pub trace: PathBuf,
    /// Report the outcome of every record as it is replayed.
    #[serde(default)]
    pub verbose: bool,
}

/// Collects options one at a time, as a command-line parser sees them.
#[derive(Clone, Debug, Default)]
pub struct SimConfigBuilder {
    set_bits: Option<u32>,
    ways: Option<usize>,
    block_bits: Option<u32>,
    trace: Option<PathBuf>,
    verbose: bool,
}

impl SimConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bits(mut self, set_bits: u32) -> Self {
        self.set_bits = Some(set_bits);
        self
    }

    pub fn ways(mut self, ways: usize) -> Self {
        self.ways = Some(ways);
        self
    }

    pub fn block_bits(mut self, block_bits: u32) -> Self {
        self.block_bits = Some(block_bits);
        self
    }

    pub fn trace(mut self, trace: impl Into<PathBuf>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validates the collected options.
    ///
    /// Options are checked in the order `s`, `E`, `b`, `t`; the first one
    /// missing is reported.
    pub fn build(self) -> Result<SimConfig, ConfigError> {
        let set_bits = self.set_bits.ok_or(ConfigError::MissingOption('s'))?;
        let ways = self.ways.ok_or(ConfigError::MissingOption('E'))?;
        let block_bits = self.block_bits.ok_or(ConfigError::MissingOption('b'))?;
        let trace = self.trace.ok_or(ConfigError::MissingOption('t'))?;

        Ok(SimConfig {
            geometry: Geometry::new(set_bits, ways, block_bits)?,
            trace,
            verbose: self.verbose,
        })
    }
}
