//! Error types for configuration, cache construction, and trace parsing.
//!
//! None of these are raised on the per-access path. Configuration and
//! construction errors abort a run before the first record is read; trace
//! parse errors never escape the reader and only decide whether a line is
//! skipped or ends the stream.

use std::error::Error;
use std::fmt;

/// A problem with the simulation options, detected before the cache exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option (`s`, `E`, `b` or `t`) was not supplied.
    MissingOption(char),
    /// Set-index and block-offset bits together exceed the 64-bit address.
    AddressTooWide {
        /// Requested set-index bit count.
        set_bits: u32,
        /// Requested block-offset bit count.
        block_bits: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingOption(opt) => {
                write!(f, "missing required command line argument -{}", opt)
            }
            ConfigError::AddressTooWide {
                set_bits,
                block_bits,
            } => write!(
                f,
                "s + b must not exceed 64 address bits (got s={}, b={})",
                set_bits, block_bits
            ),
        }
    }
}

impl Error for ConfigError {}

/// The cache could not be built from the requested geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// `2^s` sets cannot be represented on this platform.
    NoSets {
        /// Requested set-index bit count.
        set_bits: u32,
    },
    /// Associativity of zero lines per set.
    NoWays,
    /// The `2^s x E` line array is too large to allocate.
    TooLarge {
        /// Requested set-index bit count.
        set_bits: u32,
        /// Requested lines per set.
        ways: usize,
    },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::NoSets { set_bits } => {
                write!(f, "cannot allocate 2^{} cache sets", set_bits)
            }
            CacheError::NoWays => write!(f, "associativity (E) must be at least 1"),
            CacheError::TooLarge { set_bits, ways } => write!(
                f,
                "cannot allocate 2^{} sets of {} lines",
                set_bits, ways
            ),
        }
    }
}

impl Error for CacheError {}

/// Why a single trace line could not be turned into a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceParseError {
    /// The line held only whitespace.
    Empty,
    /// The line is well formed but its operation is not `I`, `L`, `S` or `M`.
    UnknownKind(char),
    /// No `address,size` field follows the operation character.
    MissingAddress,
    /// The address is not a hexadecimal number.
    BadAddress(String),
    /// The byte count is not a decimal number.
    BadSize(String),
}

impl TraceParseError {
    /// Whether the reader should keep going past a line that failed this way.
    ///
    /// Unknown operations are ignored; anything structurally broken ends the
    /// trace.
    pub fn is_skippable(&self) -> bool {
        matches!(self, TraceParseError::Empty | TraceParseError::UnknownKind(_))
    }
}

impl fmt::Display for TraceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceParseError::Empty => write!(f, "empty trace line"),
            TraceParseError::UnknownKind(c) => write!(f, "unknown operation '{}'", c),
            TraceParseError::MissingAddress => write!(f, "expected '<address>,<size>'"),
            TraceParseError::BadAddress(s) => write!(f, "invalid hex address '{}'", s),
            TraceParseError::BadSize(s) => write!(f, "invalid access size '{}'", s),
        }
    }
}

impl Error for TraceParseError {}
