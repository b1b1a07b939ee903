//! Valgrind lackey trace records and a streaming reader for them.
//!
//! A trace line looks like
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! i.e. an operation character, a hexadecimal address, a comma, and a
//! decimal byte count. Data accesses are conventionally indented by one
//! space; leading whitespace is ignored.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

use crate::common::error::TraceParseError;

/// Operation recorded on a trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Instruction fetch. Never reaches the cache.
    Instruction,
    Load,
    Store,
    /// Load followed by a store to the same address.
    Modify,
}

impl AccessKind {
    /// Number of cache accesses a record of this kind produces.
    pub fn access_count(self) -> usize {
        match self {
            AccessKind::Instruction => 0,
            AccessKind::Load | AccessKind::Store => 1,
            AccessKind::Modify => 2,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            AccessKind::Instruction => 'I',
            AccessKind::Load => 'L',
            AccessKind::Store => 'S',
            AccessKind::Modify => 'M',
        }
    }
}

impl TryFrom<char> for AccessKind {
    type Error = TraceParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'I' => Ok(AccessKind::Instruction),
            'L' => Ok(AccessKind::Load),
            'S' => Ok(AccessKind::Store),
            'M' => Ok(AccessKind::Modify),
            other => Err(TraceParseError::UnknownKind(other)),
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub kind: AccessKind,
    pub address: u64,
    /// Bytes touched, as written in the trace (a signed decimal). Carried
    /// for display only; the cache ignores it.
    pub size: i64,
}

impl TraceRecord {
    pub fn new(kind: AccessKind, address: u64, size: i64) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }

    pub fn load(address: u64) -> Self {
        Self::new(AccessKind::Load, address, 1)
    }

    pub fn store(address: u64) -> Self {
        Self::new(AccessKind::Store, address, 1)
    }

    pub fn modify(address: u64) -> Self {
        Self::new(AccessKind::Modify, address, 1)
    }

    pub fn instruction(address: u64) -> Self {
        Self::new(AccessKind::Instruction, address, 1)
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind, self.address, self.size)
    }
}

fn parse_hex(s: &str) -> Option<u64> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16).ok()
}

impl FromStr for TraceRecord {
    type Err = TraceParseError;

    /// Parses `"<op> <hex address>,<size>"`.
    ///
    /// The address and size are checked before the operation character so
    /// that a structurally broken line is reported as such even when its
    /// operation is also unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let mut chars = line.chars();
        let op = chars.next().ok_or(TraceParseError::Empty)?;

        let rest = chars.as_str().trim_start();
        let (addr, size) = rest
            .split_once(',')
            .ok_or(TraceParseError::MissingAddress)?;

        let addr = addr.trim();
        if addr.is_empty() {
            return Err(TraceParseError::MissingAddress);
        }
        let address = parse_hex(addr).ok_or_else(|| TraceParseError::BadAddress(addr.into()))?;

        let size = size.trim();
        let size = size
            .parse::<i64>()
            .map_err(|_| TraceParseError::BadSize(size.into()))?;

        let kind = AccessKind::try_from(op)?;
        Ok(Self::new(kind, address, size))
    }
}

/// Lazily yields [`TraceRecord`]s from a line-oriented source.
///
/// Blank lines and lines with an unknown operation are skipped. The first
/// malformed line, or the first I/O error, ends the stream; records already
/// yielded stand.
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
    finished: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file for reading.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            finished: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = TraceRecord;

    fn next(&mut self) -> Option<TraceRecord> {
        while !self.finished {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    log::warn!("trace: read error after line {}: {}", self.line_no, e);
                    self.finished = true;
                    break;
                }
                None => {
                    self.finished = true;
                    break;
                }
            };
            self.line_no += 1;

            match line.parse::<TraceRecord>() {
                Ok(record) => return Some(record),
                Err(e) if e.is_skippable() => {
                    log::debug!("trace: skipping line {}: {}", self.line_no, e);
                }
                Err(e) => {
                    log::warn!("trace: stopping at line {}: {}", self.line_no, e);
                    self.finished = true;
                }
            }
        }
        None
    }
}
