//! Trace-driven set-associative cache simulator.
//!
//! Replays a valgrind memory trace against a cache of `2^s` sets, `E` lines
//! per set, and `2^b`-byte blocks, with least-recently-used replacement, and
//! counts hits, misses, and evictions.
//!
//! ```no_run
//! use cachesim::{Geometry, Simulator, TraceReader};
//!
//! let geometry = Geometry::new(4, 1, 4).unwrap();
//! let trace = TraceReader::open("traces/yi.trace").unwrap();
//! let counters = Simulator::new(&geometry).unwrap().run(trace);
//! println!("{}", counters);
//! ```

pub mod cache;
pub mod common;
pub mod config;
pub mod sim;
pub mod stats;
pub mod trace;

pub use crate::cache::{AccessOutcome, Cache};
pub use crate::common::{AddressParts, CacheError, ConfigError, TraceParseError};
pub use crate::config::{Geometry, SimConfig, SimConfigBuilder};
pub use crate::sim::{Dispatch, Simulator};
pub use crate::stats::Counters;
pub use crate::trace::{AccessKind, TraceReader, TraceRecord};
