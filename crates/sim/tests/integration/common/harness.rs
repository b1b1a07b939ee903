//! Test harness helpers.

use cachesim::{Counters, Geometry, Simulator, TraceReader, TraceRecord};
use std::io::Cursor;

/// Routes library logging to the test output. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn geometry(s: u32, e: usize, b: u32) -> Geometry {
    Geometry::new(s, e, b).expect("test geometry fits in 64 bits")
}

pub fn simulator(s: u32, e: usize, b: u32) -> Simulator {
    Simulator::new(&geometry(s, e, b)).expect("test geometry is constructible")
}

/// Parses a trace held in a string.
pub fn parse_trace(text: &str) -> Vec<TraceRecord> {
    TraceReader::new(Cursor::new(text.to_owned())).collect()
}

/// Replays `text` and returns the final counters.
pub fn replay(s: u32, e: usize, b: u32, text: &str) -> Counters {
    init_logging();
    simulator(s, e, b).run(parse_trace(text))
}

/// Replays `text` and returns the verbose line for every data record.
pub fn replay_verbose(s: u32, e: usize, b: u32, text: &str) -> Vec<String> {
    init_logging();
    let mut lines = Vec::new();
    simulator(s, e, b).run_with(parse_trace(text), |record, dispatch| {
        if record.kind.access_count() > 0 {
            lines.push(format!("{} {}", record, dispatch));
        }
    });
    lines
}

pub fn counters(hits: u64, misses: u64, evictions: u64) -> Counters {
    Counters {
        hits,
        misses,
        evictions,
    }
}

/// The `yi.trace` sample shipped with the cache lab.
pub const YI_TRACE: &str = " L 10,1
 M 20,1
 L 22,1
 S 18,1
 L 110,1
 L 210,1
 M 12,1
";

/// The `dave.trace` sample shipped with the cache lab.
pub const DAVE_TRACE: &str = " L 10,4
 S 18,4
 L 20,4
 S 28,4
 S 50,4
";
