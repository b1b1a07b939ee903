//! Types shared across the simulator: errors and address decomposition.

pub mod addr;
pub mod error;

pub use self::addr::AddressParts;
pub use self::error::{CacheError, ConfigError, TraceParseError};
