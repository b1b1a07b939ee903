//! Shared integration test fixtures.

/// Builders for simulators and in-memory traces.
pub mod harness;
