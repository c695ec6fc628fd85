//! telemetry/mod.rs
//! Codec counters.
//!
//! Notes:
//! - Counters are plain values owned by the caller of one serialize or
//!   deserialize call, so independent tables never share state.
//! - Serializable for reporting; nothing here affects the wire format.

pub mod counters;

pub use counters::*;
