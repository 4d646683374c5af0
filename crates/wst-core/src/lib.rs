//! Core data types, unit conversions, and wind statistics for the
//! wind-station telemetry collector.
//!
//! This crate holds the pieces shared by the protocol layer and the
//! daemon: decoded sample types, the published reading payloads, speed
//! unit conversions, and the sliding-window wind aggregator.

pub mod pipeline;
pub mod stats;
pub mod types;
pub mod units;

pub use pipeline::*;
pub use stats::*;
pub use types::*;
pub use units::*;
