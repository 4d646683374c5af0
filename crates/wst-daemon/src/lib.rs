//! Collector wiring for the wind-station telemetry daemon; the `wstd`
//! binary lives in `main.rs`.

pub mod collector;
