//! Benchmark utilities for the shared application hub.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p hub_bench
//!
//! # Run a specific benchmark group
//! cargo bench -p hub_bench -- extend
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for
//! visualization.

pub mod payloads;
