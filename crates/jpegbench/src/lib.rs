#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Benchmark configuration and the driver running every decoding path.
pub mod bench;

/// Error types for the benchmark driver.
pub mod error;

/// Ranking, speed labels and the textual report.
pub mod report;

/// The decoding paths compared by the benchmark.
pub mod strategy;

/// Wall-clock timing helpers.
pub mod timing;

pub use crate::bench::{run_benchmark, BenchConfig};
pub use crate::error::BenchError;
pub use crate::report::BenchReport;
pub use crate::strategy::Strategy;
