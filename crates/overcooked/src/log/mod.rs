//! Episode metric logging.
//!
//! - `MetricLogger` trait for pluggable backends
//! - `ConsoleLogger` writes through `tracing`
//! - `NoOpLogger` discards everything

mod console;
mod logger;

pub use console::ConsoleLogger;
pub use logger::{episode_metrics, MetricLogger, NoOpLogger};
