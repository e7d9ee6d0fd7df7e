//! Aggregation of in-scope records into totals and target progress.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::AggregateCalculator;
pub use types::{Aggregates, Progress};
