//! Shared types, errors, and configuration for the performance tracker.
//!
//! This crate provides common types used across all other crates:
//! - Record identifiers
//! - Display helpers for money, percentages and timestamps
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, JsonBinConfig, ServerConfig, SheetsConfig};
pub use error::AppError;
