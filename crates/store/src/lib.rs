//! Collaborator clients for the performance tracker.
//!
//! This crate provides:
//! - The `RecordStore` trait with JSONBin and in-memory implementations
//! - The `ConfigProvider` trait with Google Sheets and in-memory implementations
//! - `TrackerRepository`, which loads and saves the working state

pub mod config_provider;
pub mod error;
mod http;
pub mod record_store;
pub mod repository;

pub use config_provider::{
    ConfigProvider, MemoryConfigProvider, SheetsConfigProvider, parse_sheet_values,
};
pub use error::{StoreError, StoreResult};
pub use record_store::{JsonBinStore, MemoryRecordStore, RecordStore};
pub use repository::TrackerRepository;
