//! Common types used across the application.

pub mod id;
pub mod money;
pub mod timestamp;

pub use id::RecordId;
pub use money::{format_amount, format_percent};
pub use timestamp::{format_local_timestamp, local_today};
