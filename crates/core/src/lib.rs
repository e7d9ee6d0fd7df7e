//! Core engine for the performance tracker.
//!
//! This crate contains pure business logic with no web or storage dependencies.
//! Every operation takes the working state by reference and returns values.
//!
//! # Modules
//!
//! - `record` - Sales records and input validation
//! - `roster` - Staff, branches and targets
//! - `period` - Scope resolution and record partitioning
//! - `aggregate` - Totals and progress against targets
//! - `cutoff` - Closing cycles and cutoff history
//! - `compare` - Period-over-period deltas
//! - `document` - The persisted document and its lenient decoding
//! - `state` - The working state and its mutations
//! - `dashboard` - Dashboard and calendar views
//! - `statement` - Per-staff statements

pub mod aggregate;
pub mod compare;
pub mod cutoff;
pub mod dashboard;
pub mod document;
pub mod period;
pub mod record;
pub mod roster;
pub mod state;
pub mod statement;
