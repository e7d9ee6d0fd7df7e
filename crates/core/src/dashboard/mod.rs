//! Dashboard views built from the working state.
//!
//! This module provides:
//! - Branch cards with progress and comparison against the previous cutoff
//! - Staff ranking by progress against the personal target
//! - The daily table and global totals
//! - Calendar marks for days with records

pub mod service;
pub mod types;


pub use service::DashboardService;
pub use types::*;
