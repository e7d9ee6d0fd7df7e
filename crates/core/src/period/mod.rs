//! Period partitioning across cutoffs.
//!
//! Every aggregate view is computed over the records selected here, so the
//! four-way rule in [`Scope::resolve`] governs the whole dashboard.

pub mod partition;


pub use partition::{Partition, PeriodPartitioner, Scope, ScopeKind};
