//! Staff roster, branches and targets supplied by the config provider.

pub mod types;

pub use types::{Roster, TargetConfig};
