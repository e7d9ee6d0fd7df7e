//! Monthly cutoffs: closing the open cycle into an immutable snapshot.
//!
//! ```text
//! NoCutoffYet ──run cutoff──▶ CutoffActive ──run cutoff──▶ CutoffActive ...
//! ```
//!
//! There is no reverse transition.

pub mod error;
pub mod service;
pub mod types;


pub use error::CutoffError;
pub use service::CutoffEngine;
pub use types::{CutoffBookkeeping, CutoffSnapshot, CutoffState};
