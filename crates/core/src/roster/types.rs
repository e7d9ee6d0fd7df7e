//! Roster and target types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Revenue targets in force for a cycle.
///
/// A missing or zero target means progress against it is reported as 0%.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
    /// Target per branch.
    #[serde(default)]
    pub per_branch: BTreeMap<String, Decimal>,
    /// Single personal target applied to every staff member.
    #[serde(default)]
    pub personal_global: Decimal,
}

impl TargetConfig {
    /// Returns the target for a branch, zero when unset.
    #[must_use]
    pub fn branch_target(&self, branch: &str) -> Decimal {
        self.per_branch.get(branch).copied().unwrap_or(Decimal::ZERO)
    }

    /// Returns a copy with negative targets removed.
    ///
    /// Negative branch targets are dropped and a negative personal target
    /// becomes zero.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.per_branch.retain(|_, target| *target >= Decimal::ZERO);
        if self.personal_global < Decimal::ZERO {
            self.personal_global = Decimal::ZERO;
        }
        self
    }
}

/// Everything the config provider supplies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    /// Staff names in configured order.
    #[serde(default)]
    pub staff: Vec<String>,
    /// Branch names in configured order.
    #[serde(default)]
    pub branches: Vec<String>,
    /// Current targets.
    #[serde(default)]
    pub targets: TargetConfig,
}
