use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk classification recorded with each accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Derive the tier from the number of policy exceptions raised.
    ///
    /// Pure in both inputs so callers can preview the tier before submitting.
    pub fn from_exception_count(exception_count: usize, high_risk_threshold: usize) -> Self {
        if exception_count == 0 {
            Self::Low
        } else if exception_count <= high_risk_threshold {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
