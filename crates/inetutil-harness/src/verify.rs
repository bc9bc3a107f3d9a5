//! Output comparison and verification.

use serde::{Deserialize, Serialize};

/// Result of verifying a single fixture case under one strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub case_name: String,
    /// `inet_pton` or `inet_ntop`.
    pub symbol: String,
    pub family: String,
    pub strategy: String,
    pub passed: bool,
    pub expected: String,
    /// Output from the strategy, or `error:<Kind>`.
    pub actual: String,
    /// Diff if the case failed, or parity notes if it passed with remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// Whether `std::net` agreed. `None` when no host check applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_parity: Option<bool>,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Cases where the host parser disagreed (informational).
    pub host_mismatches: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let host_mismatches = results
            .iter()
            .filter(|r| r.host_parity == Some(false))
            .count();
        Self {
            total,
            passed,
            failed: total - passed,
            host_mismatches,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}
