//! Thresholds for the two patch milestones

use serde::Serialize;

/// Thresholds for Half and Full patch eligibility
///
/// `half_min_months` has no built-in default. The admin review screen and
/// the member progress screen historically disagreed (4 vs 6 months), so the
/// value must be chosen once and supplied from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchRules {
    pub half_min_points: i64,
    pub half_min_months: u32,
    pub full_min_points: i64,
    pub full_min_months_as_half: u32,
}

impl PatchRules {
    /// Points needed for the Half patch
    pub const HALF_MIN_POINTS: i64 = 100;
    /// Points needed for the Full patch
    pub const FULL_MIN_POINTS: i64 = 150;
    /// Months a member must hold the Half patch before the Full patch
    pub const FULL_MIN_MONTHS_AS_HALF: u32 = 6;

    /// Standard point thresholds with the given Half-patch tenure
    pub fn new(half_min_months: u32) -> Result<Self, PatchRulesError> {
        if half_min_months == 0 {
            return Err(PatchRulesError::ZeroMonths);
        }
        Ok(Self {
            half_min_points: Self::HALF_MIN_POINTS,
            half_min_months,
            full_min_points: Self::FULL_MIN_POINTS,
            full_min_months_as_half: Self::FULL_MIN_MONTHS_AS_HALF,
        })
    }
}

/// Invalid patch rule configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PatchRulesError {
    #[error("half-patch minimum months must be at least 1")]
    ZeroMonths,
}
