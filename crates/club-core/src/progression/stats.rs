//! Prospect statistics calculator

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::entities::{Activity, CaseType, Member};
use crate::value_objects::{add_months, months_between};

use super::rules::PatchRules;

/// Progress toward one milestone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MilestoneProgress {
    /// Points progress in percent, clamped to [0, 100]
    pub points_progress: f64,
    /// Tenure progress in percent, clamped to [0, 100]
    pub time_progress: f64,
    pub points_met: bool,
    pub time_met: bool,
    pub eligible: bool,
}

impl MilestoneProgress {
    fn evaluate(points: i64, min_points: i64, months: u32, min_months: u32) -> Self {
        let points_met = points >= min_points;
        let time_met = months >= min_months;
        Self {
            points_progress: percent(points as f64, min_points as f64),
            time_progress: percent(f64::from(months), f64::from(min_months)),
            points_met,
            time_met,
            eligible: points_met && time_met,
        }
    }
}

fn percent(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 100.0;
    }
    (value / target * 100.0).clamp(0.0, 100.0)
}

/// Where a half-patch date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfPatchDateSource {
    /// Stored on the member record
    Recorded,
    /// First validated activity at which both half-patch thresholds held
    Reconstructed,
    /// Lower bound: join date plus the minimum tenure
    Estimated,
}

/// Derived progression statistics for one member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProspectStats {
    /// Sum of points over validated activities
    pub total_points: i64,
    /// Whole calendar months since joining
    pub months_as_prospect: u32,
    pub half_patch: MilestoneProgress,
    /// Only resolved for members whose case type is Half
    pub half_patch_date: Option<NaiveDate>,
    pub half_patch_date_source: Option<HalfPatchDateSource>,
    pub months_as_half: u32,
    pub full_patch: MilestoneProgress,
}

impl ProspectStats {
    /// Compute statistics for `member` from its full activity list
    ///
    /// `activities` must belong to `member`. Total over its inputs: an empty
    /// list yields zero points and no milestone met.
    pub fn compute(
        member: &Member,
        activities: &[Activity],
        now: DateTime<Utc>,
        rules: &PatchRules,
    ) -> Self {
        let today = now.date_naive();
        let total_points: i64 = activities
            .iter()
            .filter(|a| a.is_validated())
            .map(|a| i64::from(a.points))
            .sum();

        let months_as_prospect = months_between(member.join_date(), today);
        let half_patch = MilestoneProgress::evaluate(
            total_points,
            rules.half_min_points,
            months_as_prospect,
            rules.half_min_months,
        );

        let resolved = (member.case_type == CaseType::Half)
            .then(|| Self::resolve_half_patch_date(member, activities, rules));

        let months_as_half = match resolved {
            Some((date, _)) => months_between(date, today),
            None if half_patch.eligible => months_as_prospect.saturating_sub(rules.half_min_months),
            None => 0,
        };

        let full_patch = MilestoneProgress::evaluate(
            total_points,
            rules.full_min_points,
            months_as_half,
            rules.full_min_months_as_half,
        );

        Self {
            total_points,
            months_as_prospect,
            half_patch,
            half_patch_date: resolved.map(|(date, _)| date),
            half_patch_date_source: resolved.map(|(_, source)| source),
            months_as_half,
            full_patch,
        }
    }

    /// Resolve the date the member reached the Half patch
    ///
    /// A recorded `half_date` wins. Otherwise validated activities are
    /// replayed in date order and the first one at which cumulative points and
    /// tenure both meet the half-patch thresholds gives the date. If the replay
    /// never gets there, the join date plus the minimum tenure is used.
    pub fn resolve_half_patch_date(
        member: &Member,
        activities: &[Activity],
        rules: &PatchRules,
    ) -> (NaiveDate, HalfPatchDateSource) {
        if let Some(date) = member.half_date {
            return (date, HalfPatchDateSource::Recorded);
        }

        let join_date = member.join_date();
        let mut validated: Vec<&Activity> = activities.iter().filter(|a| a.is_validated()).collect();
        validated.sort_by_key(|a| a.activity_date);

        let mut cumulative: i64 = 0;
        for activity in validated {
            cumulative += i64::from(activity.points);
            let elapsed = months_between(join_date, activity.activity_date);
            if cumulative >= rules.half_min_points && elapsed >= rules.half_min_months {
                return (activity.activity_date, HalfPatchDateSource::Reconstructed);
            }
        }

        (
            add_months(join_date, rules.half_min_months),
            HalfPatchDateSource::Estimated,
        )
    }
}
