//! Activity entity - a logged prospect action awaiting or past review

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::YearMonth;

/// The fixed catalogue of activity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    MeetingAttendance,
    ClubhouseShift,
    GroupRide,
    RoadTrip,
    EventSupport,
    ClubhouseMaintenance,
    MonthlyContribution,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 7] = [
        Self::MeetingAttendance,
        Self::ClubhouseShift,
        Self::GroupRide,
        Self::RoadTrip,
        Self::EventSupport,
        Self::ClubhouseMaintenance,
        Self::MonthlyContribution,
    ];

    /// Points awarded for one instance of this kind
    pub const fn points(self) -> i32 {
        match self {
            Self::MeetingAttendance => 10,
            Self::ClubhouseShift => 15,
            Self::GroupRide => 10,
            Self::RoadTrip => 25,
            Self::EventSupport => 20,
            Self::ClubhouseMaintenance => 15,
            Self::MonthlyContribution => 5,
        }
    }

    /// Whether at most one instance per calendar month may count
    pub const fn once_per_month(self) -> bool {
        matches!(
            self,
            Self::MeetingAttendance | Self::ClubhouseMaintenance | Self::MonthlyContribution
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MeetingAttendance => "meeting_attendance",
            Self::ClubhouseShift => "clubhouse_shift",
            Self::GroupRide => "group_ride",
            Self::RoadTrip => "road_trip",
            Self::EventSupport => "event_support",
            Self::ClubhouseMaintenance => "clubhouse_maintenance",
            Self::MonthlyContribution => "monthly_contribution",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownVariant {
                field: "activity_type",
                value: s.to_string(),
            })
    }
}

/// Review lifecycle: pending -> validated | rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Validated,
    Rejected,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "validated" => Ok(Self::Validated),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::UnknownVariant {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Activity entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: Uuid,
    /// Owning member
    pub prospect_id: Uuid,
    pub kind: ActivityKind,
    pub activity_date: NaiveDate,
    pub description: Option<String>,
    pub status: ActivityStatus,
    /// Copied from the kind when the activity is created
    pub points: i32,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Log a new pending activity, recorded at `created_at`
    pub fn new(
        prospect_id: Uuid,
        kind: ActivityKind,
        activity_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            prospect_id,
            kind,
            activity_date,
            description: None,
            status: ActivityStatus::Pending,
            points: kind.points(),
            reviewed_by: None,
            reviewed_at: None,
            created_at,
        }
    }

    #[inline]
    pub fn is_validated(&self) -> bool {
        self.status == ActivityStatus::Validated
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ActivityStatus::Pending
    }

    /// Calendar month the activity happened in
    #[inline]
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.activity_date)
    }

    /// Approve or reject a pending activity
    pub fn review(
        &mut self,
        outcome: ActivityStatus,
        reviewer: String,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::ActivityAlreadyReviewed(self.status.as_str()));
        }
        if outcome == ActivityStatus::Pending {
            return Err(DomainError::ValidationError(
                "review outcome must be validated or rejected".to_string(),
            ));
        }
        self.status = outcome;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(at);
        Ok(())
    }
}

/// Find an activity that already occupies the monthly slot for `kind`
///
/// Only activities of the same member should be passed in. `counts` decides
/// which existing activities hold a slot (e.g. everything not rejected at
/// insert time, only validated ones at review time). The activity with
/// `exclude` as id is ignored so a pending activity does not conflict with
/// itself.
pub fn find_monthly_conflict<'a, F>(
    existing: &'a [Activity],
    kind: ActivityKind,
    date: NaiveDate,
    exclude: Option<Uuid>,
    counts: F,
) -> Option<&'a Activity>
where
    F: Fn(&Activity) -> bool,
{
    if !kind.once_per_month() {
        return None;
    }

    let month = YearMonth::of(date);
    existing.iter().find(|a| {
        Some(a.id) != exclude && a.kind == kind && month.contains(a.activity_date) && counts(a)
    })
}

/// Fail with `MonthlyLimitReached` when another activity holds the monthly
/// slot of `activity`
///
/// `counts` has the same meaning as in [`find_monthly_conflict`].
pub fn ensure_monthly_slot<F>(
    existing: &[Activity],
    activity: &Activity,
    counts: F,
) -> Result<(), DomainError>
where
    F: Fn(&Activity) -> bool,
{
    match find_monthly_conflict(
        existing,
        activity.kind,
        activity.activity_date,
        Some(activity.id),
        counts,
    ) {
        Some(_) => Err(DomainError::MonthlyLimitReached {
            kind: activity.kind.as_str(),
            month: activity.month(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_activity_copies_points() {
        let activity =
            Activity::new(Uuid::new_v4(), ActivityKind::RoadTrip, date(2024, 3, 1), Utc::now());
        assert_eq!(activity.points, 25);
        assert!(activity.is_pending());
        assert!(!activity.is_validated());
    }

    #[test]
    fn test_catalogue() {
        assert_eq!(ActivityKind::ALL.len(), 7);
        let limited: Vec<_> = ActivityKind::ALL
            .into_iter()
            .filter(|k| k.once_per_month())
            .collect();
        assert_eq!(limited.len(), 3);

        for kind in ActivityKind::ALL {
            assert_eq!(kind.as_str().parse::<ActivityKind>().unwrap(), kind);
            assert!(kind.points() > 0);
        }
        assert!("karaoke".parse::<ActivityKind>().is_err());
    }

    #[test]
    fn test_review_lifecycle() {
        let mut activity =
            Activity::new(Uuid::new_v4(), ActivityKind::GroupRide, date(2024, 3, 1), Utc::now());

        activity
            .review(ActivityStatus::Validated, "Diretor".to_string(), Utc::now())
            .unwrap();
        assert!(activity.is_validated());
        assert_eq!(activity.reviewed_by.as_deref(), Some("Diretor"));

        let err = activity
            .review(ActivityStatus::Rejected, "Diretor".to_string(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::ActivityAlreadyReviewed("validated")));
    }

    #[test]
    fn test_review_rejects_pending_outcome() {
        let mut activity =
            Activity::new(Uuid::new_v4(), ActivityKind::GroupRide, date(2024, 3, 1), Utc::now());
        assert!(activity
            .review(ActivityStatus::Pending, "x".to_string(), Utc::now())
            .is_err());
    }

    #[test]
    fn test_monthly_conflict() {
        let member = Uuid::new_v4();
        let mut existing = Activity::new(
            member,
            ActivityKind::MeetingAttendance,
            date(2024, 3, 5),
            Utc::now(),
        );
        let others = vec![existing.clone()];

        let conflict = find_monthly_conflict(
            &others,
            ActivityKind::MeetingAttendance,
            date(2024, 3, 28),
            None,
            |a| a.status != ActivityStatus::Rejected,
        );
        assert_eq!(conflict.map(|a| a.id), Some(existing.id));

        // Next month is free
        assert!(find_monthly_conflict(
            &others,
            ActivityKind::MeetingAttendance,
            date(2024, 4, 1),
            None,
            |_| true,
        )
        .is_none());

        // Unlimited kinds never conflict
        assert!(find_monthly_conflict(
            &others,
            ActivityKind::GroupRide,
            date(2024, 3, 5),
            None,
            |_| true,
        )
        .is_none());

        // Rejected instances do not hold the slot
        existing.status = ActivityStatus::Rejected;
        let others = vec![existing];
        assert!(find_monthly_conflict(
            &others,
            ActivityKind::MeetingAttendance,
            date(2024, 3, 28),
            None,
            |a| a.status != ActivityStatus::Rejected,
        )
        .is_none());
    }

    #[test]
    fn test_ensure_monthly_slot() {
        let member = Uuid::new_v4();
        let mut held = Activity::new(
            member,
            ActivityKind::MeetingAttendance,
            date(2024, 3, 5),
            Utc::now(),
        );
        held.status = ActivityStatus::Validated;
        let candidate = Activity::new(
            member,
            ActivityKind::MeetingAttendance,
            date(2024, 3, 20),
            Utc::now(),
        );
        let existing = vec![held, candidate.clone()];

        let err = ensure_monthly_slot(&existing, &candidate, Activity::is_validated).unwrap_err();
        assert_eq!(err.code(), "MONTHLY_LIMIT_REACHED");

        // The candidate never conflicts with itself
        assert!(ensure_monthly_slot(&existing[1..], &candidate, |_| true).is_ok());
    }

    #[test]
    fn test_monthly_conflict_excludes_self() {
        let activity = Activity::new(
            Uuid::new_v4(),
            ActivityKind::MonthlyContribution,
            date(2024, 3, 5),
            Utc::now(),
        );
        let all = vec![activity.clone()];
        assert!(find_monthly_conflict(
            &all,
            activity.kind,
            activity.activity_date,
            Some(activity.id),
            |_| true,
        )
        .is_none());
    }
}
