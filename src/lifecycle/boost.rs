use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

/// Computed activation phase of a boost window. The stored `active` flag on
/// an `ad_boosts` row is a cached projection of this; the reconciliation job
/// keeps the two in agreement as time passes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BoostPhase {
    Scheduled,
    Active,
    Expired,
}

impl std::fmt::Display for BoostPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoostPhase::Scheduled => write!(f, "scheduled"),
            BoostPhase::Active => write!(f, "active"),
            BoostPhase::Expired => write!(f, "expired"),
        }
    }
}

/// Phase of the half-open window `[start, end)` at instant `now`.
pub fn phase_at(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> BoostPhase {
    if now < start {
        BoostPhase::Scheduled
    } else if now < end {
        BoostPhase::Active
    } else {
        BoostPhase::Expired
    }
}

pub fn is_active_at(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    phase_at(start, end, now) == BoostPhase::Active
}

/// Display order between two boosts: higher `priority_level` wins, ties go to
/// the earlier `start_date` (first-boosted, best-served).
pub fn display_order(
    a_priority: i32,
    a_start: DateTime<Utc>,
    b_priority: i32,
    b_start: DateTime<Utc>,
) -> Ordering {
    b_priority
        .cmp(&a_priority)
        .then_with(|| a_start.cmp(&b_start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
    }

    #[test]
    fn test_phase_boundaries() {
        let (start, end) = (t(0), t(24));
        assert_eq!(phase_at(start, end, t(-1)), BoostPhase::Scheduled);
        // window is half-open: start is in, end is out
        assert_eq!(phase_at(start, end, t(0)), BoostPhase::Active);
        assert_eq!(phase_at(start, end, t(23)), BoostPhase::Active);
        assert_eq!(phase_at(start, end, t(24)), BoostPhase::Expired);
        assert_eq!(phase_at(start, end, t(25)), BoostPhase::Expired);
    }

    #[test]
    fn test_week_long_boost_expires() {
        // started a day ago with a 7-day run; 8 days later it is gone
        let start = t(-24);
        let end = start + Duration::days(7);
        assert!(is_active_at(start, end, t(0)));
        assert!(!is_active_at(start, end, t(8 * 24)));
    }

    #[test]
    fn test_higher_priority_ranks_first() {
        assert_eq!(display_order(3, t(5), 1, t(0)), Ordering::Less);
        assert_eq!(display_order(1, t(0), 3, t(5)), Ordering::Greater);
    }

    #[test]
    fn test_priority_tie_goes_to_earlier_start() {
        assert_eq!(display_order(2, t(0), 2, t(1)), Ordering::Less);
        assert_eq!(display_order(2, t(1), 2, t(0)), Ordering::Greater);
        assert_eq!(display_order(2, t(0), 2, t(0)), Ordering::Equal);
    }

    #[test]
    fn test_sorting_mixed_boosts() {
        let mut boosts = vec![(1, t(0)), (3, t(2)), (3, t(1)), (2, t(0))];
        boosts.sort_by(|a, b| display_order(a.0, a.1, b.0, b.1));
        assert_eq!(boosts, vec![(3, t(1)), (3, t(2)), (2, t(0)), (1, t(0))]);
    }
}
