use chrono::{DateTime, Utc};

/// Stored membership flags on `agency_subscriptions.status`.
pub const MEMBERSHIP_ACTIVE: i16 = 1;
pub const MEMBERSHIP_CLOSED: i16 = 0;

/// Whether a membership row is the effective one at `now`: flagged active
/// and `now` inside the half-open `[start, end)` window. The flag alone is
/// never trusted; a stale `status=1` row past its end date is not current.
pub fn is_current(
    status: i16,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    status == MEMBERSHIP_ACTIVE && start_date <= now && now < end_date
}

/// Index of the effective membership among historical rows: current per
/// [`is_current`], latest `start_date` wins when several qualify.
pub fn pick_current(
    rows: &[(i16, DateTime<Utc>, DateTime<Utc>)],
    now: DateTime<Utc>,
) -> Option<usize> {
    rows.iter()
        .enumerate()
        .filter(|&(_, &(status, start, end))| is_current(status, start, end, now))
        .max_by_key(|&(_, &(_, start, _))| start)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(days: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::days(days)
    }

    #[test]
    fn test_is_current_window() {
        assert!(is_current(MEMBERSHIP_ACTIVE, t(0), t(30), t(10)));
        assert!(is_current(MEMBERSHIP_ACTIVE, t(0), t(30), t(0)));
        assert!(!is_current(MEMBERSHIP_ACTIVE, t(0), t(30), t(30)));
        assert!(!is_current(MEMBERSHIP_ACTIVE, t(0), t(30), t(-1)));
    }

    #[test]
    fn test_stale_flag_is_not_current() {
        // flagged active but past its end date
        assert!(!is_current(MEMBERSHIP_ACTIVE, t(-60), t(-30), t(0)));
        // inside the window but already closed out
        assert!(!is_current(MEMBERSHIP_CLOSED, t(0), t(30), t(10)));
    }

    #[test]
    fn test_pick_current_prefers_latest_start() {
        let rows = vec![
            (MEMBERSHIP_CLOSED, t(-90), t(-60)),
            (MEMBERSHIP_ACTIVE, t(-60), t(30)),
            (MEMBERSHIP_ACTIVE, t(-10), t(20)),
        ];
        assert_eq!(pick_current(&rows, t(0)), Some(2));
    }

    #[test]
    fn test_pick_current_skips_expired_history() {
        let rows = vec![
            (MEMBERSHIP_CLOSED, t(-90), t(-60)),
            (MEMBERSHIP_ACTIVE, t(-60), t(-30)),
        ];
        assert_eq!(pick_current(&rows, t(0)), None);
        assert_eq!(pick_current(&[], t(0)), None);
    }
}
