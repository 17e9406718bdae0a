use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Handling status of an abuse report filed against an ad.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Investigating,
    Resolved,
    Rejected,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::Investigating => write!(f, "investigating"),
            ReportStatus::Resolved => write!(f, "resolved"),
            ReportStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl ReportStatus {
    /// `pending -> investigating | resolved | rejected`,
    /// `investigating -> resolved | rejected`. Terminal states are absorbing.
    pub fn can_transition(self, to: ReportStatus) -> bool {
        use ReportStatus::*;
        match (self, to) {
            (Pending, Investigating) | (Pending, Resolved) | (Pending, Rejected) => true,
            (Investigating, Resolved) | (Investigating, Rejected) => true,
            _ => false,
        }
    }

    pub fn ensure_transition(self, to: ReportStatus) -> AppResult<()> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition {
                entity: "report",
                from: self.to_string(),
                to: to.to_string(),
            })
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ReportStatus::Resolved | ReportStatus::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReportStatus::*;

    #[test]
    fn test_handling_flow() {
        assert!(Pending.can_transition(Investigating));
        assert!(Pending.can_transition(Resolved));
        assert!(Pending.can_transition(Rejected));
        assert!(Investigating.can_transition(Resolved));
        assert!(Investigating.can_transition(Rejected));
    }

    #[test]
    fn test_terminal_states_absorbing() {
        for from in [Resolved, Rejected] {
            assert!(from.is_terminal());
            for to in [Pending, Investigating, Resolved, Rejected] {
                assert!(!from.can_transition(to));
            }
        }
    }

    #[test]
    fn test_no_way_back_to_pending() {
        assert!(!Investigating.can_transition(Pending));
    }

    #[test]
    fn test_rejection_reports_offending_pair() {
        let err = Resolved.ensure_transition(Pending).unwrap_err();
        match err {
            AppError::InvalidTransition { entity, from, to } => {
                assert_eq!(entity, "report");
                assert_eq!(from, "resolved");
                assert_eq!(to, "pending");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
