use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Moderation status of an ad. Only `Valid` ads are publicly visible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "ad_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdStatus {
    Pending,
    Valid,
    Blocked,
    Trash,
}

impl std::fmt::Display for AdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdStatus::Pending => write!(f, "pending"),
            AdStatus::Valid => write!(f, "valid"),
            AdStatus::Blocked => write!(f, "blocked"),
            AdStatus::Trash => write!(f, "trash"),
        }
    }
}

impl AdStatus {
    /// Legal moves: `pending -> valid | blocked`, `valid -> blocked`,
    /// `blocked -> valid`, and any non-trash state `-> trash`.
    /// `trash` is absorbing; self-loops are not transitions.
    pub fn can_transition(self, to: AdStatus) -> bool {
        use AdStatus::*;
        match (self, to) {
            (Trash, _) => false,
            (_, Trash) => true,
            (Pending, Valid) | (Pending, Blocked) => true,
            (Valid, Blocked) => true,
            (Blocked, Valid) => true,
            _ => false,
        }
    }

    pub fn ensure_transition(self, to: AdStatus) -> AppResult<()> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition {
                entity: "ad",
                from: self.to_string(),
                to: to.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AdStatus::*;

    #[test]
    fn test_moderation_flow() {
        assert!(Pending.can_transition(Valid));
        assert!(Pending.can_transition(Blocked));
        assert!(Valid.can_transition(Blocked));
        assert!(Blocked.can_transition(Valid));
    }

    #[test]
    fn test_trash_is_absorbing() {
        for to in [Pending, Valid, Blocked, Trash] {
            assert!(!Trash.can_transition(to));
        }
        for from in [Pending, Valid, Blocked] {
            assert!(from.can_transition(Trash));
        }
    }

    #[test]
    fn test_self_loops_rejected() {
        for s in [Pending, Valid, Blocked, Trash] {
            assert!(!s.can_transition(s));
        }
    }

    #[test]
    fn test_no_way_back_to_pending() {
        assert!(!Valid.can_transition(Pending));
        assert!(!Blocked.can_transition(Pending));
    }

    #[test]
    fn test_block_unblock_chain() {
        // pending -> valid -> blocked -> valid
        let mut status = Pending;
        for next in [Valid, Blocked, Valid] {
            assert!(status.ensure_transition(next).is_ok());
            status = next;
        }
        assert_eq!(status, Valid);
    }

    #[test]
    fn test_rejection_reports_offending_pair() {
        let err = Trash.ensure_transition(Valid).unwrap_err();
        match err {
            AppError::InvalidTransition { entity, from, to } => {
                assert_eq!(entity, "ad");
                assert_eq!(from, "trash");
                assert_eq!(to, "valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
