use crate::error::AppResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

/// Counts of rows corrected by one reconciliation pass. All zeroes means
/// every stored flag already matched its computed state.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ReconciliationReport {
    pub boosts_activated: u64,
    pub boosts_deactivated: u64,
    pub memberships_closed: u64,
}

impl ReconciliationReport {
    pub fn total(&self) -> u64 {
        self.boosts_activated + self.boosts_deactivated + self.memberships_closed
    }
}

#[derive(Clone)]
pub struct ReconciliationService {
    pool: PgPool,
}

impl ReconciliationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Re-project window membership into the stored flags as of `now`.
    ///
    /// Idempotent and safe to run concurrently with user requests: every
    /// UPDATE is conditional on the stored flag disagreeing with the
    /// computed state, so rows that are already correct are not touched.
    /// Afterwards `active == (start_date <= now < end_date)` holds for all
    /// ad_boosts rows, and no membership row stays flagged current past its
    /// end date.
    pub async fn reconcile_expirations(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<ReconciliationReport> {
        let boosts_deactivated = sqlx::query(
            r#"
            UPDATE ad_boosts SET active = FALSE, updated_at = $1
            WHERE active = TRUE AND NOT (start_date <= $1 AND end_date > $1)
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        let boosts_activated = sqlx::query(
            r#"
            UPDATE ad_boosts SET active = TRUE, updated_at = $1
            WHERE active = FALSE AND start_date <= $1 AND end_date > $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        let memberships_closed = sqlx::query(
            r#"
            UPDATE agency_subscriptions SET status = 0, updated_at = $1
            WHERE status = 1 AND end_date <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(ReconciliationReport {
            boosts_activated,
            boosts_deactivated,
            memberships_closed,
        })
    }
}
