use crate::error::{AppError, AppResult};
use crate::lifecycle::MEMBERSHIP_ACTIVE;
use crate::models::*;
use crate::services::transaction_service::record_transaction;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

#[derive(Clone)]
pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        let plans = sqlx::query_as::<_, SubscriptionPlan>(
            "SELECT id, name, duration_days, amount_cents, max_ads, max_spaces FROM subscriptions ORDER BY amount_cents",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    pub async fn get_plan(&self, id: i64) -> AppResult<SubscriptionPlan> {
        sqlx::query_as::<_, SubscriptionPlan>(
            "SELECT id, name, duration_days, amount_cents, max_ads, max_spaces FROM subscriptions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Subscription plan not found".into()))
    }

    /// The effective membership, derived from the time window. The stored
    /// flag narrows the scan but the window decides; a stale `status=1` row
    /// past its end date is never returned.
    pub async fn current_membership(
        &self,
        agency_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AgencySubscription>> {
        let row = sqlx::query_as::<_, AgencySubscription>(
            r#"
            SELECT id, agency_id, subscription_id, status, start_date, end_date, created_at, updated_at
            FROM agency_subscriptions
            WHERE agency_id = $1 AND status = 1 AND start_date <= $2 AND end_date > $2
            ORDER BY start_date DESC
            LIMIT 1
            "#,
        )
        .bind(agency_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn current_plan(
        &self,
        agency_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<(AgencySubscription, SubscriptionPlan)>> {
        let Some(membership) = self.current_membership(agency_id, now).await? else {
            return Ok(None);
        };
        let plan = self.get_plan(membership.subscription_id).await?;
        Ok(Some((membership, plan)))
    }

    /// Close the previous current row and open the new one, together with
    /// the ledger row, in a single transaction.
    pub async fn renew(
        &self,
        agency_id: i64,
        subscription_id: i64,
    ) -> AppResult<MembershipResponse> {
        let plan = self.get_plan(subscription_id).await?;
        let now = Utc::now();
        let end = now + Duration::days(i64::from(plan.duration_days));

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE agency_subscriptions SET status = 0, updated_at = $2 WHERE agency_id = $1 AND status = 1",
        )
        .bind(agency_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, AgencySubscription>(
            r#"
            INSERT INTO agency_subscriptions (agency_id, subscription_id, status, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, agency_id, subscription_id, status, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(agency_id)
        .bind(subscription_id)
        .bind(MEMBERSHIP_ACTIVE)
        .bind(now)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        record_transaction(
            &mut *tx,
            agency_id,
            TransactionType::Subscription,
            TransactionStatus::Success,
            plan.amount_cents,
            Some(format!("Subscription renewal: {}", plan.name)),
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "Agency {agency_id} renewed subscription to plan {} until {end}",
            plan.name
        );

        Ok(MembershipResponse::from_row(row, now))
    }

    pub async fn history(&self, agency_id: i64) -> AppResult<Vec<MembershipResponse>> {
        let now = Utc::now();
        let rows = sqlx::query_as::<_, AgencySubscription>(
            r#"
            SELECT id, agency_id, subscription_id, status, start_date, end_date, created_at, updated_at
            FROM agency_subscriptions
            WHERE agency_id = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MembershipResponse::from_row(r, now))
            .collect())
    }

    pub async fn overview(&self, agency_id: i64) -> AppResult<SubscriptionOverviewResponse> {
        let now = Utc::now();
        let (membership, plan) = self
            .current_plan(agency_id, now)
            .await?
            .ok_or_else(|| AppError::NotFound("No active subscription".into()))?;

        let ads_used = self.count_live_ads(agency_id).await?;
        let spaces_used = self.count_spaces(agency_id).await?;

        Ok(SubscriptionOverviewResponse {
            plan,
            membership: MembershipResponse::from_row(membership, now),
            ads_used,
            spaces_used,
        })
    }

    pub async fn ensure_can_create_ad(&self, agency_id: i64) -> AppResult<()> {
        let now = Utc::now();
        let Some((_, plan)) = self.current_plan(agency_id, now).await? else {
            return Err(AppError::QuotaExceeded("No active subscription".into()));
        };

        let used = self.count_live_ads(agency_id).await?;
        if used >= i64::from(plan.max_ads) {
            return Err(AppError::QuotaExceeded(format!(
                "Ad limit reached for plan {} ({} of {})",
                plan.name, used, plan.max_ads
            )));
        }

        Ok(())
    }

    pub async fn ensure_can_create_space(&self, agency_id: i64) -> AppResult<()> {
        let now = Utc::now();
        let Some((_, plan)) = self.current_plan(agency_id, now).await? else {
            return Err(AppError::QuotaExceeded("No active subscription".into()));
        };

        let used = self.count_spaces(agency_id).await?;
        if used >= i64::from(plan.max_spaces) {
            return Err(AppError::QuotaExceeded(format!(
                "Space limit reached for plan {} ({} of {})",
                plan.name, used, plan.max_spaces
            )));
        }

        Ok(())
    }

    async fn count_live_ads(&self, agency_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ads WHERE agency_id = $1 AND status <> 'trash'",
        )
        .bind(agency_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_spaces(&self, agency_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM spaces WHERE agency_id = $1")
            .bind(agency_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
