use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::lifecycle::subscription::is_current;

/// Immutable catalog entry for a subscription plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubscriptionPlan {
    pub id: i64,
    pub name: String,
    pub duration_days: i32,
    pub amount_cents: i64,
    pub max_ads: i32,
    pub max_spaces: i32,
}

/// One membership row of the agency <-> subscription pivot. Historical rows
/// persist; the effective one is always derived from the time window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AgencySubscription {
    pub id: i64,
    pub agency_id: i64,
    pub subscription_id: i64,
    pub status: i16,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RenewSubscriptionRequest {
    pub subscription_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MembershipResponse {
    pub id: i64,
    pub subscription_id: i64,
    pub status: i16,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub current: bool,
}

impl MembershipResponse {
    pub fn from_row(row: AgencySubscription, now: DateTime<Utc>) -> Self {
        let current = is_current(row.status, row.start_date, row.end_date, now);
        Self {
            id: row.id,
            subscription_id: row.subscription_id,
            status: row.status,
            start_date: row.start_date,
            end_date: row.end_date,
            current,
        }
    }
}

/// Agency dashboard view: effective plan plus quota usage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionOverviewResponse {
    pub plan: SubscriptionPlan,
    pub membership: MembershipResponse,
    pub ads_used: i64,
    pub spaces_used: i64,
}
