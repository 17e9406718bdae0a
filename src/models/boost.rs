use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::lifecycle::BoostPhase;
use crate::lifecycle::boost::phase_at;

/// Immutable catalog entry for a purchasable visibility boost.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Boost {
    pub id: i64,
    pub name: String,
    pub duration_days: i32,
    pub priority_level: i32,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdBoost {
    pub id: i64,
    pub ad_id: i64,
    pub boost_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseBoostRequest {
    pub ad_id: i64,
    pub boost_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdBoostResponse {
    pub id: i64,
    pub ad_id: i64,
    pub boost_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
    /// Phase computed from the window at response time; `active` is the
    /// stored projection and may lag until the next reconciliation run.
    pub phase: BoostPhase,
}

impl AdBoostResponse {
    pub fn from_row(row: AdBoost, now: DateTime<Utc>) -> Self {
        let phase = phase_at(row.start_date, row.end_date, now);
        Self {
            id: row.id,
            ad_id: row.ad_id,
            boost_id: row.boost_id,
            start_date: row.start_date,
            end_date: row.end_date,
            active: row.active,
            phase,
        }
    }
}
