use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::lifecycle::ReportStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Report {
    pub id: i64,
    pub ad_id: i64,
    pub reporter_id: Option<i64>,
    pub reason: String,
    pub status: ReportStatus,
    pub resolution_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    pub ad_id: i64,
    #[schema(example = "Listing advertises a counterfeit product")]
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolveReportRequest {
    pub status: ReportStatus,
    /// When true the reported ad is blocked in the same transaction;
    /// requires `status` to be `resolved`.
    #[serde(default)]
    pub block_ad: bool,
    pub resolution_note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportQuery {
    pub status: Option<ReportStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub id: i64,
    pub ad_id: i64,
    pub reason: String,
    pub status: ReportStatus,
    pub resolution_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            ad_id: r.ad_id,
            reason: r.reason,
            status: r.status,
            resolution_note: r.resolution_note,
            created_at: r.created_at,
        }
    }
}
