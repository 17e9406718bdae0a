use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::lifecycle::AdStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ad {
    pub id: i64,
    pub space_id: i64,
    pub agency_id: i64,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub status: AdStatus,
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAdRequest {
    pub space_id: i64,
    #[schema(example = "3-room apartment, city center")]
    pub title: String,
    #[schema(example = "Bright, renovated, close to transit.")]
    pub description: Option<String>,
    #[schema(example = 125000_i64)]
    pub price_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdStatusRequest {
    pub status: AdStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdQuery {
    /// Case-insensitive substring match on the title.
    pub q: Option<String>,
    pub space_id: Option<i64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdResponse {
    pub id: i64,
    pub space_id: i64,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub status: AdStatus,
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Ad> for AdResponse {
    fn from(a: Ad) -> Self {
        Self {
            id: a.id,
            space_id: a.space_id,
            title: a.title,
            description: a.description,
            price_cents: a.price_cents,
            status: a.status,
            views_count: a.views_count,
            created_at: a.created_at,
        }
    }
}
