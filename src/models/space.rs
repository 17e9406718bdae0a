use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Space {
    pub id: i64,
    pub agency_id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSpaceRequest {
    #[schema(example = "Downtown Showroom")]
    pub name: String,
    /// Optional; derived from the name when omitted.
    #[schema(example = "downtown-showroom")]
    pub slug: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SpaceResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl From<Space> for SpaceResponse {
    fn from(s: Space) -> Self {
        Self {
            id: s.id,
            name: s.name,
            slug: s.slug,
            created_at: s.created_at,
        }
    }
}
