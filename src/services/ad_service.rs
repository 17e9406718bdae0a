use crate::error::{AppError, AppResult};
use crate::lifecycle::AdStatus;
use crate::models::*;
use crate::services::SubscriptionService;
use chrono::Utc;
use sqlx::PgPool;

const AD_COLUMNS: &str =
    "id, space_id, agency_id, title, description, price_cents, status, views_count, created_at, updated_at";

#[derive(Clone)]
pub struct AdService {
    pool: PgPool,
    subscription_service: SubscriptionService,
    auto_approve: bool,
}

impl AdService {
    pub fn new(pool: PgPool, subscription_service: SubscriptionService, auto_approve: bool) -> Self {
        Self {
            pool,
            subscription_service,
            auto_approve,
        }
    }

    pub async fn create(&self, agency_id: i64, req: CreateAdRequest) -> AppResult<AdResponse> {
        if req.title.trim().is_empty() {
            return Err(AppError::ValidationError("Title is required".into()));
        }
        if req.price_cents < 0 {
            return Err(AppError::ValidationError("Price cannot be negative".into()));
        }

        let space_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM spaces WHERE id = $1 AND agency_id = $2)",
        )
        .bind(req.space_id)
        .bind(agency_id)
        .fetch_one(&self.pool)
        .await?;
        if !space_exists {
            return Err(AppError::NotFound("Space not found".into()));
        }

        self.subscription_service
            .ensure_can_create_ad(agency_id)
            .await?;

        let status = if self.auto_approve {
            AdStatus::Valid
        } else {
            AdStatus::Pending
        };

        let ad = sqlx::query_as::<_, Ad>(&format!(
            r#"
            INSERT INTO ads (space_id, agency_id, title, description, price_cents, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {AD_COLUMNS}
            "#
        ))
        .bind(req.space_id)
        .bind(agency_id)
        .bind(req.title.trim())
        .bind(req.description.unwrap_or_default())
        .bind(req.price_cents)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(AdResponse::from(ad))
    }

    /// Public listing: valid ads only, actively boosted ads first (higher
    /// priority wins, ties to the earlier boost start), then newest.
    pub async fn list_public(&self, query: &AdQuery) -> AppResult<PaginatedResponse<AdResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let now = Utc::now();
        let q = query.q.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM ads a
            WHERE a.status = 'valid'
              AND ($1::text IS NULL OR a.title ILIKE '%' || $1 || '%')
              AND ($2::bigint IS NULL OR a.space_id = $2)
            "#,
        )
        .bind(&q)
        .bind(query.space_id)
        .fetch_one(&self.pool)
        .await?;

        let ads = sqlx::query_as::<_, Ad>(
            r#"
            SELECT a.id, a.space_id, a.agency_id, a.title, a.description, a.price_cents,
                   a.status, a.views_count, a.created_at, a.updated_at
            FROM ads a
            LEFT JOIN LATERAL (
                SELECT b.priority_level, ab.start_date
                FROM ad_boosts ab
                JOIN boosts b ON b.id = ab.boost_id
                WHERE ab.ad_id = a.id AND ab.active AND ab.start_date <= $3 AND ab.end_date > $3
                ORDER BY b.priority_level DESC, ab.start_date ASC
                LIMIT 1
            ) boost ON TRUE
            WHERE a.status = 'valid'
              AND ($1::text IS NULL OR a.title ILIKE '%' || $1 || '%')
              AND ($2::bigint IS NULL OR a.space_id = $2)
            ORDER BY boost.priority_level DESC NULLS LAST,
                     boost.start_date ASC NULLS LAST,
                     a.created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(&q)
        .bind(query.space_id)
        .bind(now)
        .bind(params.get_limit())
        .bind(params.get_offset())
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<AdResponse> = ads.into_iter().map(AdResponse::from).collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// Fetch one publicly visible ad and count the view.
    pub async fn get_public(&self, ad_id: i64) -> AppResult<AdResponse> {
        let ad = sqlx::query_as::<_, Ad>(&format!(
            r#"
            UPDATE ads SET views_count = views_count + 1
            WHERE id = $1 AND status = 'valid'
            RETURNING {AD_COLUMNS}
            "#
        ))
        .bind(ad_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".into()))?;

        Ok(AdResponse::from(ad))
    }

    pub async fn list_for_agency(
        &self,
        agency_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<AdResponse>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ads WHERE agency_id = $1 AND status <> 'trash'",
        )
        .bind(agency_id)
        .fetch_one(&self.pool)
        .await?;

        let ads = sqlx::query_as::<_, Ad>(&format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM ads
            WHERE agency_id = $1 AND status <> 'trash'
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(agency_id)
        .bind(params.get_limit())
        .bind(params.get_offset())
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<AdResponse> = ads.into_iter().map(AdResponse::from).collect();

        Ok(PaginatedResponse::new(items, params, total))
    }

    /// Moderation queue, oldest submissions first.
    pub async fn pending_queue(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<AdResponse>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ads WHERE status = 'pending'")
            .fetch_one(&self.pool)
            .await?;

        let ads = sqlx::query_as::<_, Ad>(&format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM ads
            WHERE status = 'pending'
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(params.get_limit())
        .bind(params.get_offset())
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<AdResponse> = ads.into_iter().map(AdResponse::from).collect();

        Ok(PaginatedResponse::new(items, params, total))
    }

    /// Admin status change, guarded by the ad state machine. The new status
    /// is visible to listing queries as soon as the update lands.
    pub async fn set_status(&self, ad_id: i64, new_status: AdStatus) -> AppResult<AdResponse> {
        let ad = self.fetch(ad_id).await?;

        ad.status.ensure_transition(new_status)?;

        let updated = sqlx::query_as::<_, Ad>(&format!(
            "UPDATE ads SET status = $2, updated_at = $3 WHERE id = $1 RETURNING {AD_COLUMNS}"
        ))
        .bind(ad_id)
        .bind(new_status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        log::info!("Ad {ad_id} status: {} -> {new_status}", ad.status);

        Ok(AdResponse::from(updated))
    }

    /// An agency can soft-remove its own ad from any state.
    pub async fn trash_own(&self, agency_id: i64, ad_id: i64) -> AppResult<AdResponse> {
        let ad = sqlx::query_as::<_, Ad>(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE id = $1 AND agency_id = $2"
        ))
        .bind(ad_id)
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".into()))?;

        ad.status.ensure_transition(AdStatus::Trash)?;

        let updated = sqlx::query_as::<_, Ad>(&format!(
            "UPDATE ads SET status = $2, updated_at = $3 WHERE id = $1 RETURNING {AD_COLUMNS}"
        ))
        .bind(ad_id)
        .bind(AdStatus::Trash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(AdResponse::from(updated))
    }

    async fn fetch(&self, ad_id: i64) -> AppResult<Ad> {
        sqlx::query_as::<_, Ad>(&format!("SELECT {AD_COLUMNS} FROM ads WHERE id = $1"))
            .bind(ad_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Ad not found".into()))
    }
}
