use crate::error::{AppError, AppResult};
use crate::lifecycle::AdStatus;
use crate::lifecycle::boost::display_order;
use crate::models::*;
use crate::services::transaction_service::record_transaction;
use chrono::{Duration, Utc};
use sqlx::{FromRow, PgPool};

const AD_BOOST_COLUMNS: &str = "id, ad_id, boost_id, start_date, end_date, active, created_at, updated_at";

#[derive(Debug, FromRow)]
struct RankedAdBoost {
    #[sqlx(flatten)]
    row: AdBoost,
    priority_level: i32,
}

#[derive(Clone)]
pub struct BoostService {
    pool: PgPool,
}

impl BoostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_catalog(&self) -> AppResult<Vec<Boost>> {
        let boosts = sqlx::query_as::<_, Boost>(
            "SELECT id, name, duration_days, priority_level, amount_cents FROM boosts ORDER BY priority_level",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(boosts)
    }

    pub async fn get(&self, boost_id: i64) -> AppResult<Boost> {
        sqlx::query_as::<_, Boost>(
            "SELECT id, name, duration_days, priority_level, amount_cents FROM boosts WHERE id = $1",
        )
        .bind(boost_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Boost not found".into()))
    }

    /// Open the boost window (`start = now`, `end = now + duration`) and
    /// write the ledger row in one transaction. The `active` flag starts
    /// true and is owned by the reconciliation job from then on.
    pub async fn purchase(
        &self,
        agency_id: i64,
        req: PurchaseBoostRequest,
    ) -> AppResult<AdBoostResponse> {
        let ad_status: Option<AdStatus> =
            sqlx::query_scalar("SELECT status FROM ads WHERE id = $1 AND agency_id = $2")
                .bind(req.ad_id)
                .bind(agency_id)
                .fetch_optional(&self.pool)
                .await?;
        let ad_status = ad_status.ok_or_else(|| AppError::NotFound("Ad not found".into()))?;
        if ad_status == AdStatus::Trash {
            return Err(AppError::ValidationError("Cannot boost a removed ad".into()));
        }

        let boost = self.get(req.boost_id).await?;
        let now = Utc::now();
        let end = now + Duration::days(i64::from(boost.duration_days));

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, AdBoost>(&format!(
            r#"
            INSERT INTO ad_boosts (ad_id, boost_id, start_date, end_date, active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING {AD_BOOST_COLUMNS}
            "#
        ))
        .bind(req.ad_id)
        .bind(req.boost_id)
        .bind(now)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        record_transaction(
            &mut *tx,
            agency_id,
            TransactionType::Boost,
            TransactionStatus::Success,
            boost.amount_cents,
            Some(format!("Boost {} for ad {}", boost.name, req.ad_id)),
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "Ad {} boosted with {} (priority {}) until {end}",
            req.ad_id,
            boost.name,
            boost.priority_level
        );

        Ok(AdBoostResponse::from_row(row, now))
    }

    /// All boost windows for one of the agency's ads, in display order.
    pub async fn list_for_ad(&self, agency_id: i64, ad_id: i64) -> AppResult<Vec<AdBoostResponse>> {
        let owned: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ads WHERE id = $1 AND agency_id = $2)")
                .bind(ad_id)
                .bind(agency_id)
                .fetch_one(&self.pool)
                .await?;
        if !owned {
            return Err(AppError::NotFound("Ad not found".into()));
        }

        let mut rows = sqlx::query_as::<_, RankedAdBoost>(
            r#"
            SELECT ab.id, ab.ad_id, ab.boost_id, ab.start_date, ab.end_date, ab.active,
                   ab.created_at, ab.updated_at, b.priority_level
            FROM ad_boosts ab
            JOIN boosts b ON b.id = ab.boost_id
            WHERE ab.ad_id = $1
            "#,
        )
        .bind(ad_id)
        .fetch_all(&self.pool)
        .await?;

        rows.sort_by(|a, b| {
            display_order(
                a.priority_level,
                a.row.start_date,
                b.priority_level,
                b.row.start_date,
            )
        });

        let now = Utc::now();
        Ok(rows
            .into_iter()
            .map(|r| AdBoostResponse::from_row(r.row, now))
            .collect())
    }
}
