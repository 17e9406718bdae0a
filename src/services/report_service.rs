use crate::error::{AppError, AppResult};
use crate::lifecycle::{AdStatus, ReportStatus};
use crate::models::*;
use chrono::Utc;
use sqlx::PgPool;

const REPORT_COLUMNS: &str =
    "id, ad_id, reporter_id, reason, status, resolution_note, created_at, updated_at";

#[derive(Clone)]
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn submit(
        &self,
        reporter_id: Option<i64>,
        req: CreateReportRequest,
    ) -> AppResult<ReportResponse> {
        if req.reason.trim().is_empty() {
            return Err(AppError::ValidationError("A reason is required".into()));
        }

        let ad_status: Option<AdStatus> = sqlx::query_scalar("SELECT status FROM ads WHERE id = $1")
            .bind(req.ad_id)
            .fetch_optional(&self.pool)
            .await?;
        match ad_status {
            None | Some(AdStatus::Trash) => {
                return Err(AppError::NotFound("Ad not found".into()));
            }
            Some(_) => {}
        }

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            INSERT INTO reports (ad_id, reporter_id, reason)
            VALUES ($1, $2, $3)
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(req.ad_id)
        .bind(reporter_id)
        .bind(req.reason.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(ReportResponse::from(report))
    }

    pub async fn queue(&self, query: &ReportQuery) -> AppResult<PaginatedResponse<ReportResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reports WHERE ($1::report_status IS NULL OR status = $1)",
        )
        .bind(query.status)
        .fetch_one(&self.pool)
        .await?;

        let reports = sqlx::query_as::<_, Report>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM reports
            WHERE ($1::report_status IS NULL OR status = $1)
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(query.status)
        .bind(params.get_limit())
        .bind(params.get_offset())
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<ReportResponse> = reports.into_iter().map(ReportResponse::from).collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// Resolve a report; with `block_ad` the reported ad is blocked in the
    /// same database transaction, so the pair commits or rolls back as one.
    pub async fn resolve(
        &self,
        report_id: i64,
        req: ResolveReportRequest,
    ) -> AppResult<ReportResponse> {
        if req.block_ad && req.status != ReportStatus::Resolved {
            return Err(AppError::ValidationError(
                "block_ad requires the report status to be 'resolved'".into(),
            ));
        }

        let block_ad = req.block_ad;
        let compound = |e: sqlx::Error| {
            if block_ad {
                AppError::CompoundTransitionFailed(e.to_string())
            } else {
                AppError::DatabaseError(e)
            }
        };

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let report = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1 FOR UPDATE"
        ))
        .bind(report_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".into()))?;

        report.status.ensure_transition(req.status)?;

        if block_ad {
            let ad_status: AdStatus =
                sqlx::query_scalar("SELECT status FROM ads WHERE id = $1 FOR UPDATE")
                    .bind(report.ad_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(compound)?;

            ad_status.ensure_transition(AdStatus::Blocked)?;

            sqlx::query("UPDATE ads SET status = $2, updated_at = $3 WHERE id = $1")
                .bind(report.ad_id)
                .bind(AdStatus::Blocked)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(compound)?;
        }

        let updated = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET status = $2, resolution_note = COALESCE($3, resolution_note), updated_at = $4
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(report_id)
        .bind(req.status)
        .bind(req.resolution_note)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(compound)?;

        tx.commit().await.map_err(compound)?;

        if block_ad {
            log::info!("Report {report_id} resolved, ad {} blocked", report.ad_id);
        } else {
            log::info!("Report {report_id}: {} -> {}", report.status, req.status);
        }

        Ok(ReportResponse::from(updated))
    }
}
