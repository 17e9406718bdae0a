use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Utc;
use serde_json::json;

use crate::handlers::require_admin;
use crate::models::*;
use crate::services::{AdService, ReconciliationService, ReportService};

#[utoipa::path(
    get,
    path = "/admin/ads/pending",
    tag = "admin",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Page size")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Moderation queue, oldest first"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn pending_ads(
    ad_service: web::Data<AdService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match ad_service.pending_queue(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/ads/{id}/status",
    tag = "admin",
    params(("id" = i64, Path, description = "Ad id")),
    request_body = UpdateAdStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status updated", body = AdResponse),
        (status = 404, description = "Ad not found"),
        (status = 409, description = "Transition not permitted")
    )
)]
pub async fn set_ad_status(
    ad_service: web::Data<AdService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateAdStatusRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match ad_service.set_status(path.into_inner(), request.status).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/reports",
    tag = "admin",
    params(
        ("status" = Option<String>, Query, description = "Filter by report status"),
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Page size")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Report queue, oldest first"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_reports(
    report_service: web::Data<ReportService>,
    req: HttpRequest,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match report_service.queue(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/reports/{id}/resolve",
    tag = "admin",
    params(("id" = i64, Path, description = "Report id")),
    request_body = ResolveReportRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Report resolved; ad blocked in the same transaction when requested", body = ReportResponse),
        (status = 404, description = "Report not found"),
        (status = 409, description = "Transition not permitted")
    )
)]
pub async fn resolve_report(
    report_service: web::Data<ReportService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<ResolveReportRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match report_service
        .resolve(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/reconcile",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Expiry flags re-projected from timestamps"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn reconcile_now(
    reconciliation_service: web::Data<ReconciliationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match reconciliation_service
        .reconcile_expirations(Utc::now())
        .await
    {
        Ok(report) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": report
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/ads/pending", web::get().to(pending_ads))
            .route("/ads/{id}/status", web::patch().to(set_ad_status))
            .route("/reports", web::get().to(list_reports))
            .route("/reports/{id}/resolve", web::post().to(resolve_report))
            .route("/reconcile", web::post().to(reconcile_now)),
    );
}
