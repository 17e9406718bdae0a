use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::handlers::require_agency;
use crate::models::*;
use crate::services::AdService;

#[utoipa::path(
    get,
    path = "/ads",
    tag = "ad",
    params(
        ("q" = Option<String>, Query, description = "Title search"),
        ("space_id" = Option<i64>, Query, description = "Restrict to one space"),
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Public listing, boosted ads first")
    )
)]
pub async fn list_ads(
    ad_service: web::Data<AdService>,
    query: web::Query<AdQuery>,
) -> Result<HttpResponse> {
    match ad_service.list_public(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ads/{id}",
    tag = "ad",
    params(("id" = i64, Path, description = "Ad id")),
    responses(
        (status = 200, description = "Ad detail", body = AdResponse),
        (status = 404, description = "Not found or not public")
    )
)]
pub async fn get_ad(
    ad_service: web::Data<AdService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match ad_service.get_public(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/ads",
    tag = "ad",
    request_body = CreateAdRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ad created", body = AdResponse),
        (status = 403, description = "Quota exceeded"),
        (status = 404, description = "Space not found")
    )
)]
pub async fn create_ad(
    ad_service: web::Data<AdService>,
    req: HttpRequest,
    request: web::Json<CreateAdRequest>,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match ad_service.create(user.id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/ads/{id}",
    tag = "ad",
    params(("id" = i64, Path, description = "Ad id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ad moved to trash", body = AdResponse),
        (status = 404, description = "Not found"),
        (status = 409, description = "Already trashed")
    )
)]
pub async fn trash_ad(
    ad_service: web::Data<AdService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match ad_service.trash_own(user.id, path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Ad moved to trash"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/my/ads",
    tag = "ad",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Page size")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The agency's own ads, any status except trash")
    )
)]
pub async fn my_ads(
    ad_service: web::Data<AdService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match ad_service.list_for_agency(user.id, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn ad_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ads")
            .route("", web::get().to(list_ads))
            .route("", web::post().to(create_ad))
            .route("/{id}", web::get().to(get_ad))
            .route("/{id}", web::delete().to(trash_ad)),
    );
    cfg.service(web::scope("/my").route("/ads", web::get().to(my_ads)));
}
