use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::handlers::require_agency;
use crate::models::*;
use crate::services::BoostService;

#[utoipa::path(
    get,
    path = "/catalog/boosts",
    tag = "boost",
    responses(
        (status = 200, description = "Boost catalog")
    )
)]
pub async fn boost_catalog(boost_service: web::Data<BoostService>) -> Result<HttpResponse> {
    match boost_service.list_catalog().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/boosts",
    tag = "boost",
    request_body = PurchaseBoostRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Boost purchased", body = AdBoostResponse),
        (status = 404, description = "Ad or boost not found")
    )
)]
pub async fn purchase_boost(
    boost_service: web::Data<BoostService>,
    req: HttpRequest,
    request: web::Json<PurchaseBoostRequest>,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match boost_service.purchase(user.id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ads/{ad_id}/boosts",
    tag = "boost",
    params(("ad_id" = i64, Path, description = "Ad id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Boost windows for the ad, display order"),
        (status = 404, description = "Ad not found")
    )
)]
pub async fn ad_boosts(
    boost_service: web::Data<BoostService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match boost_service.list_for_ad(user.id, path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn boost_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalog/boosts", web::get().to(boost_catalog));
    cfg.service(web::scope("/boosts").route("", web::post().to(purchase_boost)));
    cfg.route("/ads/{ad_id}/boosts", web::get().to(ad_boosts));
}
