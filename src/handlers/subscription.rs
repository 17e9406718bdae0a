use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::handlers::require_agency;
use crate::models::*;
use crate::services::SubscriptionService;

#[utoipa::path(
    get,
    path = "/catalog/subscriptions",
    tag = "subscription",
    responses(
        (status = 200, description = "Subscription plan catalog")
    )
)]
pub async fn plan_catalog(
    subscription_service: web::Data<SubscriptionService>,
) -> Result<HttpResponse> {
    match subscription_service.list_plans().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscription",
    tag = "subscription",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Effective plan and quota usage", body = SubscriptionOverviewResponse),
        (status = 404, description = "No active subscription")
    )
)]
pub async fn subscription_overview(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match subscription_service.overview(user.id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subscription/renew",
    tag = "subscription",
    request_body = RenewSubscriptionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Membership renewed", body = MembershipResponse),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn renew_subscription(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    request: web::Json<RenewSubscriptionRequest>,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match subscription_service
        .renew(user.id, request.subscription_id)
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
    get,
    path = "/subscription/history",
    tag = "subscription",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Membership history, newest first")
    )
)]
pub async fn subscription_history(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match subscription_service.history(user.id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subscription_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalog/subscriptions", web::get().to(plan_catalog));
    cfg.service(
        web::scope("/subscription")
            .route("", web::get().to(subscription_overview))
            .route("/renew", web::post().to(renew_subscription))
            .route("/history", web::get().to(subscription_history)),
    );
}
