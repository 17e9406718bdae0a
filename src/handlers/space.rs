use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::handlers::require_agency;
use crate::models::*;
use crate::services::SpaceService;

#[utoipa::path(
    post,
    path = "/spaces",
    tag = "space",
    request_body = CreateSpaceRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Space created", body = SpaceResponse),
        (status = 403, description = "Quota exceeded")
    )
)]
pub async fn create_space(
    space_service: web::Data<SpaceService>,
    req: HttpRequest,
    request: web::Json<CreateSpaceRequest>,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match space_service.create(user.id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spaces",
    tag = "space",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The agency's spaces")
    )
)]
pub async fn list_spaces(
    space_service: web::Data<SpaceService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_agency(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match space_service.list(user.id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn space_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/spaces")
            .route("", web::get().to(list_spaces))
            .route("", web::post().to(create_space)),
    );
}
