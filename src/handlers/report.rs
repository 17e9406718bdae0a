use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::AuthenticatedUser;
use crate::models::*;
use crate::services::ReportService;

#[utoipa::path(
    post,
    path = "/reports",
    tag = "report",
    request_body = CreateReportRequest,
    responses(
        (status = 200, description = "Report filed", body = ReportResponse),
        (status = 404, description = "Ad not found")
    )
)]
pub async fn submit_report(
    report_service: web::Data<ReportService>,
    req: HttpRequest,
    request: web::Json<CreateReportRequest>,
) -> Result<HttpResponse> {
    // reports are open to anyone; attribute the reporter when signed in
    let reporter_id = req.extensions().get::<AuthenticatedUser>().map(|u| u.id);

    match report_service
        .submit(reporter_id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Report received"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn report_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("", web::post().to(submit_report)));
}
