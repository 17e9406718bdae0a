use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::lifecycle::{AdStatus, BoostPhase, ReportStatus};
use crate::models::*;
use crate::services::ReconciliationReport;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::ad::list_ads,
        handlers::ad::get_ad,
        handlers::ad::create_ad,
        handlers::ad::trash_ad,
        handlers::ad::my_ads,
        handlers::space::create_space,
        handlers::space::list_spaces,
        handlers::boost::boost_catalog,
        handlers::boost::purchase_boost,
        handlers::boost::ad_boosts,
        handlers::subscription::plan_catalog,
        handlers::subscription::subscription_overview,
        handlers::subscription::renew_subscription,
        handlers::subscription::subscription_history,
        handlers::transaction::transaction_history,
        handlers::report::submit_report,
        handlers::admin::pending_ads,
        handlers::admin::set_ad_status,
        handlers::admin::list_reports,
        handlers::admin::resolve_report,
        handlers::admin::reconcile_now,
    ),
    components(
        schemas(
            User,
            UserResponse,
            UserRole,
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            AuthResponse,
            Space,
            CreateSpaceRequest,
            SpaceResponse,
            Ad,
            AdStatus,
            CreateAdRequest,
            UpdateAdStatusRequest,
            AdResponse,
            Boost,
            AdBoost,
            BoostPhase,
            PurchaseBoostRequest,
            AdBoostResponse,
            SubscriptionPlan,
            AgencySubscription,
            RenewSubscriptionRequest,
            MembershipResponse,
            SubscriptionOverviewResponse,
            Report,
            ReportStatus,
            CreateReportRequest,
            ResolveReportRequest,
            ReportResponse,
            Transaction,
            TransactionStatus,
            TransactionType,
            TransactionResponse,
            ReconciliationReport,
            PaginationParams,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and tokens"),
        (name = "ad", description = "Public listings and agency ads"),
        (name = "space", description = "Agency storefronts"),
        (name = "boost", description = "Visibility boosts"),
        (name = "subscription", description = "Plans and memberships"),
        (name = "transaction", description = "Payment ledger"),
        (name = "report", description = "Abuse reports"),
        (name = "admin", description = "Moderation and maintenance")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
