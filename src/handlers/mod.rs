pub mod ad;
pub mod admin;
pub mod auth;
pub mod boost;
pub mod report;
pub mod space;
pub mod subscription;
pub mod transaction;

pub use ad::ad_config;
pub use admin::admin_config;
pub use auth::auth_config;
pub use boost::boost_config;
pub use report::report_config;
pub use space::space_config;
pub use subscription::subscription_config;
pub use transaction::transaction_config;

use crate::error::{AppError, AppResult};
use crate::middlewares::AuthenticatedUser;
use crate::models::UserRole;
use actix_web::{HttpMessage, HttpRequest};

pub(crate) fn current_user(req: &HttpRequest) -> AppResult<AuthenticatedUser> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

pub(crate) fn require_agency(req: &HttpRequest) -> AppResult<AuthenticatedUser> {
    let user = current_user(req)?;
    if user.role != UserRole::Agency {
        return Err(AppError::Forbidden);
    }
    Ok(user)
}

pub(crate) fn require_admin(req: &HttpRequest) -> AppResult<AuthenticatedUser> {
    let user = current_user(req)?;
    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden);
    }
    Ok(user)
}
