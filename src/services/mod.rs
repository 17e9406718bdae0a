pub mod ad_service;
pub mod auth_service;
pub mod boost_service;
pub mod reconciliation_service;
pub mod report_service;
pub mod space_service;
pub mod subscription_service;
pub mod transaction_service;

pub use ad_service::*;
pub use auth_service::*;
pub use boost_service::*;
pub use reconciliation_service::*;
pub use report_service::*;
pub use space_service::*;
pub use subscription_service::*;
pub use transaction_service::*;
