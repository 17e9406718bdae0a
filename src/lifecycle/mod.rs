//! Status lifecycle rules for the marketplace entities.
//!
//! The legal state transitions for ads and reports, the computed activation
//! phase of a boost, and the membership-window logic for agency subscriptions
//! all live here as plain functions over plain values. The service layer
//! applies these rules against storage; nothing in this module touches the
//! database.

pub mod ad;
pub mod boost;
pub mod report;
pub mod subscription;

pub use ad::AdStatus;
pub use boost::BoostPhase;
pub use report::ReportStatus;
pub use subscription::{MEMBERSHIP_ACTIVE, MEMBERSHIP_CLOSED};
