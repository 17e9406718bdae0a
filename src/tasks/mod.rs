//! Background scheduled tasks for the application.
//!
//! The one recurring job is expiry reconciliation: re-projecting boost and
//! membership windows into their stored flags as time crosses the window
//! boundaries. Call `spawn_all` once during startup to launch it.

use crate::services::ReconciliationService;

/// Spawn all background tasks.
///
/// Notes
/// - The reconciliation pass is idempotent and may overlap user requests;
///   its writes only touch rows whose stored flag is stale.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(reconciliation_service: ReconciliationService, interval_secs: u64) {
    tokio::spawn(async move {
        loop {
            let now = chrono::Utc::now();
            match reconciliation_service.reconcile_expirations(now).await {
                Ok(r) if r.total() > 0 => log::info!(
                    "Expiry reconciliation: {} boosts activated, {} boosts deactivated, {} memberships closed",
                    r.boosts_activated,
                    r.boosts_deactivated,
                    r.memberships_closed
                ),
                Ok(_) => {}
                Err(e) => log::error!("Failed to reconcile expirations: {e:?}"),
            }
            tokio::time::sleep(std::time::Duration::from_secs(interval_secs)).await;
        }
    });
}
