//! Background scheduler for periodic platform sync.
//!
//! Every tick runs an incremental order import followed by a stock status
//! push. Both go through the sync service, so each run leaves a job result.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use backoffice_core::jobs::TaskOutcome;

use crate::main_lib::AppState;

/// Initial delay before first sync (60 seconds to let server fully start)
const INITIAL_DELAY_SECS: u64 = 60;

/// Starts the background sync scheduler.
pub fn start_sync_scheduler(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("Sync scheduler started ({}s interval)", every.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick is immediate
        let mut sync_interval = interval(every);
        sync_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            sync_interval.tick().await;
            run_scheduled_sync(&state).await;
        }
    });
}

/// Runs a single scheduled sync round.
pub async fn run_scheduled_sync(state: &AppState) {
    info!("Running scheduled sync...");

    report("order import", state.sync_service.import_orders(false).await);
    report(
        "stock status sync",
        state.sync_service.update_stock_status().await,
    );
}

fn report(what: &str, outcome: backoffice_core::Result<TaskOutcome>) {
    match outcome {
        Ok(TaskOutcome::Succeeded(value)) => info!("Scheduled {} completed: {}", what, value),
        Ok(TaskOutcome::Failed(message)) => warn!("Scheduled {} failed: {}", what, message),
        Err(e) => warn!("Scheduled {} could not be recorded: {}", what, e),
    }
}
