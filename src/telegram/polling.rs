//! Long-polling update loop

use super::{BotApi, UpdateHandler};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Pull updates with `getUpdates` until cancelled
pub async fn run(api: &BotApi, handler: &dyn UpdateHandler, timeout_secs: u64, cancel: CancellationToken) {
    if let Err(e) = api.delete_webhook().await {
        tracing::warn!(error = %e, "Failed to delete webhook before polling");
    }
    tracing::info!(timeout_secs, "Polling for updates");

    let mut offset = 0;
    loop {
        let result = tokio::select! {
            () = cancel.cancelled() => break,
            result = api.get_updates(offset, timeout_secs) => result,
        };

        match result {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    handler.dispatch(update).await;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "getUpdates failed, backing off");
                tokio::select! {
                    () = cancel.cancelled() => break,
                    () = tokio::time::sleep(ERROR_BACKOFF) => {}
                }
            }
        }
    }

    tracing::info!("Polling stopped");
}
