use std::time::Duration;

use tauri::{AppHandle, Runtime};

use crate::events::{emit_event, event_names};
use crate::gateway::Gateway;

/// Interval between aggregate health polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10_000);

/// Start the background health poll: once immediately, then every 10 s.
///
/// Success emits `health:snapshot`; failure emits `health:unreachable` and
/// nothing else — no toast, so a broken gateway does not raise an alert every
/// tick, and the webview keeps the last good counters while degrading only
/// the indicator. Polls are not sequenced; a slow response simply lands
/// last-write-wins.
pub fn spawn_health_poller<R: Runtime>(app: AppHandle<R>, gateway: Gateway) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        loop {
            ticker.tick().await;
            poll_once(&app, &gateway).await;
        }
    });
}

async fn poll_once<R: Runtime>(app: &AppHandle<R>, gateway: &Gateway) {
    match gateway.server_info_quiet().await {
        Ok(snapshot) => {
            if let Err(e) = emit_event(app, event_names::HEALTH_SNAPSHOT, snapshot) {
                tracing::warn!("Failed to emit health snapshot: {}", e);
            }
        }
        Err(e) => {
            tracing::debug!("Health poll failed: {}", e);
            if let Err(e) = emit_event(app, event_names::HEALTH_UNREACHABLE, ()) {
                tracing::warn!("Failed to emit health status: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_interval_is_ten_seconds() {
        assert_eq!(POLL_INTERVAL, Duration::from_secs(10));
    }
}
