use tauri::{AppHandle, State};

use crate::gateway::Gateway;
use crate::types::health::HealthSnapshot;

/// On-demand aggregate snapshot for the overview tab. The background poller
/// covers the steady state; this serves the lazy load on tab activation.
#[tauri::command]
pub async fn server_info(
    app: AppHandle,
    gateway: State<'_, Gateway>,
) -> Result<HealthSnapshot, String> {
    gateway.server_info(&app).await
}
