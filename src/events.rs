use serde::Serialize;
use tauri::{AppHandle, Emitter, Runtime};

/// Event names as constants — matches the listener names in dist/app.js
pub mod event_names {
    pub const FEED_EVENT: &str = "feed:event";
    pub const FEED_STATUS: &str = "feed:status";
    pub const HEALTH_SNAPSHOT: &str = "health:snapshot";
    pub const HEALTH_UNREACHABLE: &str = "health:unreachable";
    pub const TOAST_SHOW: &str = "toast:show";
    pub const TOAST_HIDE: &str = "toast:hide";
}

pub fn emit_event<R: Runtime, T: Serialize + Clone>(
    app: &AppHandle<R>,
    event: &str,
    payload: T,
) -> Result<(), String> {
    app.emit(event, payload).map_err(|e| e.to_string())
}
