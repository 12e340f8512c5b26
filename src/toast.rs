use serde::{Deserialize, Serialize};
use std::time::Duration;
use tauri::{AppHandle, Runtime};

use crate::events::{emit_event, event_names};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

pub fn success<R: Runtime>(app: &AppHandle<R>, message: &str) {
    show(app, Toast {
        message: message.to_string(),
        kind: ToastKind::Success,
    });
}

pub fn error<R: Runtime>(app: &AppHandle<R>, message: &str) {
    show(app, Toast {
        message: message.to_string(),
        kind: ToastKind::Error,
    });
}

/// Display a toast and schedule its dismissal.
///
/// One toast is visible at a time: a new toast replaces the previous one
/// outright. Hide timers carry no token and are never cancelled, so a timer
/// armed by an earlier toast can hide a newer one before its 3 s are up —
/// last call wins, best effort.
pub fn show<R: Runtime>(app: &AppHandle<R>, toast: Toast) {
    if let Err(e) = emit_event(app, event_names::TOAST_SHOW, toast) {
        tracing::warn!("Failed to emit toast: {}", e);
        return;
    }
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(TOAST_DURATION).await;
        let _ = emit_event(&app, event_names::TOAST_HIDE, ());
    });
}
