use tauri::{AppHandle, State};

use crate::gateway::Gateway;
use crate::toast;
use crate::types::broker::{CreateStreamRequest, StreamInfo};

/// Local validation for stream creation; runs before any network call.
pub fn validate_create_stream(req: &CreateStreamRequest) -> Result<(), String> {
    if req.name.trim().is_empty() || req.subjects.iter().all(|s| s.trim().is_empty()) {
        return Err("Name and subjects are required".to_string());
    }
    Ok(())
}

pub fn validate_stream_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Stream name is required".to_string());
    }
    Ok(())
}

#[tauri::command]
pub async fn streams_list(
    app: AppHandle,
    gateway: State<'_, Gateway>,
) -> Result<Vec<StreamInfo>, String> {
    gateway.streams(&app).await
}

#[tauri::command]
pub async fn stream_create(
    app: AppHandle,
    gateway: State<'_, Gateway>,
    req: CreateStreamRequest,
) -> Result<serde_json::Value, String> {
    if let Err(msg) = validate_create_stream(&req) {
        toast::error(&app, &msg);
        return Err(msg);
    }
    let res = gateway.create_stream(&app, &req).await?;
    toast::success(&app, &format!("Stream \"{}\" created", req.name));
    Ok(res)
}

#[tauri::command]
pub async fn stream_delete(
    app: AppHandle,
    gateway: State<'_, Gateway>,
    name: String,
) -> Result<serde_json::Value, String> {
    if let Err(msg) = validate_stream_name(&name) {
        toast::error(&app, &msg);
        return Err(msg);
    }
    let res = gateway.delete_stream(&app, &name).await?;
    toast::success(&app, &format!("Stream \"{}\" deleted", name));
    Ok(res)
}
