use tauri::{AppHandle, State};

use crate::gateway::Gateway;
use crate::toast;
use crate::types::broker::{ConsumerInfo, CreateConsumerRequest};

pub fn validate_create_consumer(req: &CreateConsumerRequest) -> Result<(), String> {
    if req.stream.trim().is_empty() || req.name.trim().is_empty() {
        return Err("Select a stream and provide a name".to_string());
    }
    Ok(())
}

#[tauri::command]
pub async fn consumers_list(
    app: AppHandle,
    gateway: State<'_, Gateway>,
    stream: String,
) -> Result<Vec<ConsumerInfo>, String> {
    gateway.consumers(&app, &stream).await
}

#[tauri::command]
pub async fn consumer_create(
    app: AppHandle,
    gateway: State<'_, Gateway>,
    req: CreateConsumerRequest,
) -> Result<serde_json::Value, String> {
    if let Err(msg) = validate_create_consumer(&req) {
        toast::error(&app, &msg);
        return Err(msg);
    }
    let res = gateway.create_consumer(&app, &req).await?;
    toast::success(&app, &format!("Consumer \"{}\" created", req.name));
    Ok(res)
}

#[tauri::command]
pub async fn consumer_delete(
    app: AppHandle,
    gateway: State<'_, Gateway>,
    stream: String,
    name: String,
) -> Result<serde_json::Value, String> {
    if stream.trim().is_empty() || name.trim().is_empty() {
        let msg = "Stream and consumer name are required".to_string();
        toast::error(&app, &msg);
        return Err(msg);
    }
    let res = gateway.delete_consumer(&app, &stream, &name).await?;
    toast::success(&app, &format!("Consumer \"{}\" deleted", name));
    Ok(res)
}
