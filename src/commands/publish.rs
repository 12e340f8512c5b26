use tauri::{AppHandle, State};

use crate::gateway::Gateway;
use crate::toast;
use crate::types::broker::PublishAck;

pub fn validate_publish(subject: &str) -> Result<(), String> {
    if subject.trim().is_empty() {
        return Err("Subject is required".to_string());
    }
    Ok(())
}

/// Publish a test message. On gateway failure the error toast has already
/// been raised; the raw detail is returned so the publish panel can render it
/// inline as well.
#[tauri::command]
pub async fn message_publish(
    app: AppHandle,
    gateway: State<'_, Gateway>,
    subject: String,
    data: String,
) -> Result<PublishAck, String> {
    if let Err(msg) = validate_publish(&subject) {
        toast::error(&app, &msg);
        return Err(msg);
    }
    let ack = gateway.publish(&app, &subject, &data).await?;
    toast::success(&app, "Message published");
    Ok(ack)
}
