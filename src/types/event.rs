use serde::{Deserialize, Serialize};

/// A single broker event received over the live feed.
///
/// Immutable once constructed. `payload` keeps the full raw event object so
/// the view can render fields this struct does not model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveEvent {
    pub subject: String,
    pub timestamp: String,
    pub payload: serde_json::Value,
}

impl LiveEvent {
    /// Build an event from a raw gateway payload.
    ///
    /// `subject` and `timestamp` are optional on the wire; a missing subject
    /// becomes `"unknown"` and a missing timestamp falls back to
    /// `received_at` (the receipt time, RFC 3339).
    pub fn from_payload(payload: serde_json::Value, received_at: &str) -> Self {
        let subject = payload
            .get("subject")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown")
            .to_string();
        let timestamp = payload
            .get("timestamp")
            .and_then(|t| t.as_str())
            .unwrap_or(received_at)
            .to_string();
        Self {
            subject,
            timestamp,
            payload,
        }
    }
}
