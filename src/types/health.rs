use serde::{Deserialize, Serialize};

/// Aggregate broker health as reported by `GET /api/server`.
///
/// Replaced wholesale on every poll; never merged or diffed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub connected: bool,
    #[serde(default)]
    pub streams: u64,
    #[serde(default)]
    pub consumers: u64,
    #[serde(default)]
    pub total_messages: u64,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub server_url: String,
}
