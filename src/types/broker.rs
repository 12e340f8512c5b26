use serde::{Deserialize, Serialize};

/// Stream listing row from `GET /api/streams`.
///
/// Field names follow the gateway's snake_case wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInfo {
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub storage: String,
    #[serde(default)]
    pub retention: String,
    #[serde(default)]
    pub max_age: String,
    #[serde(default)]
    pub messages: u64,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub consumers: u64,
}

/// Consumer listing row from `GET /api/consumers?stream=<name>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerInfo {
    pub name: String,
    pub stream: String,
    #[serde(default)]
    pub filter_subject: String,
    #[serde(default)]
    pub ack_policy: String,
    #[serde(default)]
    pub deliver_policy: String,
    #[serde(default)]
    pub num_pending: u64,
    #[serde(default)]
    pub num_ack_pending: u64,
    #[serde(default)]
    pub num_redelivered: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStreamRequest {
    pub name: String,
    pub subjects: Vec<String>,
    #[serde(default)]
    pub storage: String,
    #[serde(default)]
    pub retention: String,
    #[serde(default)]
    pub max_age: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConsumerRequest {
    pub stream: String,
    pub name: String,
    #[serde(default)]
    pub filter_subject: String,
    #[serde(default)]
    pub ack_policy: String,
    #[serde(default)]
    pub deliver_policy: String,
}

/// Acknowledgment returned by `POST /api/publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishAck {
    pub status: String,
    pub subject: String,
    #[serde(default)]
    pub stream: String,
    #[serde(default)]
    pub sequence: u64,
}
