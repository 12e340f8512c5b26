use serde::de::DeserializeOwned;
use serde::Serialize;
use tauri::{AppHandle, Runtime};
use url::Url;

use crate::toast;
use crate::types::broker::{
    ConsumerInfo, CreateConsumerRequest, CreateStreamRequest, PublishAck, StreamInfo,
};
use crate::types::health::HealthSnapshot;

/// Request/response client for the broker gateway.
///
/// Every failure — transport error or non-2xx status — collapses into a
/// `String` detail (the response body when there is one). The default entry
/// points raise an error toast and propagate; the `_quiet` variants skip the
/// toast and exist for the health poller, which reports through the
/// connectivity indicator instead.
///
/// Cloning is cheap: `reqwest::Client` shares its pool.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base: Url,
}

impl Gateway {
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn from_env() -> Self {
        Self::new(crate::config::gateway_url())
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, String> {
        self.base
            .join(path)
            .map_err(|e| format!("Invalid gateway path {}: {}", path, e))
    }

    pub async fn get_quiet<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let url = self.endpoint(path)?;
        let res = self
            .http
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::decode(res).await
    }

    pub async fn post_quiet<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let url = self.endpoint(path)?;
        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::decode(res).await
    }

    async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, String> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            if body.trim().is_empty() {
                return Err(status.to_string());
            }
            return Err(body.trim().to_string());
        }
        res.json::<T>().await.map_err(|e| e.to_string())
    }

    pub async fn get<R: Runtime, T: DeserializeOwned>(
        &self,
        app: &AppHandle<R>,
        path: &str,
    ) -> Result<T, String> {
        self.get_quiet(path).await.map_err(|e| {
            toast::error(app, &e);
            e
        })
    }

    pub async fn post<R: Runtime, B: Serialize, T: DeserializeOwned>(
        &self,
        app: &AppHandle<R>,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        self.post_quiet(path, body).await.map_err(|e| {
            toast::error(app, &e);
            e
        })
    }

    pub async fn server_info_quiet(&self) -> Result<HealthSnapshot, String> {
        self.get_quiet("/api/server").await
    }

    pub async fn server_info<R: Runtime>(
        &self,
        app: &AppHandle<R>,
    ) -> Result<HealthSnapshot, String> {
        self.get(app, "/api/server").await
    }

    pub async fn streams<R: Runtime>(&self, app: &AppHandle<R>) -> Result<Vec<StreamInfo>, String> {
        self.get(app, "/api/streams").await
    }

    pub async fn consumers<R: Runtime>(
        &self,
        app: &AppHandle<R>,
        stream: &str,
    ) -> Result<Vec<ConsumerInfo>, String> {
        self.get(app, &consumers_path(stream)).await
    }

    pub async fn create_stream<R: Runtime>(
        &self,
        app: &AppHandle<R>,
        req: &CreateStreamRequest,
    ) -> Result<serde_json::Value, String> {
        self.post(app, "/api/streams/create", req).await
    }

    pub async fn delete_stream<R: Runtime>(
        &self,
        app: &AppHandle<R>,
        name: &str,
    ) -> Result<serde_json::Value, String> {
        self.post(app, "/api/streams/delete", &serde_json::json!({ "name": name }))
            .await
    }

    pub async fn create_consumer<R: Runtime>(
        &self,
        app: &AppHandle<R>,
        req: &CreateConsumerRequest,
    ) -> Result<serde_json::Value, String> {
        self.post(app, "/api/consumers/create", req).await
    }

    pub async fn delete_consumer<R: Runtime>(
        &self,
        app: &AppHandle<R>,
        stream: &str,
        name: &str,
    ) -> Result<serde_json::Value, String> {
        self.post(
            app,
            "/api/consumers/delete",
            &serde_json::json!({ "stream": stream, "name": name }),
        )
        .await
    }

    pub async fn publish<R: Runtime>(
        &self,
        app: &AppHandle<R>,
        subject: &str,
        data: &str,
    ) -> Result<PublishAck, String> {
        self.post(
            app,
            "/api/publish",
            &serde_json::json!({ "subject": subject, "data": data }),
        )
        .await
    }
}

/// Build the consumer-list path with the stream name form-encoded, so names
/// with spaces or query metacharacters survive the round trip.
fn consumers_path(stream: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("stream", stream)
        .finish();
    format!("/api/consumers?{}", query)
}
