use crate::resilience::{with_retry, RetryPolicy};
use crate::transport::http::error_from_reply;
use crate::transport::HttpTransport;
use crate::types::{RateLimitInfo, RequestMeta, Usage, VoiceStreamConfig};
use crate::voice::{VoiceConnector, VoiceSession, VoiceStreamHandler};
use crate::Result;
use arc_swap::ArcSwapOption;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use super::builder::TuteliqClientBuilder;
use super::usage;

/// Client for the Tuteliq API.
///
/// Cheap to clone; clones share the connection pool and the last-response
/// metadata.
#[derive(Clone)]
pub struct TuteliqClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) retry: RetryPolicy,
    pub(crate) last_response: Arc<ArcSwapOption<RequestMeta>>,
    pub(crate) api_key: String,
    pub(crate) voice_endpoint: String,
    pub(crate) voice_connector: Arc<dyn VoiceConnector>,
}

impl std::fmt::Debug for TuteliqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TuteliqClient")
            .field("base_url", &self.transport.base_url())
            .field("voice_endpoint", &self.voice_endpoint)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl TuteliqClient {
    /// Create a client with default settings and the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        TuteliqClientBuilder::new().api_key(api_key).build()
    }

    /// Create a client configured entirely from the environment.
    pub fn from_env() -> Result<Self> {
        TuteliqClientBuilder::new().build()
    }

    pub fn builder() -> TuteliqClientBuilder {
        TuteliqClientBuilder::new()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Monthly usage from the most recent response, if the API reported it.
    pub fn usage(&self) -> Option<Usage> {
        self.last_response.load().as_ref().and_then(|m| m.usage)
    }

    /// Rate-limit window from the most recent response.
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        self.last_response.load().as_ref().and_then(|m| m.rate_limit)
    }

    /// Server request id of the most recent response.
    pub fn last_request_id(&self) -> Option<String> {
        self.last_response
            .load()
            .as_ref()
            .and_then(|m| m.request_id.clone())
    }

    /// Latency of the most recent HTTP attempt.
    pub fn last_latency_ms(&self) -> Option<u64> {
        self.last_response.load().as_ref().map(|m| m.latency_ms)
    }

    /// Open a voice stream with this client's credentials.
    ///
    /// Returns immediately; await [`VoiceSession::ready`] to know the server
    /// accepted the session.
    pub fn voice_stream<H: VoiceStreamHandler>(
        &self,
        config: Option<VoiceStreamConfig>,
        handler: H,
    ) -> Result<VoiceSession> {
        VoiceSession::open(
            self.voice_connector.clone(),
            self.voice_endpoint.clone(),
            self.api_key.clone(),
            config,
            handler,
        )
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None).await
    }

    /// Execute through the retry engine and decode the JSON body.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let value = with_retry(&self.retry, || {
            self.execute_once(method.clone(), path, body.as_ref())
        })
        .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// One attempt: send, record response metadata, map failures.
    async fn execute_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let client_request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let reply = match self
            .transport
            .execute(method, path, body, &client_request_id)
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                info!(
                    error_kind = err.kind().name(),
                    endpoint = path,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "tuteliq request failed"
                );
                return Err(err);
            }
        };

        let latency_ms = start.elapsed().as_millis() as u64;
        self.last_response
            .store(Some(Arc::new(usage::request_meta(&reply.headers, latency_ms))));

        if !reply.is_success() {
            let err = error_from_reply(reply.status, &reply.body, usage::retry_after(&reply.headers));
            info!(
                http_status = reply.status,
                error_kind = err.kind().name(),
                endpoint = path,
                duration_ms = latency_ms,
                client_request_id = client_request_id.as_str(),
                "tuteliq request failed"
            );
            return Err(err);
        }

        if reply.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&reply.body)?)
    }
}
