use crate::error::ErrorMeta;
use crate::error_code::ErrorKind;
use crate::{Error, Result};
use keyring::Entry;
use reqwest::header::HeaderMap;
use reqwest::{Method, Proxy};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Raw reply from one HTTP attempt, success or not.
#[derive(Debug)]
pub struct HttpReply {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
        proxy_url: Option<&str>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(
                env::var("TUTELIQ_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(32),
            )
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .user_agent(concat!("tuteliq-rust/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| Error::configuration(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Resolve the API key: `TUTELIQ_API_KEY` first, then the OS keyring.
    pub fn resolve_api_key() -> Option<String> {
        if let Ok(key) = env::var("TUTELIQ_API_KEY") {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }

        let entry = Entry::new("tuteliq", "api_key").ok()?;
        entry.get_password().ok()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request. Any HTTP status is a reply; only transport failures are errors.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        client_request_id: &str,
    ) -> Result<HttpReply> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_key)
            .header("x-client-request-id", client_request_id);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(map_transport_error)?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(map_transport_error)?;
        debug!(http_status = status, endpoint = path, "tuteliq response received");

        Ok(HttpReply {
            status,
            headers,
            body,
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("Request timed out: {}", e))
    } else {
        Error::network(format!("Network error: {}", e))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
    #[serde(default)]
    suggestion: Option<String>,
    #[serde(default)]
    links: std::collections::HashMap<String, String>,
}

/// Translate a non-2xx reply into the error taxonomy.
///
/// A 429 whose body code names a monthly quota becomes `QuotaExceeded`;
/// otherwise 429 is `RateLimitExceeded` carrying `retry_after`. A non-5xx
/// status with no mapping of its own takes the kind its body code names.
pub fn error_from_reply(status: u16, body: &str, retry_after: Option<Duration>) -> Error {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let (message, details, meta) = match envelope.error {
        Some(err) => (
            err.message,
            err.details,
            ErrorMeta {
                code: err.code,
                suggestion: err.suggestion,
                links: err.links,
            },
        ),
        None => (envelope.message, None, ErrorMeta::default()),
    };

    let by_status = ErrorKind::from_http_status(status);
    let kind = match (by_status, meta.code.as_deref().and_then(ErrorKind::from_api_code)) {
        (ErrorKind::RateLimitExceeded, Some(ErrorKind::QuotaExceeded)) => ErrorKind::QuotaExceeded,
        (ErrorKind::Server, Some(by_code)) if status < 500 => by_code,
        _ => by_status,
    };
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| kind.default_message().to_string());

    Error::from_kind(kind, status, message, meta, retry_after, details)
}
