use crate::client::core::TuteliqClient;
use crate::resilience::RetryPolicy;
use crate::transport::HttpTransport;
use crate::voice::{VoiceConnector, WsConnector, DEFAULT_VOICE_ENDPOINT};
use crate::{Error, Result};
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.tuteliq.ai";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const MIN_API_KEY_LENGTH: usize = 10;

const MIN_TIMEOUT_MS: u64 = 1_000;
const MAX_TIMEOUT_MS: u64 = 120_000;
const MAX_RETRIES: u32 = 10;

/// Builder for [`TuteliqClient`].
///
/// Unset options fall back to the environment:
/// - `TUTELIQ_API_KEY`, then the OS keyring entry `tuteliq`/`api_key`
/// - `TUTELIQ_BASE_URL` (default `https://api.tuteliq.ai`)
/// - `TUTELIQ_TIMEOUT_MS` (default 30000)
/// - `TUTELIQ_PROXY_URL`
pub struct TuteliqClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    retry_delay: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
    proxy_url: Option<String>,
    voice_endpoint: Option<String>,
    voice_connector: Option<Arc<dyn VoiceConnector>>,
}

impl TuteliqClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: None,
            retries: None,
            retry_delay: None,
            retry_policy: None,
            proxy_url: None,
            voice_endpoint: None,
            voice_connector: None,
        }
    }

    /// Set the API key explicitly. Skips the env/keyring lookup.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base URL (e.g. a mock server in tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-request timeout, 1s to 120s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retries after the first attempt, 0 to 10. Default 3.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Initial backoff delay. Default 1s.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Full retry policy; `retries` and `retry_delay` still override its fields.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    /// Override the voice WebSocket endpoint.
    pub fn voice_endpoint(mut self, url: impl Into<String>) -> Self {
        self.voice_endpoint = Some(url.into());
        self
    }

    /// Replace the WebSocket connector used by voice sessions.
    pub fn voice_connector(mut self, connector: Arc<dyn VoiceConnector>) -> Self {
        self.voice_connector = Some(connector);
        self
    }

    /// Validate the configuration and build the client.
    pub fn build(self) -> Result<TuteliqClient> {
        let api_key = self
            .api_key
            .or_else(HttpTransport::resolve_api_key)
            .unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(Error::configuration("API key is required"));
        }
        if api_key.len() < MIN_API_KEY_LENGTH {
            return Err(Error::configuration(format!(
                "API key is too short (minimum {} characters)",
                MIN_API_KEY_LENGTH
            )));
        }

        let timeout = self.timeout.unwrap_or_else(|| {
            std::env::var("TUTELIQ_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TIMEOUT)
        });
        let timeout_ms = timeout.as_millis();
        if timeout_ms < MIN_TIMEOUT_MS as u128 || timeout_ms > MAX_TIMEOUT_MS as u128 {
            return Err(Error::configuration(format!(
                "Timeout must be between {} and {} ms (got {})",
                MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, timeout_ms
            )));
        }

        let mut retry = self.retry_policy.unwrap_or_default();
        if let Some(retries) = self.retries {
            retry = retry.with_max_retries(retries);
        }
        if let Some(delay) = self.retry_delay {
            retry = retry.with_initial_delay(delay);
        }
        if retry.max_retries > MAX_RETRIES {
            return Err(Error::configuration(format!(
                "Retries must be between 0 and {} (got {})",
                MAX_RETRIES, retry.max_retries
            )));
        }
        if retry.max_delay < retry.initial_delay {
            let initial = retry.initial_delay;
            retry = retry.with_max_delay(initial);
        }
        retry.validate()?;

        let base_url = self
            .base_url
            .or_else(|| std::env::var("TUTELIQ_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        check_url(&base_url, &["http", "https"], "base URL")?;

        let voice_endpoint = self
            .voice_endpoint
            .unwrap_or_else(|| DEFAULT_VOICE_ENDPOINT.to_string());
        check_url(&voice_endpoint, &["ws", "wss"], "voice endpoint")?;

        let proxy_url = self
            .proxy_url
            .or_else(|| std::env::var("TUTELIQ_PROXY_URL").ok())
            .filter(|s| !s.trim().is_empty());

        let transport = HttpTransport::new(&base_url, &api_key, timeout, proxy_url.as_deref())?;
        let voice_connector = self
            .voice_connector
            .unwrap_or_else(|| Arc::new(WsConnector::new(timeout)));

        Ok(TuteliqClient {
            transport: Arc::new(transport),
            retry,
            last_response: Arc::new(ArcSwapOption::empty()),
            api_key,
            voice_endpoint,
            voice_connector,
        })
    }
}

impl Default for TuteliqClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_url(raw: &str, schemes: &[&str], what: &str) -> Result<()> {
    let url = url::Url::parse(raw)
        .map_err(|e| Error::configuration(format!("Invalid {} {}: {}", what, raw, e)))?;
    if !schemes.contains(&url.scheme()) {
        return Err(Error::configuration(format!(
            "Invalid {} {}: scheme must be one of {:?}",
            what, raw, schemes
        )));
    }
    Ok(())
}
