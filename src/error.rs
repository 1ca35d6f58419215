use crate::error_code::ErrorKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Extra metadata the API attaches to error responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorMeta {
    /// Machine-readable code from the API (e.g. `"RATE_LIMIT_EXCEEDED"`)
    #[serde(default)]
    pub code: Option<String>,
    /// Suggested action to resolve the error
    #[serde(default)]
    pub suggestion: Option<String>,
    /// Helpful links (e.g. `{"upgrade": "https://tuteliq.ai/pricing"}`)
    #[serde(default)]
    pub links: HashMap<String, String>,
}

impl ErrorMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_link(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.links.insert(name.into(), url.into());
        self
    }
}

/// Unified error type for the Tuteliq client.
///
/// One variant per [`ErrorKind`]; use [`Error::kind`] to dispatch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {message}{}", format_meta(.meta))]
    Authentication { message: String, meta: ErrorMeta },

    #[error("Rate limit exceeded: {message}{}{}", format_retry_after(.retry_after), format_meta(.meta))]
    RateLimitExceeded {
        message: String,
        /// Server-specified wait before the next attempt
        retry_after: Option<Duration>,
        meta: ErrorMeta,
    },

    #[error("Validation error: {message}{}", format_meta(.meta))]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
        meta: ErrorMeta,
    },

    #[error("Not found: {message}{}", format_meta(.meta))]
    NotFound { message: String, meta: ErrorMeta },

    #[error("Server error: HTTP {status}: {message}{}", format_meta(.meta))]
    Server {
        status: u16,
        message: String,
        meta: ErrorMeta,
    },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Quota exceeded: {message}{}", format_meta(.meta))]
    QuotaExceeded { message: String, meta: ErrorMeta },

    #[error("Tier access restricted: {message}{}", format_meta(.meta))]
    TierAccessRestricted { message: String, meta: ErrorMeta },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Connection closed before session summary (code: {code}){}", format_reason(.reason))]
    ClosedBeforeSummary { code: u16, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_meta(meta: &ErrorMeta) -> String {
    let mut parts = Vec::new();
    if let Some(ref code) = meta.code {
        parts.push(format!("code: {}", code));
    }
    if let Some(ref suggestion) = meta.suggestion {
        parts.push(format!("suggestion: {}", suggestion));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_retry_after(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(d) => format!(" (retry after {}s)", d.as_secs()),
        None => String::new(),
    }
}

fn format_reason(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(": {}", reason)
    }
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            details: None,
            meta: ErrorMeta::default(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage {
            message: msg.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network {
            message: msg.into(),
        }
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Error::Timeout {
            message: msg.into(),
        }
    }

    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Error::RateLimitExceeded {
            message: ErrorKind::RateLimitExceeded.default_message().to_string(),
            retry_after,
            meta: ErrorMeta::default(),
        }
    }

    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Error::Server {
            status,
            message: msg.into(),
            meta: ErrorMeta::default(),
        }
    }

    /// Build an API error of the given kind.
    ///
    /// `status` is only kept for `Server`; `retry_after` only for `RateLimitExceeded`;
    /// `details` only for `Validation`. Client-side kinds ignore `meta`.
    pub fn from_kind(
        kind: ErrorKind,
        status: u16,
        message: impl Into<String>,
        meta: ErrorMeta,
        retry_after: Option<Duration>,
        details: Option<serde_json::Value>,
    ) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Authentication => Error::Authentication { message, meta },
            ErrorKind::RateLimitExceeded => Error::RateLimitExceeded {
                message,
                retry_after,
                meta,
            },
            ErrorKind::Validation => Error::Validation {
                message,
                details,
                meta,
            },
            ErrorKind::NotFound => Error::NotFound { message, meta },
            ErrorKind::QuotaExceeded => Error::QuotaExceeded { message, meta },
            ErrorKind::TierAccessRestricted => Error::TierAccessRestricted { message, meta },
            ErrorKind::Timeout => Error::Timeout { message },
            ErrorKind::Network => Error::Network { message },
            ErrorKind::Configuration => Error::Configuration { message },
            ErrorKind::Usage => Error::Usage { message },
            ErrorKind::Server | ErrorKind::ClosedBeforeSummary | ErrorKind::Serialization => {
                Error::Server {
                    status,
                    message,
                    meta,
                }
            }
        }
    }

    /// The kind discriminator.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::RateLimitExceeded { .. } => ErrorKind::RateLimitExceeded,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Server { .. } => ErrorKind::Server,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Network { .. } => ErrorKind::Network,
            Error::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Error::TierAccessRestricted { .. } => ErrorKind::TierAccessRestricted,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Usage { .. } => ErrorKind::Usage,
            Error::ClosedBeforeSummary { .. } => ErrorKind::ClosedBeforeSummary,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Default retry classification (see [`ErrorKind::retryable`]).
    ///
    /// A `Server` error only retries for 5xx; unexpected statuses outside that
    /// range keep the `Server` shape but are treated as final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Server { status, .. } => (500..=599).contains(status),
            _ => self.kind().retryable(),
        }
    }

    /// Server-specified retry-after, only present on rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimitExceeded { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status associated with the error, if it came from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Authentication { .. } => Some(401),
            Error::RateLimitExceeded { .. } | Error::QuotaExceeded { .. } => Some(429),
            Error::Validation { .. } => Some(400),
            Error::NotFound { .. } => Some(404),
            Error::TierAccessRestricted { .. } => Some(403),
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// API metadata (code, suggestion, links) if the error came from the API.
    pub fn meta(&self) -> Option<&ErrorMeta> {
        match self {
            Error::Authentication { meta, .. }
            | Error::RateLimitExceeded { meta, .. }
            | Error::Validation { meta, .. }
            | Error::NotFound { meta, .. }
            | Error::Server { meta, .. }
            | Error::QuotaExceeded { meta, .. }
            | Error::TierAccessRestricted { meta, .. } => Some(meta),
            _ => None,
        }
    }

    /// Shortcut for `meta().code`.
    pub fn code(&self) -> Option<&str> {
        self.meta().and_then(|m| m.code.as_deref())
    }

    /// Shortcut for `meta().suggestion`.
    pub fn suggestion(&self) -> Option<&str> {
        self.meta().and_then(|m| m.suggestion.as_deref())
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Authentication { message, .. }
            | Error::RateLimitExceeded { message, .. }
            | Error::Validation { message, .. }
            | Error::NotFound { message, .. }
            | Error::Server { message, .. }
            | Error::Timeout { message }
            | Error::Network { message }
            | Error::QuotaExceeded { message, .. }
            | Error::TierAccessRestricted { message, .. }
            | Error::Configuration { message }
            | Error::Usage { message } => message.clone(),
            Error::ClosedBeforeSummary { .. } | Error::Serialization(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_dispatch() {
        assert_eq!(Error::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(Error::timeout("x").kind(), ErrorKind::Timeout);
        assert_eq!(Error::server(502, "x").kind(), ErrorKind::Server);
        assert_eq!(Error::usage("x").kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_retry_after_only_on_rate_limit() {
        let err = Error::rate_limited(Some(Duration::from_secs(3)));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
        assert!(err.is_retryable());
        assert_eq!(Error::server(500, "boom").retry_after(), None);
    }

    #[test]
    fn test_from_kind_keeps_meta() {
        let meta = ErrorMeta::new()
            .with_code("TIER_ACCESS_DENIED")
            .with_suggestion("Upgrade your plan")
            .with_link("upgrade", "https://tuteliq.ai/pricing");
        let err = Error::from_kind(
            ErrorKind::TierAccessRestricted,
            403,
            "Not on your plan",
            meta,
            None,
            None,
        );
        assert_eq!(err.kind(), ErrorKind::TierAccessRestricted);
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.code(), Some("TIER_ACCESS_DENIED"));
        assert_eq!(err.suggestion(), Some("Upgrade your plan"));
        assert_eq!(
            err.meta().and_then(|m| m.links.get("upgrade")).map(String::as_str),
            Some("https://tuteliq.ai/pricing")
        );
        assert!(err.to_string().contains("code: TIER_ACCESS_DENIED"));
    }

    #[test]
    fn test_closed_before_summary_display() {
        let err = Error::ClosedBeforeSummary {
            code: 1006,
            reason: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Connection closed before session summary (code: 1006)"
        );
        assert!(!err.is_retryable());
    }
}
