//! Error kinds: the flat discriminator behind [`crate::Error`].
//!
//! Every error the client can produce maps to exactly one [`ErrorKind`]. Callers
//! dispatch on the kind instead of matching individual variants, and the retry
//! engine uses [`ErrorKind::retryable`] as its default classification.
//!
//! | Kind                   | HTTP | Retryable |
//! |------------------------|------|-----------|
//! | `validation`           | 400  | no        |
//! | `authentication`       | 401  | no        |
//! | `tier_access_restricted` | 403 | no       |
//! | `not_found`            | 404  | no        |
//! | `rate_limit_exceeded`  | 429  | yes       |
//! | `quota_exceeded`       | 429  | no        |
//! | `server`               | 5xx  | yes       |
//! | `timeout`              | -    | yes       |
//! | `network`              | -    | yes       |
//!
//! ## Example
//!
//! ```rust
//! use tuteliq::error_code::ErrorKind;
//!
//! let kind = ErrorKind::from_http_status(503);
//! assert_eq!(kind.name(), "server");
//! assert!(kind.retryable());
//! ```

use std::fmt;

/// Discriminator for [`crate::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid or missing credential
    Authentication,
    /// Request rate limit exceeded; may carry a retry-after
    RateLimitExceeded,
    /// Malformed or out-of-bounds input
    Validation,
    /// Resource does not exist
    NotFound,
    /// Remote-side fault
    Server,
    /// Request exceeded its deadline
    Timeout,
    /// Transport-level failure (connection refused, reset, DNS, TLS)
    Network,
    /// Monthly usage cap reached
    QuotaExceeded,
    /// Current plan does not include the endpoint
    TierAccessRestricted,
    /// Client configuration rejected at build time
    Configuration,
    /// Operation invoked in a state that does not allow it
    Usage,
    /// Voice connection closed while `end()` was waiting for the summary
    ClosedBeforeSummary,
    /// Payload could not be encoded or decoded
    Serialization,
}

impl ErrorKind {
    /// Stable snake_case name, suitable for logs and metrics labels.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Server => "server",
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::QuotaExceeded => "quota_exceeded",
            Self::TierAccessRestricted => "tier_access_restricted",
            Self::Configuration => "configuration",
            Self::Usage => "usage",
            Self::ClosedBeforeSummary => "closed_before_summary",
            Self::Serialization => "serialization",
        }
    }

    /// Whether failures of this kind are retried by default.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::Server | Self::Network | Self::Timeout
        )
    }

    /// Maps a non-2xx HTTP status to the most likely kind.
    ///
    /// 429 defaults to `RateLimitExceeded`; [`ErrorKind::from_api_code`] refines
    /// it to `QuotaExceeded` when the body says so, and names the kind for
    /// unlisted non-5xx statuses. Unlisted statuses
    /// map to `Server`; [`crate::Error::is_retryable`] only retries those in 5xx.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 413 | 422 => Self::Validation,
            401 => Self::Authentication,
            403 => Self::TierAccessRestricted,
            404 => Self::NotFound,
            408 => Self::Timeout,
            429 => Self::RateLimitExceeded,
            _ => Self::Server,
        }
    }

    /// Maps a machine-readable code from the API error envelope.
    ///
    /// Returns `None` for codes that do not pin down a kind on their own.
    pub fn from_api_code(code: &str) -> Option<Self> {
        let kind = match code.to_ascii_uppercase().as_str() {
            "UNAUTHORIZED" | "INVALID_API_KEY" | "AUTHENTICATION_FAILED" => Self::Authentication,
            "RATE_LIMIT_EXCEEDED" | "TOO_MANY_REQUESTS" => Self::RateLimitExceeded,
            "VALIDATION_ERROR" | "INVALID_REQUEST" | "BAD_REQUEST" => Self::Validation,
            "NOT_FOUND" => Self::NotFound,
            "QUOTA_EXCEEDED" | "MONTHLY_LIMIT_EXCEEDED" | "MONTHLY_LIMIT_REACHED"
            | "INSUFFICIENT_CREDITS" => Self::QuotaExceeded,
            "TIER_ACCESS_DENIED" | "TIER_RESTRICTED" | "PLAN_UPGRADE_REQUIRED" => {
                Self::TierAccessRestricted
            }
            "INTERNAL_ERROR" | "SERVER_ERROR" | "SERVICE_UNAVAILABLE" => Self::Server,
            _ => return None,
        };
        Some(kind)
    }

    /// Default human-readable message used when the API body carries none.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication failed. Please check your API key.",
            Self::RateLimitExceeded => "Rate limit exceeded. Please try again later.",
            Self::Validation => "Request validation failed",
            Self::NotFound => "Resource not found",
            Self::Server => "Server error. Please try again later.",
            Self::Timeout => "Request timed out",
            Self::Network => "Network error. Please check your connection.",
            Self::QuotaExceeded => {
                "Monthly message limit reached. Please upgrade your plan or purchase credits."
            }
            Self::TierAccessRestricted => "This endpoint is not available on your current plan.",
            Self::Configuration => "Invalid client configuration",
            Self::Usage => "Operation not valid in the current state",
            Self::ClosedBeforeSummary => "Connection closed before session summary",
            Self::Serialization => "Failed to encode or decode payload",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
