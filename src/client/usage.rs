//! Response header bookkeeping: usage, rate limits, request ids.

use crate::types::{RateLimitInfo, RequestMeta, Usage};
use reqwest::header::HeaderMap;
use std::time::Duration;

/// First non-empty value among `names`.
pub(crate) fn header_first(headers: &HeaderMap, names: &[&str]) -> Option<String> {
    for name in names {
        if let Some(v) = headers.get(*name) {
            if let Ok(s) = v.to_str() {
                let s = s.trim();
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            }
        }
    }
    None
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    header_first(headers, &[name])?.parse().ok()
}

/// `Retry-After: <seconds>`; the HTTP-date form is not supported.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    header_u64(headers, "retry-after").map(Duration::from_secs)
}

/// Monthly usage, only when all three headers parse.
pub(crate) fn usage(headers: &HeaderMap) -> Option<Usage> {
    Some(Usage {
        limit: header_u64(headers, "x-monthly-limit")?,
        used: header_u64(headers, "x-monthly-used")?,
        remaining: header_u64(headers, "x-monthly-remaining")?,
    })
}

pub(crate) fn rate_limit(headers: &HeaderMap) -> Option<RateLimitInfo> {
    Some(RateLimitInfo {
        limit: header_u64(headers, "x-ratelimit-limit")?,
        remaining: header_u64(headers, "x-ratelimit-remaining")?,
        reset: header_u64(headers, "x-ratelimit-reset"),
    })
}

pub(crate) fn request_meta(headers: &HeaderMap, latency_ms: u64) -> RequestMeta {
    RequestMeta {
        request_id: header_first(headers, &["x-request-id", "request-id"]),
        latency_ms,
        usage: usage(headers),
        rate_limit: rate_limit(headers),
    }
}
