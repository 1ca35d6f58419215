//! Client-side input checks, run before any network call.

use crate::types::TrackingFields;
use crate::{Error, Result};

pub(crate) const MAX_CONTENT_LENGTH: usize = 50_000;
pub(crate) const MAX_MESSAGES: usize = 100;
pub(crate) const MAX_EXTERNAL_ID_LENGTH: usize = 255;
pub(crate) const MAX_WEBHOOK_NAME_LENGTH: usize = 100;
pub(crate) const MAX_WEBHOOK_EVENTS: usize = 5;

pub(crate) fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::validation("Content is required"));
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_LENGTH {
        return Err(Error::validation(format!(
            "Content exceeds maximum length of {} characters (got {})",
            MAX_CONTENT_LENGTH, len
        )));
    }
    Ok(())
}

pub(crate) fn validate_messages<T>(messages: &[T]) -> Result<()> {
    if messages.is_empty() {
        return Err(Error::validation("Messages array cannot be empty"));
    }
    if messages.len() > MAX_MESSAGES {
        return Err(Error::validation(format!(
            "Messages array exceeds maximum count of {} (got {})",
            MAX_MESSAGES,
            messages.len()
        )));
    }
    Ok(())
}

pub(crate) fn validate_tracking(tracking: &TrackingFields) -> Result<()> {
    if let Some(id) = &tracking.external_id {
        if id.chars().count() > MAX_EXTERNAL_ID_LENGTH {
            return Err(Error::validation(format!(
                "external_id exceeds maximum length of {} characters",
                MAX_EXTERNAL_ID_LENGTH
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_situation(situation: &str) -> Result<()> {
    if situation.trim().is_empty() {
        return Err(Error::validation("Situation description is required"));
    }
    validate_content(situation)
}

pub(crate) fn validate_webhook_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Webhook name is required"));
    }
    if name.chars().count() > MAX_WEBHOOK_NAME_LENGTH {
        return Err(Error::validation(format!(
            "Webhook name exceeds maximum length of {} characters",
            MAX_WEBHOOK_NAME_LENGTH
        )));
    }
    Ok(())
}

pub(crate) fn validate_webhook_url(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url)
        .map_err(|e| Error::validation(format!("Invalid webhook URL: {}", e)))?;
    if parsed.scheme() != "https" {
        return Err(Error::validation("Webhook URL must use HTTPS"));
    }
    Ok(())
}

pub(crate) fn validate_webhook_events(events: &[String]) -> Result<()> {
    if events.is_empty() || events.len() > MAX_WEBHOOK_EVENTS {
        return Err(Error::validation(format!(
            "Webhooks must subscribe to between 1 and {} events",
            MAX_WEBHOOK_EVENTS
        )));
    }
    Ok(())
}

pub(crate) fn validate_id(kind: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::validation(format!("{} ID is required", kind)));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(Error::validation(format!("{} ID contains invalid characters", kind)));
    }
    Ok(())
}
