use super::core::TuteliqClient;
use super::validation::{
    validate_id, validate_webhook_events, validate_webhook_name, validate_webhook_url,
};
use crate::types::{
    CreateWebhookInput, CreateWebhookResult, DeleteWebhookResult, RegenerateSecretResult,
    TestWebhookResult, UpdateWebhookInput, UpdateWebhookResult, WebhookListResult,
};
use crate::{Error, Result};

impl TuteliqClient {
    pub async fn list_webhooks(&self) -> Result<WebhookListResult> {
        self.get("/api/v1/webhooks").await
    }

    /// Register a webhook. Store the returned `secret`; it is not shown again.
    pub async fn create_webhook(&self, input: &CreateWebhookInput) -> Result<CreateWebhookResult> {
        validate_webhook_name(&input.name)?;
        validate_webhook_url(&input.url)?;
        validate_webhook_events(&input.events)?;
        self.post("/api/v1/webhooks", serde_json::to_value(input)?)
            .await
    }

    pub async fn update_webhook(
        &self,
        id: &str,
        input: &UpdateWebhookInput,
    ) -> Result<UpdateWebhookResult> {
        validate_id("Webhook", id)?;
        if input.is_empty() {
            return Err(Error::validation("At least one field to update is required"));
        }
        if let Some(name) = &input.name {
            validate_webhook_name(name)?;
        }
        if let Some(url) = &input.url {
            validate_webhook_url(url)?;
        }
        if let Some(events) = &input.events {
            validate_webhook_events(events)?;
        }
        self.patch(&webhook_path(id, ""), serde_json::to_value(input)?)
            .await
    }

    pub async fn delete_webhook(&self, id: &str) -> Result<DeleteWebhookResult> {
        validate_id("Webhook", id)?;
        self.delete(&webhook_path(id, "")).await
    }

    /// Send a test payload to the webhook.
    pub async fn test_webhook(&self, id: &str) -> Result<TestWebhookResult> {
        validate_id("Webhook", id)?;
        self.post(&webhook_path(id, "/test"), serde_json::json!({}))
            .await
    }

    /// Rotate the signing secret. The old secret stops working immediately.
    pub async fn regenerate_webhook_secret(&self, id: &str) -> Result<RegenerateSecretResult> {
        validate_id("Webhook", id)?;
        self.post(&webhook_path(id, "/regenerate-secret"), serde_json::json!({}))
            .await
    }
}

fn webhook_path(id: &str, suffix: &str) -> String {
    format!("/api/v1/webhooks/{}{}", id, suffix)
}
