use super::core::TuteliqClient;
use crate::types::{PolicyConfig, PolicyConfigResponse};
use crate::Result;

impl TuteliqClient {
    /// Current moderation policy.
    pub async fn get_policy(&self) -> Result<PolicyConfigResponse> {
        self.get("/api/v1/policy").await
    }

    /// Update the moderation policy. Only `Some` fields are sent.
    pub async fn set_policy(&self, policy: &PolicyConfig) -> Result<PolicyConfigResponse> {
        self.put("/api/v1/policy", serde_json::to_value(policy)?)
            .await
    }
}
