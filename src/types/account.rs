//! GDPR account data types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of erasing all account data (GDPR Art. 17).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDeletionResult {
    pub message: String,
    pub deleted_count: u64,
}

/// Full data export (GDPR Art. 20).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountExportResult {
    pub user_id: String,
    pub exported_at: String,
    /// Records grouped by collection
    pub data: HashMap<String, Vec<serde_json::Value>>,
}
