//! Pricing and GDPR account endpoints.

use super::core::TuteliqClient;
use crate::types::{AccountDeletionResult, AccountExportResult, PricingDetailsResult, PricingResult};
use crate::Result;

impl TuteliqClient {
    /// Public pricing plans.
    pub async fn get_pricing(&self) -> Result<PricingResult> {
        self.get("/api/v1/pricing").await
    }

    /// Pricing plans with limits and monthly/yearly prices.
    pub async fn get_pricing_details(&self) -> Result<PricingDetailsResult> {
        self.get("/api/v1/pricing/details").await
    }

    /// Erase all data stored for this account (right to erasure).
    pub async fn delete_account_data(&self) -> Result<AccountDeletionResult> {
        self.delete("/api/v1/account/data").await
    }

    /// Export all data stored for this account (data portability).
    pub async fn export_account_data(&self) -> Result<AccountExportResult> {
        self.get("/api/v1/account/export").await
    }
}
