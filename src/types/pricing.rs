//! Pricing plan types.

use serde::{Deserialize, Serialize};

/// Public plan from `GET /api/v1/pricing` (no auth required).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub name: String,
    /// Display string such as `"$29/mo"`
    pub price: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
    pub cta: String,
    pub cta_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub plans: Vec<PricingPlan>,
}

/// Detailed plan from `GET /api/v1/pricing/details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingDetailPlan {
    pub id: String,
    pub name: String,
    pub tier: String,
    pub description: String,
    pub price_monthly: f64,
    pub price_yearly: f64,
    pub api_calls_per_month: u64,
    /// Requests per minute
    pub rate_limit: u64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingDetailsResult {
    pub plans: Vec<PricingDetailPlan>,
}
