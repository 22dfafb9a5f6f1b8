use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response for a submitted brief
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitBriefResponse {
    #[serde(rename = "briefId")]
    pub brief_id: String,
    pub token: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "recommendationsUrl")]
    pub recommendations_url: String,
}

/// Reference data the brief form renders its choices from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormOptionsResponse {
    pub industries: Vec<String>,
    pub objectives: Vec<String>,
    pub geographies: BTreeMap<String, Vec<String>>,
    pub sports: Vec<String>,
    pub audiences: Vec<String>,
    #[serde(rename = "budgetRanges")]
    pub budget_ranges: Vec<String>,
    pub deliverables: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub catalog: CatalogSizes,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CatalogSizes {
    pub athletes: usize,
    pub leagues: usize,
    pub venues: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
