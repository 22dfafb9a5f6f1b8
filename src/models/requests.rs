use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for the recommendations view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsQuery {
    #[serde(default)]
    pub brief: Option<String>,
}

/// Request to email a shortlist of assets to the brief's contact
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShortlistRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 1))]
    #[serde(alias = "asset_ids", rename = "assetIds")]
    pub asset_ids: Vec<String>,
}
