use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Campaign objective selected on the brief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    Awareness,
    Consideration,
    Conversions,
    #[serde(rename = "App Installs")]
    AppInstalls,
    Footfall,
    Trials,
}

impl Objective {
    pub const ALL: [Objective; 6] = [
        Objective::Awareness,
        Objective::Consideration,
        Objective::Conversions,
        Objective::AppInstalls,
        Objective::Footfall,
        Objective::Trials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Awareness => "Awareness",
            Objective::Consideration => "Consideration",
            Objective::Conversions => "Conversions",
            Objective::AppInstalls => "App Installs",
            Objective::Footfall => "Footfall",
            Objective::Trials => "Trials",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A targeted state, optionally narrowed to one city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geography {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Campaign flight dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Contact {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 10, max = 15))]
    pub phone: String,
}

/// Structured campaign requirements submitted by a brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Brief {
    #[validate(length(min = 2, max = 80))]
    pub brand_name: String,
    pub industry_category: String,
    pub objective: Objective,
    #[validate(length(min = 1))]
    pub primary_geography: Vec<Geography>,
    #[validate(length(min = 1))]
    pub sport_preferences: Vec<String>,
    #[validate(length(min = 1))]
    pub target_audience: Vec<String>,
    pub budget_range: String,
    pub timeline: Timeline,
    #[validate(length(min = 1))]
    pub deliverable_types: Vec<String>,
    #[validate(nested)]
    pub primary_contact: Contact,
}

/// Asset category, used as the column of the objective fit table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Athlete,
    League,
    Venue,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Athlete => "Athlete",
            AssetType::League => "League",
            AssetType::Venue => "Venue",
        }
    }
}

/// Variant-specific asset fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AssetKind {
    Athlete {
        sport: String,
        tier: String,
    },
    League {
        sport: String,
        season: String,
    },
    Venue {
        sports_supported: Vec<String>,
        venue_type: String,
    },
}

/// A recommendable athlete, league or venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub state: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub kind: AssetKind,
}

impl Asset {
    pub fn asset_type(&self) -> AssetType {
        match self.kind {
            AssetKind::Athlete { .. } => AssetType::Athlete,
            AssetKind::League { .. } => AssetType::League,
            AssetKind::Venue { .. } => AssetType::Venue,
        }
    }

    /// Sports this asset can be booked for. Athletes and leagues have exactly one.
    pub fn sports(&self) -> &[String] {
        match &self.kind {
            AssetKind::Athlete { sport, .. } | AssetKind::League { sport, .. } => {
                std::slice::from_ref(sport)
            }
            AssetKind::Venue { sports_supported, .. } => sports_supported,
        }
    }
}

/// Asset with its match score against a brief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAsset {
    #[serde(flatten)]
    pub asset: Asset,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}

/// Ranked shortlists for one brief
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub brief: Brief,
    pub athletes: Vec<ScoredAsset>,
    pub leagues: Vec<ScoredAsset>,
    pub venues: Vec<ScoredAsset>,
}

/// Opaque, signed carrier of a brief between the submit and recommend requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BriefToken(String);

impl BriefToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BriefToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of submitting a brief: the token that carries it to the next request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "briefId")]
    pub brief_id: String,
    pub token: BriefToken,
    #[serde(rename = "expiresAt")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Confirmation for a shortlist sent to the brief's contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortlist {
    #[serde(rename = "sentTo")]
    pub sent_to: String,
    pub assets: Vec<Asset>,
    #[serde(rename = "unknownIds")]
    pub unknown_ids: Vec<String>,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub sport: f64,
    pub geography: f64,
    pub objective: f64,
    pub featured: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            sport: 0.40,
            geography: 0.30,
            objective: 0.20,
            featured: 0.10,
        }
    }
}

/// Per-category shortlist lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCaps {
    pub athletes: usize,
    pub leagues: usize,
    pub venues: usize,
}

impl Default for SelectionCaps {
    fn default() -> Self {
        Self {
            athletes: 20,
            leagues: 10,
            venues: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_serializes_with_type_tag() {
        let json = r#"{
            "type": "Venue",
            "id": "v_9",
            "name": "Harbour Courts",
            "state": "Maharashtra",
            "featured": false,
            "image": "209",
            "sports_supported": ["Badminton", "Tennis"],
            "venue_type": "INDOOR_COURT"
        }"#;

        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.asset_type(), AssetType::Venue);
        assert_eq!(asset.city, None);
        assert_eq!(asset.sports(), ["Badminton".to_string(), "Tennis".to_string()]);

        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["type"], "Venue");
    }

    #[test]
    fn test_objective_display_strings() {
        let parsed: Objective = serde_json::from_str("\"App Installs\"").unwrap();
        assert_eq!(parsed, Objective::AppInstalls);
        assert_eq!(Objective::AppInstalls.to_string(), "App Installs");
        assert!(serde_json::from_str::<Objective>("\"Virality\"").is_err());
    }
}
