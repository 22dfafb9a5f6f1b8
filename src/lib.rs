//! KIBI Match - sponsorship matchmaking service
//!
//! Ranks athletes, leagues and venues against a brand's campaign brief. The
//! brief travels from the submit request to the recommendations request inside
//! a signed, expiring token, so no server-side state links the two.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{BriefTransport, RankingSelector, RecommendationService, ScoringEngine};
pub use error::{RecommendationError, Result};
pub use models::{Asset, AssetKind, Brief, BriefToken, Objective, RecommendationResult, ScoredAsset};
pub use services::{AssetCatalog, InMemoryCatalog};
