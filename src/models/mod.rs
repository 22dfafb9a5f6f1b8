// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Asset, AssetKind, AssetType, Brief, BriefToken, Contact, Geography, Objective, RecommendationResult,
    ScoredAsset, ScoringWeights, SelectionCaps, Shortlist, Submission, Timeline,
};
pub use requests::{RecommendationsQuery, ShortlistRequest};
pub use responses::{CatalogSizes, ErrorResponse, FormOptionsResponse, HealthResponse, SubmitBriefResponse};
