// Core algorithm exports
pub mod ranking;
pub mod recommender;
pub mod scoring;
pub mod transport;

pub use ranking::{RankingSelector, DEFAULT_MIN_SCORE};
pub use recommender::RecommendationService;
pub use scoring::{BriefProfile, ObjectiveFitTable, ScoreBreakdown, ScoringEngine};
pub use transport::{BriefTransport, DecodedBrief};
