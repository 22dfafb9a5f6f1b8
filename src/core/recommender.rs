use crate::core::{
    ranking::RankingSelector,
    scoring::{BriefProfile, ScoringEngine},
    transport::{BriefTransport, DecodedBrief},
};
use crate::error::{RecommendationError, Result};
use crate::models::{Asset, Brief, RecommendationResult, ScoredAsset, SelectionCaps, Shortlist, Submission};
use crate::services::AssetCatalog;
use std::sync::Arc;

/// Main recommendation orchestrator
///
/// # Pipeline
/// 1. Decode the brief token
/// 2. Score every catalog asset against the brief
/// 3. Filter, rank and cap each category
///
/// Holds no per-brief state. The token is the only link between submitting a
/// brief and viewing its recommendations.
#[derive(Clone)]
pub struct RecommendationService {
    transport: BriefTransport,
    engine: ScoringEngine,
    selector: RankingSelector,
    caps: SelectionCaps,
    catalog: Arc<dyn AssetCatalog>,
}

impl RecommendationService {
    pub fn new(
        transport: BriefTransport,
        engine: ScoringEngine,
        selector: RankingSelector,
        caps: SelectionCaps,
        catalog: Arc<dyn AssetCatalog>,
    ) -> Self {
        Self {
            transport,
            engine,
            selector,
            caps,
            catalog,
        }
    }

    pub fn catalog(&self) -> &dyn AssetCatalog {
        self.catalog.as_ref()
    }

    pub fn transport(&self) -> &BriefTransport {
        &self.transport
    }

    /// Issue a token for a validated brief and record the lead
    pub fn submit(&self, brief: &Brief) -> Result<Submission> {
        let brief_id = new_brief_id();
        let submission = self.transport.encode(&brief_id, brief)?;

        tracing::info!(
            "Lead created for brief {}: {} ({} token bytes)",
            brief_id,
            brief.primary_contact.email,
            submission.token.len()
        );

        Ok(submission)
    }

    /// Decode a token and rank the catalog against its brief
    pub fn get_recommendations(&self, token: Option<&str>) -> Result<RecommendationResult> {
        let decoded = self.transport.decode(token)?;
        Ok(self.recommend_decoded(decoded))
    }

    /// Like `get_recommendations`, but the token must belong to `brief_id`
    pub fn get_recommendations_for(&self, brief_id: &str, token: Option<&str>) -> Result<RecommendationResult> {
        let decoded = self.transport.decode(token)?;
        if decoded.brief_id != brief_id {
            return Err(RecommendationError::TransportCorrupt(format!(
                "token belongs to brief {}, not {}",
                decoded.brief_id, brief_id
            )));
        }
        Ok(self.recommend_decoded(decoded))
    }

    /// Rank the catalog against an already decoded brief
    pub fn recommend(&self, brief: Brief) -> RecommendationResult {
        let profile = BriefProfile::new(&brief);

        let athletes = self.rank(&profile, self.catalog.athletes(), self.caps.athletes);
        let leagues = self.rank(&profile, self.catalog.leagues(), self.caps.leagues);
        let venues = self.rank(&profile, self.catalog.venues(), self.caps.venues);

        RecommendationResult {
            brief,
            athletes,
            leagues,
            venues,
        }
    }

    /// Resolve selected asset ids for the brief's contact. Unknown ids are reported, not fatal.
    pub fn shortlist(&self, token: Option<&str>, asset_ids: &[String]) -> Result<Shortlist> {
        let decoded = self.transport.decode(token)?;

        let mut assets = Vec::new();
        let mut unknown_ids = Vec::new();
        for id in asset_ids {
            match self.catalog.find(id) {
                Some(asset) if !assets.iter().any(|a: &Asset| a.id == asset.id) => assets.push(asset.clone()),
                Some(_) => {}
                None => unknown_ids.push(id.clone()),
            }
        }

        tracing::info!(
            "Shortlist of {} assets for brief {} sent to {}",
            assets.len(),
            decoded.brief_id,
            decoded.brief.primary_contact.email
        );
        if !unknown_ids.is_empty() {
            tracing::warn!("Shortlist for brief {} had unknown asset ids: {:?}", decoded.brief_id, unknown_ids);
        }

        Ok(Shortlist {
            sent_to: decoded.brief.primary_contact.email,
            assets,
            unknown_ids,
        })
    }

    fn recommend_decoded(&self, decoded: DecodedBrief) -> RecommendationResult {
        if decoded.reduced {
            tracing::debug!("Brief {} arrived reduced, optional fields defaulted", decoded.brief_id);
        }

        let result = self.recommend(decoded.brief);

        tracing::info!(
            "Returning {} athletes, {} leagues, {} venues for brief {}",
            result.athletes.len(),
            result.leagues.len(),
            result.venues.len(),
            decoded.brief_id
        );

        result
    }

    fn rank(&self, profile: &BriefProfile<'_>, assets: &[Asset], cap: usize) -> Vec<ScoredAsset> {
        let scored = assets
            .iter()
            .map(|asset| ScoredAsset {
                match_score: self.engine.score_profile(profile, asset),
                asset: asset.clone(),
            })
            .collect();

        self.selector.select(scored, cap)
    }
}

fn new_brief_id() -> String {
    format!("brf_{}", uuid::Uuid::new_v4().simple())
}
