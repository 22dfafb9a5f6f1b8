use crate::models::ScoredAsset;
use std::cmp::Ordering;

/// Scores at or below this never make a shortlist
pub const DEFAULT_MIN_SCORE: f64 = 10.0;

/// Turns scored assets into a shortlist
///
/// Assets must score strictly above `min_score`. The sort is stable, so equal
/// scores keep their catalog order.
#[derive(Debug, Clone, Copy)]
pub struct RankingSelector {
    min_score: f64,
}

impl RankingSelector {
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn select(&self, scored: Vec<ScoredAsset>, cap: usize) -> Vec<ScoredAsset> {
        let mut shortlist: Vec<ScoredAsset> = scored
            .into_iter()
            .filter(|s| s.match_score > self.min_score)
            .collect();

        // Vec::sort_by is stable
        shortlist.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });

        shortlist.truncate(cap);
        shortlist
    }
}

impl Default for RankingSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCORE)
    }
}
