use crate::models::{Asset, AssetType, Brief, Objective, ScoringWeights};
use std::collections::{HashMap, HashSet};

/// Fit used when the objective table has no entry for an objective/asset pair
pub const DEFAULT_OBJECTIVE_FIT: f64 = 0.5;

/// Geography factor for an asset whose state, but not city, is targeted
pub const STATE_ONLY_MATCH: f64 = 0.7;

/// How well each asset type serves each campaign objective (0-1)
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveFitTable {
    entries: HashMap<(Objective, AssetType), f64>,
}

impl ObjectiveFitTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Set the fit for one objective/asset pair, replacing any previous value
    pub fn with_fit(mut self, objective: Objective, asset_type: AssetType, fit: f64) -> Self {
        self.entries.insert((objective, asset_type), fit);
        self
    }

    #[inline]
    pub fn lookup(&self, objective: Objective, asset_type: AssetType) -> f64 {
        self.entries
            .get(&(objective, asset_type))
            .copied()
            .unwrap_or(DEFAULT_OBJECTIVE_FIT)
    }
}

impl Default for ObjectiveFitTable {
    fn default() -> Self {
        use AssetType::{Athlete, League, Venue};

        let rows = [
            (Objective::Awareness, 0.8, 1.0, 0.9),
            (Objective::Consideration, 1.0, 0.8, 0.7),
            (Objective::Conversions, 1.0, 0.6, 0.5),
            (Objective::AppInstalls, 1.0, 0.7, 0.4),
            (Objective::Footfall, 0.7, 0.9, 1.0),
            (Objective::Trials, 1.0, 0.6, 0.8),
        ];

        rows.into_iter()
            .fold(Self::empty(), |table, (objective, athlete, league, venue)| {
                table
                    .with_fit(objective, Athlete, athlete)
                    .with_fit(objective, League, league)
                    .with_fit(objective, Venue, venue)
            })
    }
}

/// Brief fields the scorer needs, gathered into sets once per request
#[derive(Debug, Clone)]
pub struct BriefProfile<'a> {
    pub objective: Objective,
    sports: HashSet<&'a str>,
    cities: HashSet<&'a str>,
    states: HashSet<&'a str>,
}

impl<'a> BriefProfile<'a> {
    pub fn new(brief: &'a Brief) -> Self {
        let sports = brief.sport_preferences.iter().map(String::as_str).collect();
        let cities = brief
            .primary_geography
            .iter()
            .filter_map(|g| g.city.as_deref())
            .filter(|city| !city.is_empty())
            .collect();
        let states = brief
            .primary_geography
            .iter()
            .map(|g| g.state.as_str())
            .collect();

        Self {
            objective: brief.objective,
            sports,
            cities,
            states,
        }
    }
}

/// The four factors behind a match score, each in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub sport_match: f64,
    pub geo_match: f64,
    pub objective_fit: f64,
    pub featured_boost: f64,
}

/// Scores assets against a brief
///
/// Scoring formula:
/// score = 100 * (
///     sport_match * 0.40 +       # any shared sport
///     geo_match * 0.30 +         # city 1.0, state only 0.7
///     objective_fit * 0.20 +     # objective x asset type table
///     featured_boost * 0.10      # featured assets
/// )
/// rounded to one decimal, halves away from zero.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoringWeights,
    objective_fit: ObjectiveFitTable,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights, objective_fit: ObjectiveFitTable) -> Self {
        Self {
            weights,
            objective_fit,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default(), ObjectiveFitTable::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score one asset against a brief (0-100, one decimal)
    pub fn score(&self, brief: &Brief, asset: &Asset) -> f64 {
        self.score_profile(&BriefProfile::new(brief), asset)
    }

    /// Score against a prepared profile; use when scoring many assets for one brief
    pub fn score_profile(&self, profile: &BriefProfile<'_>, asset: &Asset) -> f64 {
        let b = self.breakdown(profile, asset);

        let total = (b.sport_match * self.weights.sport
            + b.geo_match * self.weights.geography
            + b.objective_fit * self.weights.objective
            + b.featured_boost * self.weights.featured)
            * 100.0;

        round_one_decimal(total.clamp(0.0, 100.0))
    }

    pub fn breakdown(&self, profile: &BriefProfile<'_>, asset: &Asset) -> ScoreBreakdown {
        ScoreBreakdown {
            sport_match: sport_match(profile, asset),
            geo_match: geo_match(profile, asset),
            objective_fit: self
                .objective_fit
                .lookup(profile.objective, asset.asset_type()),
            featured_boost: if asset.featured { 1.0 } else { 0.0 },
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// 1.0 when any of the asset's sports is wanted by the brief
#[inline]
fn sport_match(profile: &BriefProfile<'_>, asset: &Asset) -> f64 {
    if asset
        .sports()
        .iter()
        .any(|sport| profile.sports.contains(sport.as_str()))
    {
        1.0
    } else {
        0.0
    }
}

/// City match beats state match; the two never add up
#[inline]
fn geo_match(profile: &BriefProfile<'_>, asset: &Asset) -> f64 {
    let city_hit = asset
        .city
        .as_deref()
        .is_some_and(|city| profile.cities.contains(city));

    if city_hit {
        1.0
    } else if profile.states.contains(asset.state.as_str()) {
        STATE_ONLY_MATCH
    } else {
        0.0
    }
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetKind, Contact, Geography, Timeline};
    use chrono::NaiveDate;

    fn create_test_brief(objective: Objective, sports: &[&str], geo: &[(&str, Option<&str>)]) -> Brief {
        Brief {
            brand_name: "Stride".to_string(),
            industry_category: "Apparel".to_string(),
            objective,
            primary_geography: geo
                .iter()
                .map(|(state, city)| Geography {
                    state: state.to_string(),
                    city: city.map(str::to_string),
                })
                .collect(),
            sport_preferences: sports.iter().map(|s| s.to_string()).collect(),
            target_audience: vec!["Students".to_string()],
            budget_range: "$25k-$100k".to_string(),
            timeline: Timeline {
                from: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                to: None,
            },
            deliverable_types: vec!["On-ground Activation".to_string()],
            primary_contact: Contact {
                name: "Asha Rao".to_string(),
                email: "asha@stride.example".to_string(),
                phone: "9876543210".to_string(),
            },
        }
    }

    fn create_athlete(sport: &str, city: Option<&str>, state: &str, featured: bool) -> Asset {
        Asset {
            id: "ath_t".to_string(),
            name: "Test Athlete".to_string(),
            city: city.map(str::to_string),
            state: state.to_string(),
            featured,
            image: String::new(),
            kind: AssetKind::Athlete {
                sport: sport.to_string(),
                tier: "MICRO".to_string(),
            },
        }
    }

    fn create_venue(sports: &[&str], city: &str, state: &str, featured: bool) -> Asset {
        Asset {
            id: "v_t".to_string(),
            name: "Test Venue".to_string(),
            city: Some(city.to_string()),
            state: state.to_string(),
            featured,
            image: String::new(),
            kind: AssetKind::Venue {
                sports_supported: sports.iter().map(|s| s.to_string()).collect(),
                venue_type: "STADIUM".to_string(),
            },
        }
    }

    #[test]
    fn test_featured_local_athlete_scores_94() {
        let brief = create_test_brief(
            Objective::Footfall,
            &["Badminton"],
            &[("Maharashtra", Some("Mumbai"))],
        );
        let athlete = create_athlete("Badminton", Some("Mumbai"), "Maharashtra", true);
        let engine = ScoringEngine::with_defaults();

        let b = engine.breakdown(&BriefProfile::new(&brief), &athlete);
        assert_eq!(b.sport_match, 1.0);
        assert_eq!(b.geo_match, 1.0);
        assert_eq!(b.objective_fit, 0.7);
        assert_eq!(b.featured_boost, 1.0);
        assert_eq!(engine.score(&brief, &athlete), 94.0);
    }

    #[test]
    fn test_unrelated_venue_scores_objective_only() {
        let brief = create_test_brief(
            Objective::Footfall,
            &["Badminton"],
            &[("Maharashtra", Some("Mumbai"))],
        );
        let venue = create_venue(&["Cricket", "Football"], "Jaipur", "Rajasthan", false);

        assert_eq!(ScoringEngine::with_defaults().score(&brief, &venue), 20.0);
    }

    #[test]
    fn test_venue_matches_on_any_supported_sport() {
        let brief = create_test_brief(Objective::Awareness, &["Tennis"], &[("Karnataka", None)]);
        let venue = create_venue(&["Badminton", "Tennis"], "Mumbai", "Maharashtra", false);
        let engine = ScoringEngine::with_defaults();

        let b = engine.breakdown(&BriefProfile::new(&brief), &venue);
        assert_eq!(b.sport_match, 1.0);
    }

    #[test]
    fn test_state_only_match_never_counts_as_city() {
        let brief = create_test_brief(
            Objective::Awareness,
            &["Cricket"],
            &[("Maharashtra", Some("Mumbai")), ("Maharashtra", Some("Pune"))],
        );
        let athlete = create_athlete("Fitness", Some("Nagpur"), "Maharashtra", false);
        let engine = ScoringEngine::with_defaults();

        let b = engine.breakdown(&BriefProfile::new(&brief), &athlete);
        assert_eq!(b.geo_match, STATE_ONLY_MATCH);
    }

    #[test]
    fn test_asset_without_city_falls_back_to_state() {
        let brief = create_test_brief(Objective::Trials, &["Cricket"], &[("Delhi NCR", Some("Delhi"))]);
        let athlete = create_athlete("Cricket", None, "Delhi NCR", false);
        let engine = ScoringEngine::with_defaults();

        let b = engine.breakdown(&BriefProfile::new(&brief), &athlete);
        assert_eq!(b.geo_match, STATE_ONLY_MATCH);
    }

    #[test]
    fn test_missing_fit_defaults_to_half() {
        let table = ObjectiveFitTable::empty().with_fit(Objective::Awareness, AssetType::League, 1.0);

        assert_eq!(table.lookup(Objective::Awareness, AssetType::League), 1.0);
        assert_eq!(table.lookup(Objective::Awareness, AssetType::Venue), DEFAULT_OBJECTIVE_FIT);
    }

    #[test]
    fn test_score_clamped_with_oversized_weights() {
        let weights = ScoringWeights {
            sport: 1.0,
            geography: 1.0,
            objective: 1.0,
            featured: 1.0,
        };
        let engine = ScoringEngine::new(weights, ObjectiveFitTable::default());
        let brief = create_test_brief(Objective::Trials, &["Cricket"], &[("Delhi NCR", Some("Delhi"))]);
        let athlete = create_athlete("Cricket", Some("Delhi"), "Delhi NCR", true);

        assert_eq!(engine.score(&brief, &athlete), 100.0);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(56.0000000001), 56.0);
        assert_eq!(round_one_decimal(12.25), 12.3);
        assert_eq!(round_one_decimal(0.04), 0.0);
    }
}
