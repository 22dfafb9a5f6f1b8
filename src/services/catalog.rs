use crate::models::{Asset, AssetKind, AssetType};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate asset id: {0}")]
    DuplicateId(String),

    #[error("Asset {id} is a {actual} but was listed under {expected}s")]
    WrongPartition {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Venue {0} supports no sports")]
    VenueWithoutSports(String),
}

/// Read-only source of recommendable assets
///
/// Each partition is returned in catalog order, which is also the tie-break
/// order for equal match scores.
pub trait AssetCatalog: Send + Sync {
    fn athletes(&self) -> &[Asset];
    fn leagues(&self) -> &[Asset];
    fn venues(&self) -> &[Asset];

    fn find(&self, id: &str) -> Option<&Asset> {
        self.athletes()
            .iter()
            .chain(self.leagues())
            .chain(self.venues())
            .find(|asset| asset.id == id)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    athletes: Vec<Asset>,
    #[serde(default)]
    leagues: Vec<Asset>,
    #[serde(default)]
    venues: Vec<Asset>,
}

/// Catalog snapshot held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    athletes: Vec<Asset>,
    leagues: Vec<Asset>,
    venues: Vec<Asset>,
}

impl InMemoryCatalog {
    /// Build a catalog, checking ids are unique, every asset sits in its own
    /// partition and every venue supports at least one sport
    pub fn new(athletes: Vec<Asset>, leagues: Vec<Asset>, venues: Vec<Asset>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();

        for (expected, partition) in [
            (AssetType::Athlete, &athletes),
            (AssetType::League, &leagues),
            (AssetType::Venue, &venues),
        ] {
            for asset in partition {
                let actual = asset.asset_type();
                if actual != expected {
                    return Err(CatalogError::WrongPartition {
                        id: asset.id.clone(),
                        expected: expected.as_str(),
                        actual: actual.as_str(),
                    });
                }
                if !seen.insert(asset.id.as_str()) {
                    return Err(CatalogError::DuplicateId(asset.id.clone()));
                }
                if matches!(&asset.kind, AssetKind::Venue { sports_supported, .. } if sports_supported.is_empty()) {
                    return Err(CatalogError::VenueWithoutSports(asset.id.clone()));
                }
            }
        }

        Ok(Self {
            athletes,
            leagues,
            venues,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.athletes, file.leagues, file.venues)
    }

    /// Load a catalog from a JSON file with `athletes`, `leagues` and `venues` arrays
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        let catalog = Self::from_json_str(&json)?;

        tracing::info!(
            "Loaded catalog from {} ({} athletes, {} leagues, {} venues)",
            path.as_ref().display(),
            catalog.athletes.len(),
            catalog.leagues.len(),
            catalog.venues.len()
        );

        Ok(catalog)
    }

    /// The built-in demo catalog
    pub fn seeded() -> Self {
        Self {
            athletes: vec![
                athlete("ath_1", "Rahul Verma", "Badminton", "Mumbai", "Maharashtra", "MICRO", true, "1"),
                athlete("ath_2", "Priya Sharma", "Fitness", "Pune", "Maharashtra", "MID", false, "2"),
                athlete("ath_3", "Amit Kumar", "Cricket", "Delhi", "Delhi NCR", "CELEBRITY", true, "3"),
                athlete("ath_4", "Sneha Reddy", "Athletics", "Bengaluru", "Karnataka", "NANO", false, "4"),
                athlete("ath_5", "Vikram Singh", "Football", "Jaipur", "Rajasthan", "MICRO", false, "5"),
                athlete("ath_6", "Anjali Gupta", "Swimming", "Mumbai", "Maharashtra", "MID", true, "6"),
                athlete("ath_7", "Rohan Joshi", "Tennis", "Gurgaon", "Delhi NCR", "MICRO", false, "7"),
                athlete("ath_8", "Isha Patel", "Fitness", "Bengaluru", "Karnataka", "MID", true, "8"),
            ],
            leagues: vec![
                league("l_1", "Mumbai Badminton League", "Badminton", "Mumbai", "Maharashtra", "Mar 2026", true, "101"),
                league("l_2", "Delhi Corporate Cricket Cup", "Cricket", "Delhi", "Delhi NCR", "Apr-May 2026", false, "102"),
                league("l_3", "Jaipur Football Championship", "Football", "Jaipur", "Rajasthan", "Q2 2026", true, "103"),
                league("l_4", "Pune Fitness Challenge", "Fitness", "Pune", "Maharashtra", "Mar 2026", false, "104"),
                league("l_5", "Bengaluru Tech Football League", "Football", "Bengaluru", "Karnataka", "All Year", true, "105"),
            ],
            venues: vec![
                venue("v_1", "Ace Indoor Arena", &["Badminton", "Tennis"], "INDOOR_COURT", "Mumbai", "Maharashtra", true, "201"),
                venue("v_2", "Delhi Sports Complex", &["Cricket", "Football", "Athletics"], "STADIUM", "Delhi", "Delhi NCR", true, "202"),
                venue("v_3", "Fitness First Gym", &["Fitness"], "GYM", "Pune", "Maharashtra", false, "203"),
                venue("v_4", "Royal Arena Jaipur", &["Football"], "STADIUM", "Jaipur", "Rajasthan", false, "204"),
                venue("v_5", "The Garden Pitch", &["Cricket", "Football"], "ACADEMY", "Bengaluru", "Karnataka", false, "205"),
            ],
        }
    }
}

impl AssetCatalog for InMemoryCatalog {
    fn athletes(&self) -> &[Asset] {
        &self.athletes
    }

    fn leagues(&self) -> &[Asset] {
        &self.leagues
    }

    fn venues(&self) -> &[Asset] {
        &self.venues
    }
}

#[allow(clippy::too_many_arguments)]
fn athlete(id: &str, name: &str, sport: &str, city: &str, state: &str, tier: &str, featured: bool, image: &str) -> Asset {
    Asset {
        id: id.to_string(),
        name: name.to_string(),
        city: Some(city.to_string()),
        state: state.to_string(),
        featured,
        image: image.to_string(),
        kind: AssetKind::Athlete {
            sport: sport.to_string(),
            tier: tier.to_string(),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn league(id: &str, name: &str, sport: &str, city: &str, state: &str, season: &str, featured: bool, image: &str) -> Asset {
    Asset {
        id: id.to_string(),
        name: name.to_string(),
        city: Some(city.to_string()),
        state: state.to_string(),
        featured,
        image: image.to_string(),
        kind: AssetKind::League {
            sport: sport.to_string(),
            season: season.to_string(),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn venue(
    id: &str,
    name: &str,
    sports: &[&str],
    venue_type: &str,
    city: &str,
    state: &str,
    featured: bool,
    image: &str,
) -> Asset {
    Asset {
        id: id.to_string(),
        name: name.to_string(),
        city: Some(city.to_string()),
        state: state.to_string(),
        featured,
        image: image.to_string(),
        kind: AssetKind::Venue {
            sports_supported: sports.iter().map(|s| s.to_string()).collect(),
            venue_type: venue_type.to_string(),
        },
    }
}
