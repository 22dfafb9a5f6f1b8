use crate::core::{ranking::DEFAULT_MIN_SCORE, transport, BriefTransport, ObjectiveFitTable, ScoringEngine};
use crate::models::{AssetType, Objective, ScoringWeights, SelectionCaps};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Secret used when none is configured. Tokens signed with it are forgeable.
pub const DEV_TOKEN_SECRET: &str = "kibi-dev-secret-change-me";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub transport: TransportSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub selection: SelectionSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    /// Base used to build recommendation links handed back on submit
    #[serde(default)]
    pub public_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            public_url: String::new(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct TransportSettings {
    #[serde(default = "default_secret")]
    pub secret: String,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_token_bytes")]
    pub max_token_bytes: usize,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            ttl_secs: default_ttl_secs(),
            max_token_bytes: default_max_token_bytes(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl TransportSettings {
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_TOKEN_SECRET
    }

    /// Reject validity windows that would issue dead tokens or overflow the expiry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_secs == 0 || self.ttl_secs > transport::MAX_TTL_SECS {
            return Err(ConfigError::Message(format!(
                "transport.ttl_secs must be between 1 and {}, got {}",
                transport::MAX_TTL_SECS,
                self.ttl_secs
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> BriefTransport {
        BriefTransport::new(self.secret.as_bytes(), self.ttl_secs, self.max_token_bytes)
    }
}

fn default_secret() -> String { DEV_TOKEN_SECRET.to_string() }
fn default_ttl_secs() -> u64 { transport::DEFAULT_TTL_SECS }
fn default_max_token_bytes() -> usize { transport::DEFAULT_MAX_TOKEN_BYTES }
fn default_cookie_name() -> String { "kibi_brief".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    /// Rows of the objective fit table; an empty list keeps the built-in table
    #[serde(default)]
    pub objective_fit: Vec<ObjectiveFitRow>,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            objective_fit: Vec::new(),
            min_score: default_min_score(),
        }
    }
}

impl ScoringSettings {
    pub fn fit_table(&self) -> ObjectiveFitTable {
        if self.objective_fit.is_empty() {
            return ObjectiveFitTable::default();
        }

        self.objective_fit
            .iter()
            .fold(ObjectiveFitTable::empty(), |table, row| {
                let table = match row.athlete {
                    Some(fit) => table.with_fit(row.objective, AssetType::Athlete, fit),
                    None => table,
                };
                let table = match row.league {
                    Some(fit) => table.with_fit(row.objective, AssetType::League, fit),
                    None => table,
                };
                match row.venue {
                    Some(fit) => table.with_fit(row.objective, AssetType::Venue, fit),
                    None => table,
                }
            })
    }

    pub fn build(&self) -> ScoringEngine {
        let weights = ScoringWeights {
            sport: self.weights.sport,
            geography: self.weights.geography,
            objective: self.weights.objective,
            featured: self.weights.featured,
        };
        ScoringEngine::new(weights, self.fit_table())
    }
}

fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }

/// One objective's fit per asset type; omitted types fall back to 0.5
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveFitRow {
    pub objective: Objective,
    pub athlete: Option<f64>,
    pub league: Option<f64>,
    pub venue: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_sport_weight")]
    pub sport: f64,
    #[serde(default = "default_geography_weight")]
    pub geography: f64,
    #[serde(default = "default_objective_weight")]
    pub objective: f64,
    #[serde(default = "default_featured_weight")]
    pub featured: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            sport: default_sport_weight(),
            geography: default_geography_weight(),
            objective: default_objective_weight(),
            featured: default_featured_weight(),
        }
    }
}

fn default_sport_weight() -> f64 { 0.40 }
fn default_geography_weight() -> f64 { 0.30 }
fn default_objective_weight() -> f64 { 0.20 }
fn default_featured_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionSettings {
    #[serde(default = "default_athlete_cap")]
    pub athletes: usize,
    #[serde(default = "default_league_cap")]
    pub leagues: usize,
    #[serde(default = "default_venue_cap")]
    pub venues: usize,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            athletes: default_athlete_cap(),
            leagues: default_league_cap(),
            venues: default_venue_cap(),
        }
    }
}

impl SelectionSettings {
    pub fn caps(&self) -> SelectionCaps {
        SelectionCaps {
            athletes: self.athletes,
            leagues: self.leagues,
            venues: self.venues,
        }
    }
}

fn default_athlete_cap() -> usize { 20 }
fn default_league_cap() -> usize { 10 }
fn default_venue_cap() -> usize { 10 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON catalog to load; the built-in demo catalog is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with KIBI__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., KIBI__TRANSPORT__SECRET -> transport.secret
            .add_source(
                Environment::with_prefix("KIBI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.transport.validate()?;
        Ok(self)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("KIBI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }
}
