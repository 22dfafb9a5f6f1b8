//! Carries a submitted brief to the recommendations request.
//!
//! Submission and retrieval are separate requests that may land on different
//! workers, so nothing is kept server side. The brief travels inside an
//! HS256-signed token with an expiry. Fields the scorer does not need are
//! dropped when the full brief would not fit the size ceiling, and decode puts
//! defaults back in their place.

use crate::error::{RecommendationError, Result};
use crate::models::{Brief, BriefToken, Contact, Geography, Objective, Submission, Timeline};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default validity window for a brief token
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Longest validity window settings may configure (30 days)
pub const MAX_TTL_SECS: u64 = 30 * 24 * 3600;

/// Default ceiling, leaves headroom under the 4 KiB cookie limit
pub const DEFAULT_MAX_TOKEN_BYTES: usize = 3800;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BriefClaims {
    jti: String,
    iat: i64,
    exp: i64,
    brief: BriefPayload,
}

/// Wire form of a brief. The first four fields are always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BriefPayload {
    objective: Objective,
    sports: Vec<String>,
    geo: Vec<Geography>,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audience: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deliverables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl BriefPayload {
    fn full(brief: &Brief) -> Self {
        Self {
            brand: Some(brief.brand_name.clone()),
            industry: Some(brief.industry_category.clone()),
            audience: Some(brief.target_audience.clone()),
            budget: Some(brief.budget_range.clone()),
            from: Some(brief.timeline.from.format(DATE_FORMAT).to_string()),
            to: brief.timeline.to.map(|d| d.format(DATE_FORMAT).to_string()),
            deliverables: Some(brief.deliverable_types.clone()),
            name: Some(brief.primary_contact.name.clone()),
            phone: Some(brief.primary_contact.phone.clone()),
            ..Self::reduced(brief)
        }
    }

    /// Only what scoring and the confirmation message need
    fn reduced(brief: &Brief) -> Self {
        Self {
            objective: brief.objective,
            sports: brief.sport_preferences.clone(),
            geo: brief.primary_geography.clone(),
            email: brief.primary_contact.email.clone(),
            brand: None,
            industry: None,
            audience: None,
            budget: None,
            from: None,
            to: None,
            deliverables: None,
            name: None,
            phone: None,
        }
    }

    fn is_reduced(&self) -> bool {
        self.brand.is_none()
    }

    /// Rebuild the full brief shape. Dropped dates start the timeline on the issue date.
    fn into_brief(self, issued_on: NaiveDate) -> Result<Brief> {
        let from = match self.from.as_deref() {
            Some(text) => parse_date(text)?,
            None => issued_on,
        };
        let to = self.to.as_deref().map(parse_date).transpose()?;

        Ok(Brief {
            brand_name: self.brand.unwrap_or_default(),
            industry_category: self.industry.unwrap_or_default(),
            objective: self.objective,
            primary_geography: self.geo,
            sport_preferences: self.sports,
            target_audience: self.audience.unwrap_or_default(),
            budget_range: self.budget.unwrap_or_default(),
            timeline: Timeline { from, to },
            deliverable_types: self.deliverables.unwrap_or_default(),
            primary_contact: Contact {
                name: self.name.unwrap_or_default(),
                email: self.email,
                phone: self.phone.unwrap_or_default(),
            },
        })
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| {
        RecommendationError::TransportCorrupt(format!("invalid date '{}': {}", text, e))
    })
}

/// A brief recovered from its token
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBrief {
    pub brief_id: String,
    pub brief: Brief,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// True when optional fields were dropped to fit the size ceiling
    pub reduced: bool,
}

/// Encodes briefs into signed tokens and back
#[derive(Clone)]
pub struct BriefTransport {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    max_token_bytes: usize,
}

impl fmt::Debug for BriefTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BriefTransport")
            .field("ttl_secs", &self.ttl.num_seconds())
            .field("max_token_bytes", &self.max_token_bytes)
            .finish_non_exhaustive()
    }
}

impl BriefTransport {
    pub fn new(secret: &[u8], ttl_secs: u64, max_token_bytes: usize) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against our own clock in decode_at
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: i64::try_from(ttl_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
            max_token_bytes,
        }
    }

    pub fn max_token_bytes(&self) -> usize {
        self.max_token_bytes
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn encode(&self, brief_id: &str, brief: &Brief) -> Result<Submission> {
        self.encode_at(brief_id, brief, Utc::now())
    }

    /// Encode a brief issued at `now`
    ///
    /// The full brief is tried first. If it exceeds the ceiling, only the
    /// scoring fields and contact email are kept.
    pub fn encode_at(&self, brief_id: &str, brief: &Brief, now: DateTime<Utc>) -> Result<Submission> {
        check_shape(brief)?;

        let exp = now
            .checked_add_signed(self.ttl)
            .map(|t| t.timestamp())
            .ok_or_else(|| RecommendationError::TransportCorrupt("expiry out of range".to_string()))?;
        // The claim holds whole seconds, so report exactly what decode will enforce
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| RecommendationError::TransportCorrupt("expiry out of range".to_string()))?;
        let mut claims = BriefClaims {
            jti: brief_id.to_string(),
            iat: now.timestamp(),
            exp,
            brief: BriefPayload::full(brief),
        };

        let mut token = self.sign(&claims)?;
        if token.len() > self.max_token_bytes {
            tracing::debug!(
                "Brief {} token is {} bytes (limit {}), dropping optional fields",
                brief_id,
                token.len(),
                self.max_token_bytes
            );
            claims.brief = BriefPayload::reduced(brief);
            token = self.sign(&claims)?;
        }

        if token.len() > self.max_token_bytes {
            return Err(RecommendationError::TransportOversized {
                size: token.len(),
                limit: self.max_token_bytes,
            });
        }

        Ok(Submission {
            brief_id: brief_id.to_string(),
            token: BriefToken::new(token),
            expires_at,
        })
    }

    pub fn decode(&self, token: Option<&str>) -> Result<DecodedBrief> {
        self.decode_at(token, Utc::now())
    }

    /// Decode a token as seen at `now`
    ///
    /// A missing or blank token is `TransportNotFound`, never a default brief.
    pub fn decode_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<DecodedBrief> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(RecommendationError::TransportNotFound)?;

        let claims = jsonwebtoken::decode::<BriefClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| RecommendationError::TransportCorrupt(e.to_string()))?
            .claims;

        let issued_at = DateTime::from_timestamp(claims.iat, 0)
            .ok_or_else(|| RecommendationError::TransportCorrupt("iat out of range".to_string()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| RecommendationError::TransportCorrupt("exp out of range".to_string()))?;

        if now >= expires_at {
            return Err(RecommendationError::TransportExpired { expired_at: expires_at });
        }

        let reduced = claims.brief.is_reduced();
        let brief = claims.brief.into_brief(issued_at.date_naive())?;

        Ok(DecodedBrief {
            brief_id: claims.jti,
            brief,
            issued_at,
            expires_at,
            reduced,
        })
    }

    fn sign(&self, claims: &BriefClaims) -> Result<String> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| RecommendationError::TransportCorrupt(e.to_string()))
    }
}

/// Shape check only; field-level validation happens at the form boundary
fn check_shape(brief: &Brief) -> Result<()> {
    if brief.primary_geography.is_empty() {
        return Err(RecommendationError::Validation(
            "primary_geography must not be empty".to_string(),
        ));
    }
    if brief.sport_preferences.is_empty() {
        return Err(RecommendationError::Validation(
            "sport_preferences must not be empty".to_string(),
        ));
    }
    Ok(())
}
