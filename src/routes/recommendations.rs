use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::RecommendationService;
use crate::error::RecommendationError;
use crate::models::{
    Brief, CatalogSizes, ErrorResponse, HealthResponse, RecommendationsQuery, ShortlistRequest,
    SubmitBriefResponse,
};
use crate::services::form_options;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecommendationService>,
    pub cookie_name: String,
    pub public_url: String,
}

/// Configure all brief and recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/options", web::get().to(get_form_options))
        .route("/briefs", web::post().to(submit_brief))
        .route("/recommendations/{brief_id}", web::get().to(get_recommendations))
        .route("/shortlist", web::post().to(send_shortlist));
}

/// Map a core error to its HTTP response
pub fn error_response(err: &RecommendationError) -> HttpResponse {
    let status = match err {
        RecommendationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecommendationError::TransportNotFound => StatusCode::NOT_FOUND,
        RecommendationError::TransportExpired { .. } => StatusCode::GONE,
        RecommendationError::TransportCorrupt(_) => StatusCode::BAD_REQUEST,
        RecommendationError::TransportOversized { .. } => StatusCode::PAYLOAD_TOO_LARGE,
    };

    let message = if err.requires_resubmit() {
        format!("{}. Please resubmit your brief.", err)
    } else {
        err.to_string()
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: err.code().to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ErrorResponse {
        error: "validation_error".to_string(),
        message: errors.to_string(),
        status_code: 422,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.service.catalog();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog: CatalogSizes {
            athletes: catalog.athletes().len(),
            leagues: catalog.leagues().len(),
            venues: catalog.venues().len(),
        },
    })
}

/// Form reference data
///
/// GET /api/v1/options
async fn get_form_options() -> impl Responder {
    HttpResponse::Ok().json(form_options())
}

/// Submit a brief endpoint
///
/// POST /api/v1/briefs
///
/// Returns the brief token and a link to its recommendations. The token is
/// also set as a cookie for clients that follow the link without the query.
async fn submit_brief(state: web::Data<AppState>, req: web::Json<Brief>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for brief from {}: {}", req.primary_contact.email, errors);
        return validation_failed(errors);
    }

    let submission = match state.service.submit(&req) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!("Failed to issue brief token: {}", e);
            return error_response(&e);
        }
    };

    let recommendations_url = format!(
        "{}/api/v1/recommendations/{}?brief={}",
        state.public_url.trim_end_matches('/'),
        submission.brief_id,
        urlencoding::encode(submission.token.as_str())
    );

    let cookie = Cookie::build(state.cookie_name.clone(), submission.token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(state.service.transport().ttl().num_seconds()))
        .finish();

    HttpResponse::Created().cookie(cookie).json(SubmitBriefResponse {
        brief_id: submission.brief_id,
        token: submission.token.into_string(),
        expires_at: submission.expires_at,
        recommendations_url,
    })
}

/// Recommendations endpoint
///
/// GET /api/v1/recommendations/{brief_id}?brief={token}
///
/// The token is read from the query string, falling back to the cookie.
async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<RecommendationsQuery>,
    http_req: HttpRequest,
) -> impl Responder {
    let brief_id = path.into_inner();
    let token = query
        .into_inner()
        .brief
        .or_else(|| http_req.cookie(&state.cookie_name).map(|c| c.value().to_string()));

    match state.service.get_recommendations_for(&brief_id, token.as_deref()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            tracing::info!("Recommendations unavailable for brief {}: {}", brief_id, e);
            error_response(&e)
        }
    }
}

/// Shortlist endpoint
///
/// POST /api/v1/shortlist
///
/// Request body:
/// ```json
/// {
///   "token": "string",
///   "assetIds": ["ath_1", "v_1"]
/// }
/// ```
async fn send_shortlist(state: web::Data<AppState>, req: web::Json<ShortlistRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.service.shortlist(Some(&req.token), &req.asset_ids) {
        Ok(shortlist) => HttpResponse::Ok().json(shortlist),
        Err(e) => error_response(&e),
    }
}
