use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{MatchError, MatchResult, PackageMatcher};
use crate::models::{
    ErrorResponse, HealthResponse, MatchPackagesRequest, MatchPackagesResponse, Offering,
    RankPackagesRequest, ServiceType,
};
use crate::services::{CacheError, CacheKey, CacheManager, CatalogClient, CatalogError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: PackageMatcher,
    pub matching: MatchingSettings,
}

/// Configure all package-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/packages/match", web::post().to(match_packages))
        .route("/packages/rank", web::post().to(rank_packages));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn match_error_response(err: MatchError) -> HttpResponse {
    match err {
        MatchError::InvalidPreference(_) => {
            error_response(StatusCode::BAD_REQUEST, "invalid_preference", err.to_string())
        }
    }
}

/// Build the wire response, truncating the ranked list to `limit`
fn build_response(result: MatchResult, limit: usize) -> MatchPackagesResponse {
    let total_eligible = result.ranked.len();
    let recommended = result.recommended().cloned();
    let mut ranked = result.ranked;
    ranked.truncate(limit);

    MatchPackagesResponse {
        match_id: uuid::Uuid::new_v4().to_string(),
        recommended,
        ranked,
        used_fallback: result.used_fallback,
        total_candidates: result.total_candidates,
        total_eligible,
    }
}

/// Load the catalog snapshot for a service type, cache first
async fn load_offerings(
    state: &AppState,
    service_type: &ServiceType,
) -> Result<Vec<Offering>, CatalogError> {
    let cache_key = CacheKey::catalog(service_type);

    match state.cache.get::<Vec<Offering>>(&cache_key).await {
        Ok(offerings) => {
            tracing::debug!("Serving {} {} packages from cache", offerings.len(), service_type);
            return Ok(offerings);
        }
        Err(CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Cache lookup failed for {}, querying catalog: {}", cache_key, e),
    }

    let offerings = state.catalog.query_offerings(service_type).await?;

    if let Err(e) = state.cache.set(&cache_key, &offerings).await {
        tracing::warn!("Failed to cache catalog snapshot {}: {}", cache_key, e);
    }

    Ok(offerings)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.stats(),
    })
}

/// Match packages from the hosted catalog
///
/// POST /api/v1/packages/match
///
/// Request body:
/// ```json
/// {
///   "serviceType": "Photography",
///   "eventType": "Wedding",
///   "budgetRange": {"min": 100000, "max": 300000},
///   "preferenceMode": "hours|coverage|none",
///   "targetHours": 6,
///   "desiredCoverage": ["Ceremony", "Reception"],
///   "limit": 20
/// }
/// ```
async fn match_packages(
    state: web::Data<AppState>,
    req: web::Json<MatchPackagesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    let req = req.into_inner();
    let preference = req.preference;
    let limit = state.matching.effective_limit(req.limit);

    // Reject bad input before touching the catalog
    if let Err(e) = crate::core::validate_preference(&preference) {
        tracing::info!("Rejected preference for {:?}: {}", preference.service_type.label(), e);
        return match_error_response(e);
    }

    tracing::info!(
        "Matching {} packages (event: {:?}, mode: {:?}, limit: {})",
        preference.service_type,
        preference.event_type,
        preference.preference_mode,
        limit
    );

    let candidates = match load_offerings(&state, &preference.service_type).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to load {} packages: {}", preference.service_type, e);
            return error_response(
                StatusCode::BAD_GATEWAY,
                "catalog_unavailable",
                e.to_string(),
            );
        }
    };

    match state.matcher.match_packages(candidates, &preference) {
        Ok(result) => {
            let response = build_response(result, limit);
            tracing::info!(
                "Returning {} of {} eligible {} packages (fallback: {})",
                response.ranked.len(),
                response.total_eligible,
                preference.service_type,
                response.used_fallback
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => match_error_response(e),
    }
}

/// Rank a caller-supplied candidate snapshot
///
/// POST /api/v1/packages/rank
///
/// Request body:
/// ```json
/// {
///   "preference": {"serviceType": "Photography", "preferenceMode": "none"},
///   "candidates": [{"id": "p1", "serviceType": "Photography", "priceCents": 150000}],
///   "limit": 20
/// }
/// ```
async fn rank_packages(
    state: web::Data<AppState>,
    req: web::Json<RankPackagesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    let req = req.into_inner();
    let limit = state.matching.effective_limit(req.limit);

    tracing::debug!(
        "Ranking {} supplied {} packages",
        req.candidates.len(),
        req.preference.service_type
    );

    match state.matcher.match_packages(req.candidates, &req.preference) {
        Ok(result) => HttpResponse::Ok().json(build_response(result, limit)),
        Err(e) => {
            tracing::info!("Rejected rank request: {}", e);
            match_error_response(e)
        }
    }
}
