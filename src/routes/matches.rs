use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{calculate_match_score, MatchGenerator, ProfileStore};
use crate::models::{
    ErrorResponse, GenerateMatchesRequest, GenerateMatchesResponse, HealthResponse,
    ListMatchesQuery, ListMatchesResponse, MatchResult, Role, ScorePairRequest, StoredMatch,
    UpdateStatusRequest,
};
use crate::services::{CacheKey, CacheManager, PostgresClient, PostgresError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub generator: MatchGenerator,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/generate", web::post().to(generate_matches))
        .route("/matches/score", web::post().to(score_pair))
        .route("/matches/{profile_id}", web::get().to(list_matches))
        .route("/matches/{match_id}/status", web::post().to(update_match_status));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate matches endpoint
///
/// POST /api/v1/matches/generate
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "role": "startup|investor",
///   "limit": 20
/// }
/// ```
///
/// New pairs are stored as pending; pairs already on record are not duplicated.
async fn generate_matches(
    state: web::Data<AppState>,
    req: web::Json<GenerateMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    let role = req.role;
    let limit = req
        .limit
        .map(usize::from)
        .unwrap_or_else(|| state.matching.default_limit())
        .min(state.matching.max_limit());

    tracing::info!("Generating matches for {} {}, limit: {}", role, user_id, limit);

    let mut matches = state
        .generator
        .generate_matches(state.profiles.as_ref(), user_id, role)
        .await;

    let total_results = matches.len();

    // Persistence is best-effort; the ranked list is returned either way
    let created = match state.postgres.insert_pending(&matches).await {
        Ok(created) => created,
        Err(e) => {
            tracing::warn!("Failed to persist matches for {}: {}", user_id, e);
            0
        }
    };

    let mut stale_keys = Vec::new();
    if let Some(first) = matches.first() {
        stale_keys.push(CacheKey::matches(role, first.side_id(role)));
    }
    if created > 0 {
        stale_keys.extend(counterpart_listing_keys(role, &matches));
    }

    for key in &stale_keys {
        if let Err(e) = state.cache.delete(key).await {
            tracing::warn!("Failed to invalidate cache: {}", e);
        }
    }

    matches.truncate(limit);

    tracing::info!(
        "Returning {} matches for {} {} ({} new, {} total)",
        matches.len(),
        role,
        user_id,
        created,
        total_results
    );

    HttpResponse::Ok().json(GenerateMatchesResponse {
        matches,
        created,
        total_results,
    })
}

/// Listing keys of every counterpart named in `matches`, one per profile
fn counterpart_listing_keys(role: Role, matches: &[MatchResult]) -> Vec<String> {
    let counterpart_role = role.opposite();
    let mut ids: Vec<&str> = matches.iter().map(|m| m.counterpart_id(role)).collect();
    ids.sort_unstable();
    ids.dedup();

    ids.into_iter()
        .map(|id| CacheKey::matches(counterpart_role, id))
        .collect()
}

/// Score a single pair without touching storage
///
/// POST /api/v1/matches/score
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScorePairRequest>,
) -> impl Responder {
    let result = calculate_match_score(&req.startup, &req.investor, state.generator.weights());

    tracing::debug!(
        "Scored {} x {}: {}",
        result.startup_id,
        result.investor_id,
        result.score
    );

    HttpResponse::Ok().json(result)
}

/// List persisted matches for a profile
///
/// GET /api/v1/matches/{profileId}?role=startup|investor
async fn list_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ListMatchesQuery>,
) -> impl Responder {
    let profile_id = path.into_inner();
    let role = query.role;
    let cache_key = CacheKey::matches(role, &profile_id);

    if let Ok(cached) = state.cache.get::<Vec<StoredMatch>>(&cache_key).await {
        return HttpResponse::Ok().json(ListMatchesResponse {
            count: cached.len(),
            matches: cached,
        });
    }

    match state.postgres.list_matches(role, &profile_id).await {
        Ok(matches) => {
            if let Err(e) = state.cache.set(&cache_key, &matches).await {
                tracing::warn!("Failed to cache matches for {}: {}", profile_id, e);
            }

            HttpResponse::Ok().json(ListMatchesResponse {
                count: matches.len(),
                matches,
            })
        }
        Err(e) => {
            tracing::error!("Failed to list matches for {} {}: {}", role, profile_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list matches".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Update the status of a persisted match
///
/// POST /api/v1/matches/{matchId}/status
///
/// Request body:
/// ```json
/// { "status": "pending|accepted|rejected" }
/// ```
async fn update_match_status(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let match_id = path.into_inner();

    match state.postgres.update_status(match_id, req.status).await {
        Ok(updated) => {
            for key in [
                CacheKey::matches(Role::Startup, &updated.startup_id),
                CacheKey::matches(Role::Investor, &updated.investor_id),
            ] {
                if let Err(e) = state.cache.delete(&key).await {
                    tracing::warn!("Failed to invalidate cache: {}", e);
                }
            }

            HttpResponse::Ok().json(updated)
        }
        Err(PostgresError::NotFound(message)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Match not found".to_string(),
            message,
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to update match {}: {}", match_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to update match".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
