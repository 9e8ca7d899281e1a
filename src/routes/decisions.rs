use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{available_methods, rng_from_seed, DecisionEngine, DecisionError};
use crate::models::{
    DecideRequest, DecisionResponse, ErrorResponse, HealthResponse, MethodsRequest,
    WeightPreviewRequest, WeightPreviewResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: DecisionEngine,
}

/// Configure all decision routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/decisions", web::post().to(decide))
        .route("/decisions/weights", web::post().to(preview_weights))
        .route("/decisions/methods", web::post().to(list_methods));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn decision_failed(err: &DecisionError) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ErrorResponse::from_decision_error(err, 422))
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compute a decision
///
/// POST /api/v1/decisions
///
/// Request body:
/// ```json
/// {
///   "decisionId": "string",
///   "decision": {
///     "method": "tiered",
///     "restaurants": [{"id": "r1", "name": "Pho House"}],
///     "ballots": [{"voterId": "u1", "rankings": ["r1", "r2", "r3"]}]
///   },
///   "seed": 42
/// }
/// ```
async fn decide(
    state: web::Data<AppState>,
    req: web::Json<DecideRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for decide request: {:?}", errors);
        return validation_failed(errors);
    }

    let req = req.into_inner();
    let decision_id = req
        .decision_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut rng = rng_from_seed(req.seed);

    tracing::info!(
        "Computing {} decision {} (seeded: {})",
        req.decision.method().as_str(),
        decision_id,
        req.seed.is_some()
    );

    match state.engine.decide(&req.decision, &mut rng) {
        Ok(result) => {
            tracing::info!(
                "Decision {} picked {} (tie breadth {})",
                decision_id,
                result.restaurant_id,
                result.tie_count
            );
            HttpResponse::Ok().json(DecisionResponse {
                decision_id,
                result,
                decided_at: chrono::Utc::now(),
            })
        }
        Err(e) => {
            tracing::warn!("Decision {} rejected: {}", decision_id, e);
            decision_failed(&e)
        }
    }
}

/// Preview random-selection weights
///
/// POST /api/v1/decisions/weights
async fn preview_weights(
    state: web::Data<AppState>,
    req: web::Json<WeightPreviewRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let now = req.now.unwrap_or_else(chrono::Utc::now);
    match state.engine.preview_weights(&req.restaurants, &req.history, now) {
        Ok(weights) => HttpResponse::Ok().json(WeightPreviewResponse {
            window_days: state.engine.params().window_days,
            weights,
        }),
        Err(e) => decision_failed(&e),
    }
}

/// Report which decision methods a collection supports
///
/// POST /api/v1/decisions/methods
async fn list_methods(req: web::Json<MethodsRequest>) -> impl Responder {
    HttpResponse::Ok().json(available_methods(&req.restaurants))
}
