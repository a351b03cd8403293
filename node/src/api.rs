//! # Star Notary REST API
//!
//! Builds the axum router for the notary node. This layer is request
//! glue: it validates input shapes, runs the identity window, and
//! decorates payloads on their way into the chain store — every chain
//! invariant lives below, in `astra-ledger`.
//!
//! ## Endpoints
//!
//! | Method | Path                          | Description                        |
//! |--------|-------------------------------|------------------------------------|
//! | GET    | `/health`                     | Liveness probe                     |
//! | GET    | `/status`                     | Version + chain height             |
//! | GET    | `/block/:height`              | Block by height                    |
//! | POST   | `/block`                      | Register a star (needs validation) |
//! | POST   | `/requestValidation`          | Issue an identity challenge        |
//! | POST   | `/message-signature/validate` | Prove the challenge was signed     |
//! | GET    | `/stars/address/:address`     | Stars registered by an address     |
//! | GET    | `/stars/hash/:hash`           | Star block by its hash             |
//! | GET    | `/chain/validate`             | Whole-chain integrity report       |

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use astra_ledger::ChainStore;

use crate::session::{SessionError, SessionRegistry};

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone — everything behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// The chain store. All reads and the serialized append path.
    pub chain: Arc<ChainStore>,
    /// Pending identity validations with their expiry window.
    pub sessions: Arc<SessionRegistry>,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/block/:height", get(block_by_height_handler))
        .route("/block", post(register_star_handler))
        .route("/requestValidation", post(request_validation_handler))
        .route("/message-signature/validate", post(validate_signature_handler))
        .route("/stars/address/:address", get(stars_by_address_handler))
        .route("/stars/hash/:hash", get(star_by_hash_handler))
        .route("/chain/validate", get(validate_chain_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Body of `POST /block`.
#[derive(Debug, Deserialize)]
pub struct StarRegistrationRequest {
    /// The registering address — must hold a validated session.
    pub address: String,
    /// The star record. Opaque to the chain; the node only touches the
    /// `story` field, which it hex-encodes before storage.
    pub star: Value,
}

/// Body of `POST /requestValidation`.
#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    pub address: String,
}

/// Body of `POST /message-signature/validate`.
#[derive(Debug, Deserialize)]
pub struct SignatureRequest {
    pub address: String,
    pub signature: String,
}

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub version: String,
    /// Number of blocks in the chain (genesis included).
    pub height: u64,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
}

/// Generic error body returned on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// All session failures are the caller's to fix; none are server faults.
fn session_error_response(err: SessionError) -> Response {
    error_response(StatusCode::BAD_REQUEST, err.to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — returns 200 if the node is alive.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// `GET /status` — version and current chain height.
async fn status_handler(State(state): State<AppState>) -> Response {
    match state.chain.height() {
        Ok(height) => Json(StatusResponse {
            version: state.version.clone(),
            height,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(%err, "height read failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "store unavailable")
        }
    }
}

/// `GET /block/:height` — returns the stored block, 404 when absent.
async fn block_by_height_handler(
    Path(height): Path<u64>,
    State(state): State<AppState>,
) -> Response {
    match state.chain.get_block(height) {
        Ok(Some(block)) => Json(block).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("no block available at height {height}"),
        ),
        Err(err) => {
            tracing::error!(height, %err, "block lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "store unavailable")
        }
    }
}

/// `POST /block` — register a star for a validated address.
///
/// Requires a session that has passed signature validation. The star's
/// `story` is hex-encoded here, on the way in — the chain stores exactly
/// what it is given and the scans decode it back out for display. The
/// session is consumed only after the block is durably persisted.
async fn register_star_handler(
    State(state): State<AppState>,
    Json(req): Json<StarRegistrationRequest>,
) -> Response {
    if !req.star.is_object() {
        return error_response(StatusCode::BAD_REQUEST, "star must be an object");
    }

    if let Err(err) = state.sessions.authorized(&req.address) {
        return session_error_response(err);
    }

    let mut star = req.star.clone();
    if let Some(story) = star.get("story").and_then(|s| s.as_str()) {
        let encoded = hex::encode(story.as_bytes());
        star["story"] = json!(encoded);
    }

    let payload = json!({ "address": req.address, "star": star });
    match state.chain.append(payload) {
        Ok(block) => {
            state.sessions.consume(&req.address);
            tracing::info!(height = block.height, address = %req.address, "star registered");
            Json(block).into_response()
        }
        Err(err) => {
            tracing::error!(%err, "append failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "block was not persisted")
        }
    }
}

/// `POST /requestValidation` — issue (or re-surface) an identity challenge.
async fn request_validation_handler(
    State(state): State<AppState>,
    Json(req): Json<ValidationRequest>,
) -> Response {
    if req.address.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "address is required");
    }
    Json(state.sessions.request(&req.address)).into_response()
}

/// `POST /message-signature/validate` — verify the signed challenge.
async fn validate_signature_handler(
    State(state): State<AppState>,
    Json(req): Json<SignatureRequest>,
) -> Response {
    match state.sessions.verify(&req.address, &req.signature) {
        Ok(status) => Json(json!({
            "registerStar": true,
            "status": {
                "address": status.address,
                "requestTimestamp": status.request_timestamp,
                "message": status.message,
                "validationWindow": status.validation_window,
                "messageSignature": "valid",
            }
        }))
        .into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "registerStar": false, "error": err.to_string() })),
        )
            .into_response(),
    }
}

/// `GET /stars/address/:address` — every star registered by an address,
/// ascending by height, stories decoded. An address with no stars gets
/// an empty list, not an error.
async fn stars_by_address_handler(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.chain.get_blocks_by_address(&address) {
        Ok(blocks) => Json(blocks).into_response(),
        Err(err) => {
            tracing::error!(%address, %err, "address scan failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "store unavailable")
        }
    }
}

/// `GET /stars/hash/:hash` — the star block with this hash, 404 if none.
async fn star_by_hash_handler(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.chain.get_block_by_hash(&hash) {
        Ok(Some(block)) => Json(block).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "no registered star found for this hash",
        ),
        Err(err) => {
            tracing::error!(%err, "hash scan failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "store unavailable")
        }
    }
}

/// `GET /chain/validate` — run the full integrity pass and return the
/// report. Faults are data here, not HTTP errors: a broken chain still
/// answers 200 with `intact: false`.
async fn validate_chain_handler(State(state): State<AppState>) -> Response {
    match state.chain.validate_chain() {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            tracing::error!(%err, "chain validation failed to run");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "store unavailable")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
