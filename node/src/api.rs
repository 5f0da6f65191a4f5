//! # REST API
//!
//! Builds the axum router that exposes the ledger's HTTP interface. All
//! endpoints share application state through axum's `State` extractor.
//! The router is pure plumbing: every invariant lives in `astra-ledger`,
//! and this layer only maps requests in and errors out.
//!
//! ## Endpoints
//!
//! | Method | Path                     | Description                       |
//! |--------|--------------------------|-----------------------------------|
//! | GET    | `/health`                | Liveness probe                    |
//! | GET    | `/status`                | Node status summary               |
//! | GET    | `/blocks/height/:height` | Block by height                   |
//! | GET    | `/blocks/hash/:hash`     | Block by hash                     |
//! | POST   | `/challenges`            | Issue an ownership challenge      |
//! | POST   | `/stars`                 | Submit a signed star registration |
//! | GET    | `/stars/:address`        | Stars owned by an address         |
//! | GET    | `/chain/validate`        | Full-chain integrity report       |

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use astra_ledger::chain::{Block, ChainError, ChainStore, StarRecord};
use astra_ledger::registry::{RegistryError, StarRegistry};

use crate::metrics::SharedMetrics;

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
    /// The ledger itself. All reads go straight here.
    pub store: Arc<ChainStore>,
    /// The ownership-proof front door. All star writes go through here.
    pub registry: StarRegistry,
    /// Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
///
/// The returned router is ready to be served on the configured RPC port.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/blocks/height/:height", get(block_by_height_handler))
        .route("/blocks/hash/:hash", get(block_by_hash_handler))
        .route("/challenges", post(issue_challenge_handler))
        .route("/stars", post(submit_star_handler))
        .route("/stars/:address", get(stars_by_address_handler))
        .route("/chain/validate", get(validate_chain_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Node software version.
    pub version: String,
    /// Current chain height (block count).
    pub height: u64,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
}

/// Request payload for `POST /challenges`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeRequest {
    /// Hex-encoded address to issue the challenge for.
    pub address: String,
}

/// Response payload for `POST /challenges`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// The challenge string to sign, exactly as it must be signed.
    pub challenge: String,
}

/// Request payload for `POST /stars`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitStarRequest {
    /// Hex-encoded address claiming the star.
    pub address: String,
    /// The challenge string previously issued for this address.
    pub challenge: String,
    /// Hex-encoded signature over the challenge bytes.
    pub signature: String,
    /// Arbitrary star data (e.g. `{dec, ra, story}`).
    pub star: serde_json::Value,
}

/// Response payload for `GET /chain/validate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// True when the violation list is empty.
    pub valid: bool,
    /// Human-readable violation descriptions, in chain order.
    pub violations: Vec<String>,
}

/// Generic error body returned by REST endpoints on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_body(message: impl Into<String>) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: message.into(),
    })
}

/// Maps a workflow error onto an HTTP status.
///
/// Proof failures are the caller's fault (4xx); chain corruption is ours
/// (5xx). `NotFound` cannot come out of a submission, but mapping it keeps
/// the match exhaustive and honest.
fn registry_error_status(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::MalformedChallenge => StatusCode::BAD_REQUEST,
        RegistryError::Expired { .. } => StatusCode::FORBIDDEN,
        RegistryError::SignatureInvalid => StatusCode::UNAUTHORIZED,
        RegistryError::Chain(ChainError::NotFound { .. }) => StatusCode::NOT_FOUND,
        RegistryError::Chain(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — returns 200 if the node is alive.
///
/// This is the liveness probe for orchestrators. It intentionally does not
/// validate the chain — that belongs in `/chain/validate`.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /status` — returns node status summary.
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let resp = StatusResponse {
        version: state.version.clone(),
        height: state.store.height(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    Json(resp)
}

/// `GET /blocks/height/:height` — block by height.
///
/// The ledger treats absence-by-height as a normal outcome, not an error;
/// over HTTP that still has to surface as a 404.
async fn block_by_height_handler(
    State(state): State<AppState>,
    Path(height): Path<u64>,
) -> Result<Json<Block>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.block_by_height(height) {
        Some(block) => Ok(Json(block)),
        None => Err((
            StatusCode::NOT_FOUND,
            error_body(format!("no block at height {}", height)),
        )),
    }
}

/// `GET /blocks/hash/:hash` — block by hash.
async fn block_by_hash_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<Block>, (StatusCode, Json<ErrorResponse>)> {
    state
        .store
        .block_by_hash(&hash)
        .map(Json)
        .map_err(|e| (StatusCode::NOT_FOUND, error_body(e.to_string())))
}

/// `POST /challenges` — issue an ownership challenge for an address.
async fn issue_challenge_handler(
    State(state): State<AppState>,
    Json(req): Json<ChallengeRequest>,
) -> impl IntoResponse {
    let challenge = state.registry.issue_challenge(&req.address);
    state.metrics.challenges_issued_total.inc();
    Json(ChallengeResponse { challenge })
}

/// `POST /stars` — verify an ownership proof and append a star block.
async fn submit_star_handler(
    State(state): State<AppState>,
    Json(req): Json<SubmitStarRequest>,
) -> Result<(StatusCode, Json<Block>), (StatusCode, Json<ErrorResponse>)> {
    let timer = state.metrics.submission_latency_seconds.start_timer();
    let result = state
        .registry
        .submit(&req.address, &req.challenge, &req.signature, req.star);
    timer.observe_duration();

    match result {
        Ok(block) => {
            state.metrics.blocks_appended_total.inc();
            state.metrics.chain_height.set(state.store.height() as i64);
            Ok((StatusCode::CREATED, Json(block)))
        }
        Err(err) => {
            state.metrics.submissions_rejected_total.inc();
            tracing::debug!(address = %req.address, error = %err, "star submission rejected");
            Err((registry_error_status(&err), error_body(err.to_string())))
        }
    }
}

/// `GET /stars/:address` — all stars owned by an address, in chain order.
///
/// An address with no stars gets an empty list, not a 404 — unowned is a
/// perfectly normal state of affairs.
async fn stars_by_address_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<Vec<StarRecord>> {
    Json(state.store.stars_by_address(&address))
}

/// `GET /chain/validate` — run the full-chain integrity scan.
async fn validate_chain_handler(State(state): State<AppState>) -> Json<ValidationResponse> {
    let violations: Vec<String> = state
        .store
        .validate_chain()
        .iter()
        .map(ToString::to_string)
        .collect();
    Json(ValidationResponse {
        valid: violations.is_empty(),
        violations,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::NodeMetrics;
    use astra_ledger::crypto::AstraKeypair;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let store = Arc::new(ChainStore::new());
        store.initialize();
        let registry = StarRegistry::new(Arc::clone(&store));
        AppState {
            version: "test".into(),
            store,
            registry,
            metrics: Arc::new(NodeMetrics::new()),
        }
    }

    async fn request_json(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        };

        let response = router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let router = create_router(test_state());
        let (status, body) = request_json(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn status_reports_genesis_height() {
        let router = create_router(test_state());
        let (status, body) = request_json(&router, "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["height"], 1);
    }

    #[tokio::test]
    async fn full_registration_flow_over_http() {
        let state = test_state();
        let router = create_router(state.clone());
        let kp = AstraKeypair::generate();

        // 1. Request a challenge.
        let (status, body) = request_json(
            &router,
            "POST",
            "/challenges",
            Some(json!({ "address": kp.address() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let challenge = body["challenge"].as_str().expect("challenge").to_string();

        // 2. Sign externally and submit.
        let signature = kp.sign(challenge.as_bytes()).to_hex();
        let star = json!({ "dec": "68°", "ra": "16h", "story": "over http" });
        let (status, block) = request_json(
            &router,
            "POST",
            "/stars",
            Some(json!({
                "address": kp.address(),
                "challenge": challenge,
                "signature": signature,
                "star": star,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(block["height"], 1);

        // 3. The star is now owned by the address.
        let (status, stars) =
            request_json(&router, "GET", &format!("/stars/{}", kp.address()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stars.as_array().expect("array").len(), 1);
        assert_eq!(stars[0]["star"]["story"], "over http");

        // 4. Both lookups find the sealed block.
        let hash = block["hash"].as_str().expect("hash");
        let (status, _) =
            request_json(&router, "GET", &format!("/blocks/hash/{}", hash), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = request_json(&router, "GET", "/blocks/height/1", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn forged_signature_is_unauthorized() {
        let state = test_state();
        let router = create_router(state.clone());
        let kp = AstraKeypair::generate();
        let imposter = AstraKeypair::generate();

        let challenge = state.registry.issue_challenge(&kp.address());
        let forged = imposter.sign(challenge.as_bytes()).to_hex();

        let (status, body) = request_json(
            &router,
            "POST",
            "/stars",
            Some(json!({
                "address": kp.address(),
                "challenge": challenge,
                "signature": forged,
                "star": { "story": "stolen" },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].as_str().expect("error").contains("signature"));
    }

    #[tokio::test]
    async fn malformed_challenge_is_bad_request() {
        let router = create_router(test_state());
        let kp = AstraKeypair::generate();

        let (status, _) = request_json(
            &router,
            "POST",
            "/stars",
            Some(json!({
                "address": kp.address(),
                "challenge": "garbage",
                "signature": kp.sign(b"garbage").to_hex(),
                "star": { "story": "x" },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_blocks_are_not_found() {
        let router = create_router(test_state());

        let (status, _) = request_json(&router, "GET", "/blocks/height/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let unknown = "ab".repeat(32);
        let (status, _) =
            request_json(&router, "GET", &format!("/blocks/hash/{}", unknown), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unowned_address_gets_empty_list_not_404() {
        let router = create_router(test_state());
        let (status, stars) =
            request_json(&router, "GET", &format!("/stars/{}", "cd".repeat(32)), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(stars.as_array().expect("array").is_empty());
    }

    #[tokio::test]
    async fn validate_reports_clean_chain() {
        let router = create_router(test_state());
        let (status, body) = request_json(&router, "GET", "/chain/validate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert!(body["violations"].as_array().expect("array").is_empty());
    }

    #[tokio::test]
    async fn validate_reports_corrupted_chain() {
        let state = test_state();
        let mut blocks = state.store.snapshot();
        blocks[0].body = hex::encode(b"forged");
        let corrupted = Arc::new(ChainStore::from_blocks(blocks));
        let router = create_router(AppState {
            registry: StarRegistry::new(Arc::clone(&corrupted)),
            store: corrupted,
            ..state
        });

        let (status, body) = request_json(&router, "GET", "/chain/validate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(body["violations"].as_array().expect("array").len(), 1);
    }
}
