// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway built on axum.
//!
//! Thin plumbing over the turn controller: it owns session-id generation and
//! framing, serializes turns per session, and never interprets conversation
//! content. Routes:
//!
//! - `POST /api/chat` - one request/response turn
//! - `GET  /api/health` - liveness probe
//! - `POST /api/upload` - restaurant-info JSON for the semantic index
//! - `WS   /ws/{session_id}` - interactive conversation channel

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use chrono_tz::Tz;
use dashmap::DashMap;
use goldfork_agent::{AssistantTurn, SessionRegistry, TurnController};
use goldfork_config::model::GatewayConfig;
use goldfork_core::GoldforkError;
use goldfork_core::traits::SearchAdapter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    controller: Arc<TurnController>,
    registry: Arc<SessionRegistry>,
    search: Arc<dyn SearchAdapter>,
    restaurant_name: String,
    tz: Tz,
    /// Per-session turn locks; a session runs at most one turn at a time.
    turn_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    start_time: Instant,
}

impl GatewayState {
    pub fn new(
        controller: Arc<TurnController>,
        registry: Arc<SessionRegistry>,
        search: Arc<dyn SearchAdapter>,
        restaurant_name: String,
        tz: Tz,
    ) -> Self {
        Self {
            controller,
            registry,
            search,
            restaurant_name,
            tz,
            turn_locks: Arc::new(DashMap::new()),
            start_time: Instant::now(),
        }
    }
}

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    /// Customer utterance.
    pub message: String,
    /// Session to continue; a new one is created when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub session_id: String,
    pub response: String,
    /// Structured turn metadata (extraction or booking outcome), if any.
    pub metadata: Option<Value>,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for POST /api/upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub document_count: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Starts the gateway HTTP/WebSocket server.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
) -> Result<(), GoldforkError> {
    let app = router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GoldforkError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| GoldforkError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/chat", post(post_chat))
        .route("/api/health", get(get_health))
        .route("/api/upload", post(post_upload))
        .route("/ws/{session_id}", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// POST /api/chat
///
/// Runs one conversation turn and returns the assistant's reply.
async fn post_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequestBody>,
) -> Json<ChatResponseBody> {
    let session_id = body
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let turn = run_serialized(&state, &session_id, &body.message).await;
    let metadata = parse_metadata(turn.metadata.as_deref());

    Json(ChatResponseBody {
        session_id,
        response: turn.content,
        metadata,
    })
}

/// GET /api/health
async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /api/upload
///
/// Accepts a restaurant-info JSON document, flattens and indexes it, and
/// reports the number of indexed chunks.
async fn post_upload(
    State(state): State<GatewayState>,
    Json(document): Json<Value>,
) -> Response {
    match state.search.upsert_document(&document).await {
        Ok(count) => Json(UploadResponse {
            success: true,
            message: format!("Successfully uploaded {count} document chunks"),
            document_count: count,
        })
        .into_response(),
        Err(GoldforkError::Validation(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "restaurant-info upload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Upload failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// WebSocket message from the client.
#[derive(Debug, Deserialize)]
struct WsIncoming {
    message: String,
}

/// WebSocket upgrade handler for /ws/{session_id}.
async fn ws_handler(
    Path(session_id): Path<String>,
    ws: WebSocketUpgrade,
    State(state): State<GatewayState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, session_id))
}

/// Drives one WebSocket connection: a single read-process-reply loop, so
/// turns on the session are naturally serialized.
async fn handle_socket(mut socket: WebSocket, state: GatewayState, session_id: String) {
    let now = Utc::now()
        .with_timezone(&state.tz)
        .format("%A, %B %d, %Y at %I:%M %p %Z");
    let welcome = serde_json::json!({
        "type": "system",
        "content": format!(
            "Welcome to {}! I'm here to help you with menu inquiries and table \
             reservations. Current time: {}. How may I assist you today?",
            state.restaurant_name, now
        ),
        "session_id": session_id,
    });
    if socket
        .send(Message::Text(welcome.to_string().into()))
        .await
        .is_err()
    {
        disconnect(&state, &session_id);
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let incoming: WsIncoming = match serde_json::from_str(&text) {
            Ok(incoming) => incoming,
            Err(e) => {
                warn!(session_id, error = %e, "invalid WebSocket message");
                continue;
            }
        };

        let turn = run_serialized(&state, &session_id, &incoming.message).await;
        let metadata = parse_metadata(turn.metadata.as_deref());
        let (completed, details) = booking_outcome(metadata.as_ref());

        let frame = serde_json::json!({
            "type": "assistant",
            "content": turn.content,
            "session_id": session_id,
            "metadata": metadata,
            "reservation_completed": completed,
            "reservation_details": details,
        });
        if socket
            .send(Message::Text(frame.to_string().into()))
            .await
            .is_err()
        {
            break;
        }
    }

    disconnect(&state, &session_id);
}

/// Drops the session's in-flight draft and its turn lock.
fn disconnect(state: &GatewayState, session_id: &str) {
    info!(session_id, "WebSocket disconnected");
    state.registry.remove(session_id);
    state.turn_locks.remove(session_id);
}

/// Runs a turn while holding the session's turn lock.
async fn run_serialized(state: &GatewayState, session_id: &str, text: &str) -> AssistantTurn {
    let lock = state
        .turn_locks
        .entry(session_id.to_string())
        .or_default()
        .clone();
    let _guard = lock.lock().await;
    state.controller.process_turn(session_id, text).await
}

fn parse_metadata(metadata: Option<&str>) -> Option<Value> {
    metadata.and_then(|raw| serde_json::from_str(raw).ok())
}

/// A successful booking outcome in the turn metadata surfaces as
/// `reservation_completed` plus the outcome details.
fn booking_outcome(metadata: Option<&Value>) -> (bool, Option<Value>) {
    match metadata {
        Some(value) if value.get("success").and_then(Value::as_bool) == Some(true) => {
            (true, Some(value.clone()))
        }
        _ => (false, None),
    }
}
