//! Axum HTTP server for participant registration and group queries.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use huddle_core::{GroupId, Lobby, ParticipantId};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{ServerConfig, Surface};
use crate::error::{Error, Result};
use crate::placement::{PositionSource, RandomPlacement};

/// Shared application state.
pub struct AppState {
    lobby: Lobby,
    surface: Surface,
    placement: Box<dyn PositionSource>,
}

impl AppState {
    /// The participant lobby.
    pub fn lobby(&self) -> &Lobby {
        &self.lobby
    }
}

/// Huddle HTTP server.
pub struct HuddleServer {
    state: Arc<AppState>,
    api_addr: SocketAddr,
}

impl HuddleServer {
    /// Create a server with random placement for new participants.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_placement(config, RandomPlacement)
    }

    /// Create a server with a custom placement source.
    pub fn with_placement(config: ServerConfig, placement: impl PositionSource + 'static) -> Self {
        Self {
            state: Arc::new(AppState {
                lobby: Lobby::new(config.lobby),
                surface: config.surface,
                placement: Box::new(placement),
            }),
            api_addr: config.api_addr,
        }
    }

    /// Shared state (for inspection).
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/status", get(status_handler))
            // Adds a player at a random position
            .route("/init/player", post(init_player_handler))
            // Returns the player's current group
            .route("/group", get(group_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server until SIGINT or SIGTERM.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.api_addr).await?;
        tracing::info!("HTTP server listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

async fn health() -> &'static str {
    "OK"
}

/// Server status response.
#[derive(Debug, Serialize, Deserialize)]
struct StatusResponse {
    status: String,
    participants: usize,
    capacity: u64,
    threshold: f64,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let lobby = state.lobby();
    Json(StatusResponse {
        status: "ok".to_string(),
        participants: lobby.registry().len(),
        capacity: lobby.registry().capacity(),
        threshold: lobby.engine().threshold(),
    })
}

/// Optional registration body. Ids are always issued by the server, so a
/// supplied `player_id` is accepted but not used.
#[derive(Debug, Deserialize)]
struct RegisterRequest {
    #[serde(default)]
    #[allow(dead_code)]
    player_id: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RegisterResponse {
    player_id: ParticipantId,
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
}

async fn init_player_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    if !body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice::<RegisterRequest>(&body)
            .map_err(|e| Error::InvalidRequest(format!("invalid register request: {e}")))?;
    }

    let position = state.placement.place(&state.surface);
    let id = state.lobby.register(position)?;
    tracing::debug!(player = %id, %position, "player registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            player_id: id,
            x: position.x,
            y: position.y,
        }),
    ))
}

#[derive(Debug, Deserialize)]
struct GroupQuery {
    player_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroupResponse {
    group_id: GroupId,
}

async fn group_handler(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<GroupQuery>, QueryRejection>,
) -> Result<Json<GroupResponse>> {
    let Query(query) = query.map_err(|e| Error::InvalidRequest(e.body_text()))?;
    let id = ParticipantId(query.player_id);

    let group_id = state.lobby.query_group(id)?;
    tracing::debug!(player = %id, group = %group_id, "group resolved");

    Ok(Json(GroupResponse { group_id }))
}
