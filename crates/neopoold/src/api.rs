use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use serde::Deserialize;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::engine::Engine;
use crate::engine::ToIntegrationMessage;

/// Response for the /v1/ping endpoint
#[derive(Serialize)]
struct PingResponse {
    status: String,
}

/// Response for the /v1/info endpoint
#[derive(Serialize)]
struct InfoResponse {
    version: String,
    hostname: String,
}

/// An entity action submitted over the API.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommandRequest {
    TurnOn { entity_id: String },
    TurnOff { entity_id: String },
    SetValue { entity_id: String, value: f64 },
    SelectOption { entity_id: String, option: String },
    Press { entity_id: String },
}

impl From<CommandRequest> for ToIntegrationMessage {
    fn from(request: CommandRequest) -> Self {
        match request {
            CommandRequest::TurnOn { entity_id } => {
                ToIntegrationMessage::SwitchCommand { entity_id, on: true }
            }
            CommandRequest::TurnOff { entity_id } => {
                ToIntegrationMessage::SwitchCommand { entity_id, on: false }
            }
            CommandRequest::SetValue { entity_id, value } => {
                ToIntegrationMessage::NumberCommand { entity_id, value }
            }
            CommandRequest::SelectOption { entity_id, option } => {
                ToIntegrationMessage::SelectCommand { entity_id, option }
            }
            CommandRequest::Press { entity_id } => ToIntegrationMessage::ButtonPress { entity_id },
        }
    }
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    version: &'static str,
    engine: Arc<Engine>,
}

/// Handler for GET /v1/ping
#[tracing::instrument]
async fn ping() -> impl IntoResponse {
    tracing::debug!("Handling /v1/ping request");
    (
        StatusCode::OK,
        Json(PingResponse {
            status: "ok".to_string(),
        }),
    )
}

/// Handler for GET /v1/info
#[tracing::instrument(skip(state))]
async fn info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("Handling /v1/info request");

    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());

    (
        StatusCode::OK,
        Json(InfoResponse {
            version: state.version.to_string(),
            hostname,
        }),
    )
}

/// Handler for GET /v1/state
#[tracing::instrument(skip(state))]
async fn engine_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("Handling /v1/state request");

    let snapshot = state.engine.state_snapshot();
    (StatusCode::OK, Json(crate::engine::State::clone(&snapshot)))
}

/// Handler for POST /v1/command
#[tracing::instrument(skip(state))]
async fn command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> impl IntoResponse {
    tracing::debug!("Handling /v1/command request: {:?}", request);

    match state.engine.send_command(request.into()) {
        Ok(()) => (StatusCode::ACCEPTED, Json(serde_json::json!({"status": "accepted"}))),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": e.to_string()})),
        ),
    }
}

/// Create the API router with all endpoints
fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/ping", get(ping))
        .route("/v1/info", get(info))
        .route("/v1/state", get(engine_state))
        .route("/v1/command", post(command))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP API server
///
/// Binds to the configured address and serves the API endpoints until the
/// provided shutdown signal is triggered.
pub async fn serve(
    listen: String,
    port: u16,
    engine: Arc<Engine>,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    let version = env!("CARGO_PKG_VERSION");

    let state = Arc::new(AppState { version, engine });
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", listen, port).parse()?;
    tracing::info!("Starting HTTP API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
            tracing::info!("HTTP API server shutting down gracefully");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_request_mapping() {
        let request: CommandRequest = serde_json::from_str(
            r#"{"action": "turn_on", "entity_id": "neopool_mqtt_ABC123_filtration"}"#,
        )
        .unwrap();
        let msg = ToIntegrationMessage::from(request);
        assert!(matches!(
            msg,
            ToIntegrationMessage::SwitchCommand { on: true, .. }
        ));

        let request: CommandRequest = serde_json::from_str(
            r#"{"action": "set_value", "entity_id": "neopool_mqtt_ABC123_ph_min", "value": 7.2}"#,
        )
        .unwrap();
        assert!(matches!(
            ToIntegrationMessage::from(request),
            ToIntegrationMessage::NumberCommand { value, .. } if value == 7.2
        ));
    }

    #[test]
    fn test_command_request_rejects_unknown_action() {
        let result: Result<CommandRequest, _> =
            serde_json::from_str(r#"{"action": "explode", "entity_id": "x"}"#);
        assert!(result.is_err());
    }
}
