//! Axum-based voice gateway: entry point for the emotion-voice service.
//! Realtime generation runs over `/ws`; the same validation/resolution/error
//! semantics are exposed one-shot under `/api`. Config-driven via ServerConfig.

mod session;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use emovoice_core::{
    catalog, resolve, spoken_form, Emotion, GenerationRequest, GenerationResult, Intensity,
    ServerConfig, SYNTHESIS_ERROR, VALIDATION_ERROR,
};
use emovoice_voice::{HttpTts, NullEngine, Speaker, SpeechEngine};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shared handler state: the startup-fixed config and the serialized speaker.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub speaker: Arc<Speaker>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[emovoice-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(ServerConfig::from_env());
    let speaker = Arc::new(build_speaker(&config));
    let state = AppState {
        config: config.clone(),
        speaker,
    };
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(target: "emovoice::gateway", %addr, error = %e, "failed to bind");
            return;
        }
    };
    info!(target: "emovoice::gateway", "🎤 Emovoice gateway running on http://{}", addr);
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(target: "emovoice::gateway", error = %e, "server error");
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!(target: "emovoice::gateway", "shutdown signal received");
}

/// Select the speech engine and log backend status at startup.
fn build_speaker(config: &ServerConfig) -> Speaker {
    let engine: Arc<dyn SpeechEngine> = match HttpTts::from_env() {
        Ok(t) => {
            info!(target: "emovoice::gateway", "TTS: [HTTP] (cloud engine, model {})", t.model);
            Arc::new(t)
        }
        Err(_) => {
            info!(target: "emovoice::gateway", "TTS: [Placeholder] (set TTS_API_KEY for server-side speech)");
            Arc::new(NullEngine)
        }
    };
    if config.server_tts_disabled {
        info!(target: "emovoice::gateway", "Server TTS disabled; clients synthesize locally");
    }
    Speaker::new(
        engine,
        config.server_tts_disabled,
        Duration::from_secs(config.tts_timeout_secs),
    )
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/config", get(get_config))
        .route("/api/emotions", get(get_emotions))
        .route("/api/speak", post(post_speak))
        .route("/ws", get(session::ws_handler))
        .fallback_service(ServeDir::new("public"))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Parse and range-check a request. `None` means the single validation error;
/// emotion membership is part of validation so the resolver can never fail.
pub(crate) fn validate_request(request: &GenerationRequest) -> Option<(Emotion, Intensity)> {
    if !request.has_required_fields() {
        return None;
    }
    let emotion = request.emotion.parse::<Emotion>().ok()?;
    Some((emotion, Intensity::from_request(request.intensity)))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_config(State(state): State<AppState>) -> Json<ServerConfig> {
    Json(state.config.as_ref().clone())
}

#[derive(Debug, Default, Deserialize)]
struct EmotionsQuery {
    detail: Option<String>,
}

/// The ordered emotion keys, or the full authoritative catalog with
/// `?detail=full`. Clients render from this instead of a private table.
async fn get_emotions(Query(query): Query<EmotionsQuery>) -> Response {
    if query.detail.as_deref() == Some("full") {
        Json(catalog()).into_response()
    } else {
        let keys: Vec<&str> = Emotion::ALL.iter().map(|e| e.key()).collect();
        Json(keys).into_response()
    }
}

/// One-shot form of the realtime protocol: same validation, same resolution,
/// same generic failure mapping, HTTP status codes instead of events.
async fn post_speak(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Response {
    let Some((emotion, intensity)) = validate_request(&request) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": VALIDATION_ERROR })),
        )
            .into_response();
    };

    let params = resolve(&request.text, emotion, intensity);
    match state
        .speaker
        .speak(&spoken_form(emotion, &params.text), &params.voice, params.rate)
        .await
    {
        Ok(()) => {
            let result = GenerationResult {
                success: true,
                emotion: emotion.key().to_string(),
                intensity: params.intensity,
                original_text: request.text.clone(),
                modified_text: params.text,
            };
            Json(result).into_response()
        }
        Err(e) => {
            warn!(target: "emovoice::gateway", error = %e, "one-shot synthesis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": SYNTHESIS_ERROR })),
            )
                .into_response()
        }
    }
}
