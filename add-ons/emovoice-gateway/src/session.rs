//! WebSocket session handler — the realtime generation protocol.
//!
//! One duplex socket per client. Each `generate_voice` frame runs the full
//! validate → resolve → config → speak → terminal-event sequence; the
//! configuration frame always goes out before synthesis is attempted so a
//! fallback client has what it needs even if the speak step fails.

use crate::{validate_request, AppState};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use emovoice_core::{
    resolve, spoken_form, ClientMessage, GenerationRequest, GenerationResult, ServerMessage,
    SYNTHESIS_ERROR, VALIDATION_ERROR,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    // Single writer task so every event for this session serializes onto the
    // socket in emission order.
    let (event_tx, mut event_rx) = mpsc::channel::<ServerMessage>(32);
    let writer = tokio::spawn(async move {
        while let Some(message) = event_rx.recv().await {
            let Ok(json) = serde_json::to_string(&message) else {
                continue;
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    info!(target: "emovoice::session", %session_id, "WebSocket session started");

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::GenerateVoice(request)) => {
                    handle_generate(&state, request, &event_tx).await;
                }
                Ok(ClientMessage::Unknown) => {
                    debug!(target: "emovoice::session", %session_id, "ignoring unknown frame");
                }
                Err(e) => {
                    warn!(target: "emovoice::session", %session_id, error = %e, "unparseable frame");
                    let _ = event_tx
                        .send(ServerMessage::Error {
                            message: VALIDATION_ERROR.to_string(),
                        })
                        .await;
                }
            },
            Ok(Message::Close(_)) => {
                info!(target: "emovoice::session", %session_id, "WebSocket closed");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(target: "emovoice::session", %session_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    drop(event_tx);
    let _ = writer.await;
}

/// Run one generation request, emitting the event sequence the protocol
/// promises: an error and nothing else on invalid input; otherwise a
/// configuration frame followed by exactly one terminal event.
pub(crate) async fn handle_generate(
    state: &AppState,
    request: GenerationRequest,
    events: &mpsc::Sender<ServerMessage>,
) {
    let Some((emotion, intensity)) = validate_request(&request) else {
        let _ = events
            .send(ServerMessage::Error {
                message: VALIDATION_ERROR.to_string(),
            })
            .await;
        return;
    };

    let params = resolve(&request.text, emotion, intensity);
    // Out before synthesis: the fallback client replays from this frame.
    let _ = events.send(ServerMessage::VoiceConfig(params.clone())).await;

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
            let _ = events.send(ServerMessage::VoiceGenerated(result)).await;
        }
        Err(e) => {
            warn!(target: "emovoice::session", error = %e, "synthesis failed");
            let _ = events
                .send(ServerMessage::Error {
                    message: SYNTHESIS_ERROR.to_string(),
                })
                .await;
        }
    }
}
