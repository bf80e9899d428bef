//! Fallback controller — the client-side request state machine.
//!
//! One authoritative record of the in-flight request replaces the implicit
//! coordination the legacy client did through a shared mutable config field.
//! The controller consumes user actions and server frames, and emits
//! `ControllerEvent`s over an unbounded channel; transport and UI subscribe
//! and act on them.

use chrono::{DateTime, Utc};
use emovoice_core::{
    Emotion, GenerationRequest, GenerationResult, ServerMessage, VoiceParameters,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::synth::Utterance;

/// Maximum submission length, enforced client-side.
const MAX_TEXT_LEN: usize = 500;

/// Transport connectivity as the controller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Where the current request/response cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    /// Request sent; the configuration event has not arrived yet.
    AwaitingConfig,
    /// Configuration stored; waiting for the terminal result or error.
    AwaitingResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Events the controller emits for the transport, the UI, and the local
/// synthesizer to act on.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// Hand this request to the transport.
    SendRequest(GenerationRequest),

    /// Surface a message to the user.
    Notice { kind: NoticeKind, message: String },

    /// Render the received configuration as a preview.
    Preview {
        emotion: String,
        intensity_label: &'static str,
        original_text: String,
        modified_text: String,
        at: DateTime<Utc>,
    },

    /// The terminal result of a completed cycle.
    Generated {
        result: GenerationResult,
        at: DateTime<Utc>,
    },

    /// Drive local speech synthesis (server TTS disabled, or a replay).
    SpeakLocally(Utterance),

    /// Transport connectivity changed; UIs gate the submit control on this.
    ConnectionChanged(bool),
}

/// Per-tab controller state. Single-flight: a new submission is rejected
/// while a request is outstanding.
pub struct FallbackController {
    connection: ConnectionState,
    phase: RequestPhase,
    /// Fixed at construction, fetched once from `GET /api/config`.
    server_tts_disabled: bool,
    /// The most recently received configuration, kept for replay.
    last_config: Option<VoiceParameters>,
    /// The request the configuration belongs to, kept for "play again".
    last_request: Option<GenerationRequest>,
    event_tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl FallbackController {
    pub fn new(server_tts_disabled: bool) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let controller = Self {
            connection: ConnectionState::Disconnected,
            phase: RequestPhase::Idle,
            server_tts_disabled,
            last_config: None,
            last_request: None,
            event_tx,
        };
        (controller, event_rx)
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn is_processing(&self) -> bool {
        self.phase != RequestPhase::Idle
    }

    pub fn last_config(&self) -> Option<&VoiceParameters> {
        self.last_config.as_ref()
    }

    /// Transport came up.
    pub fn on_connected(&mut self) {
        self.connection = ConnectionState::Connected;
        self.emit(ControllerEvent::ConnectionChanged(true));
    }

    /// Transport dropped. An in-flight request will never complete, so the
    /// cycle resets; the failure is terminal like every other.
    pub fn on_disconnected(&mut self) {
        self.connection = ConnectionState::Disconnected;
        if self.phase != RequestPhase::Idle {
            warn!(target: "emovoice::client", "connection lost with a request in flight");
            self.phase = RequestPhase::Idle;
        }
        self.emit(ControllerEvent::ConnectionChanged(false));
    }

    /// User pressed generate. Rejections never reach the server.
    pub fn submit(&mut self, text: &str, emotion: Emotion, intensity: Option<i64>) {
        let text = text.trim();
        if text.is_empty() {
            self.notice(NoticeKind::Error, "Please enter some text first!");
            return;
        }
        if text.chars().count() > MAX_TEXT_LEN {
            self.notice(NoticeKind::Error, "Text must be 500 characters or fewer");
            return;
        }
        if self.connection != ConnectionState::Connected {
            self.notice(NoticeKind::Error, "Not connected to server. Please wait...");
            return;
        }
        if self.is_processing() {
            self.notice(NoticeKind::Info, "Already processing. Please wait...");
            return;
        }

        let request = GenerationRequest {
            text: text.to_string(),
            emotion: emotion.key().to_string(),
            intensity,
        };
        self.last_request = Some(request.clone());
        self.phase = RequestPhase::AwaitingConfig;
        debug!(target: "emovoice::client", emotion = %emotion, "submitting generation request");
        self.emit(ControllerEvent::SendRequest(request));
        self.notice(NoticeKind::Info, "Generating voice...");
    }

    /// Feed a server frame into the state machine.
    pub fn on_server_event(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::VoiceConfig(config) => self.on_voice_config(config),
            ServerMessage::VoiceGenerated(result) => self.on_voice_generated(result),
            ServerMessage::Error { message } => {
                self.phase = RequestPhase::Idle;
                self.notice(NoticeKind::Error, &message);
            }
        }
    }

    /// Replay the last generation. With server TTS enabled this is a full
    /// round trip; with it disabled the stored configuration is spoken
    /// locally without contacting the server.
    pub fn play_again(&mut self) {
        if self.server_tts_disabled {
            if let Some(config) = &self.last_config {
                self.emit(ControllerEvent::SpeakLocally(Utterance::from_config(config)));
            }
            return;
        }
        let Some(request) = self.last_request.clone() else {
            return;
        };
        let emotion = match request.emotion.parse::<Emotion>() {
            Ok(e) => e,
            Err(_) => return,
        };
        self.submit(&request.text, emotion, request.intensity);
    }

    fn on_voice_config(&mut self, config: VoiceParameters) {
        // Stored regardless of the disabled flag; replay needs it either way.
        let original_text = self
            .last_request
            .as_ref()
            .map(|r| r.text.clone())
            .unwrap_or_default();
        let emotion = self
            .last_request
            .as_ref()
            .map(|r| r.emotion.clone())
            .unwrap_or_default();
        self.emit(ControllerEvent::Preview {
            emotion,
            intensity_label: intensity_label(config.intensity),
            original_text,
            modified_text: config.text.clone(),
            at: Utc::now(),
        });
        self.last_config = Some(config);
        if self.phase == RequestPhase::AwaitingConfig {
            self.phase = RequestPhase::AwaitingResult;
        }
    }

    fn on_voice_generated(&mut self, result: GenerationResult) {
        self.phase = RequestPhase::Idle;
        if result.success {
            info!(target: "emovoice::client", emotion = %result.emotion, "voice generated");
            self.notice(
                NoticeKind::Success,
                &format!("Voice generated with {} emotion!", result.emotion),
            );
            if self.server_tts_disabled {
                if let Some(config) = &self.last_config {
                    self.emit(ControllerEvent::SpeakLocally(Utterance::from_config(config)));
                }
            }
        } else {
            self.notice(NoticeKind::Error, "Failed to generate voice");
        }
        self.emit(ControllerEvent::Generated {
            result,
            at: Utc::now(),
        });
    }

    fn notice(&self, kind: NoticeKind, message: &str) {
        self.emit(ControllerEvent::Notice {
            kind,
            message: message.to_string(),
        });
    }

    fn emit(&self, event: ControllerEvent) {
        // The receiver lives as long as the embedding client; a drop means
        // the tab is gone and events are moot.
        let _ = self.event_tx.send(event);
    }
}

/// Human label for an intensity level; out-of-range reads as the default.
pub fn intensity_label(level: u8) -> &'static str {
    match level {
        1 => "Subtle",
        2 => "Light",
        4 => "Strong",
        5 => "Intense",
        _ => "Moderate",
    }
}
