//! Wire types for the realtime channel and the one-shot HTTP surface.
//!
//! Internally-tagged JSON enums, one duplex WebSocket per client. Field names
//! keep the original camelCase where the deployed front-end already speaks it
//! (`originalText`, `modifiedText`).

use crate::profile::VoiceParameters;
use serde::{Deserialize, Serialize};

/// A client's request to generate voice for a piece of text.
/// Text and emotion are required; intensity is optional and normalizes to 3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub intensity: Option<i64>,
}

impl GenerationRequest {
    /// Both text and emotion must be present. Emotion set membership is
    /// checked separately so the error surface stays a single message.
    pub fn has_required_fields(&self) -> bool {
        !self.text.trim().is_empty() && !self.emotion.trim().is_empty()
    }
}

/// Terminal event of one request/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub emotion: String,
    pub intensity: u8,
    pub original_text: String,
    pub modified_text: String,
}

/// Client → server frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "generate_voice")]
    GenerateVoice(GenerationRequest),
    #[serde(other)]
    Unknown,
}

/// Server → client frames. Exactly one of `VoiceGenerated` / `Error` ends a
/// request; `VoiceConfig` always precedes the terminal event when validation
/// passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Resolved parameters, emitted before any synthesis is attempted so the
    /// client can fall back to local speech.
    #[serde(rename = "voice_config")]
    VoiceConfig(VoiceParameters),
    #[serde(rename = "voice_generated")]
    VoiceGenerated(GenerationResult),
    #[serde(rename = "error")]
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_voice_frame_round_trips() {
        let json = r#"{"type":"generate_voice","text":"Hello","emotion":"happy","intensity":4}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::GenerateVoice(req) => {
                assert_eq!(req.text, "Hello");
                assert_eq!(req.emotion, "happy");
                assert_eq!(req.intensity, Some(4));
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn missing_intensity_is_none() {
        let json = r#"{"type":"generate_voice","text":"Hi","emotion":"sad"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        let ClientMessage::GenerateVoice(req) = msg else {
            panic!("expected generate_voice");
        };
        assert_eq!(req.intensity, None);
        assert!(req.has_required_fields());
    }

    #[test]
    fn unknown_frame_types_do_not_fail_parsing() {
        let json = r#"{"type":"ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Unknown));
    }

    #[test]
    fn result_uses_camel_case_on_the_wire() {
        let result = GenerationResult {
            success: true,
            emotion: "happy".into(),
            intensity: 3,
            original_text: "Hello".into(),
            modified_text: "Hello!".into(),
        };
        let json = serde_json::to_value(ServerMessage::VoiceGenerated(result)).unwrap();
        assert_eq!(json["type"], "voice_generated");
        assert_eq!(json["originalText"], "Hello");
        assert_eq!(json["modifiedText"], "Hello!");
    }

    #[test]
    fn validation_rejects_blank_fields() {
        let req = GenerationRequest {
            text: "   ".into(),
            emotion: "happy".into(),
            intensity: None,
        };
        assert!(!req.has_required_fields());
        let req = GenerationRequest {
            text: "Hello".into(),
            emotion: String::new(),
            intensity: None,
        };
        assert!(!req.has_required_fields());
    }
}
