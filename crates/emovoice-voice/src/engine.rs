//! **SpeechEngine** — the seam between resolved parameters and actual audio.
//!
//! The gateway invokes an engine with (spoken text, advisory voice, rate) and
//! gets audio bytes back. Implement for any OpenAI-compatible TTS API or a
//! local engine; `NullEngine` keeps the pipeline flowing with no audio.

use crate::error::{VoiceError, VoiceResult};

/// Backend that turns text into audio bytes (WAV/MP3). Return an empty vec to
/// skip playback while still reporting success.
pub trait SpeechEngine: Send + Sync {
    fn synthesize(&self, text: &str, voice: &str, rate: f32) -> VoiceResult<Vec<u8>>;
}

/// Placeholder engine: returns empty audio so nothing plays. Used when no TTS
/// credentials are configured and in tests.
#[derive(Debug, Default)]
pub struct NullEngine;

impl SpeechEngine for NullEngine {
    fn synthesize(&self, _text: &str, _voice: &str, _rate: f32) -> VoiceResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Map the catalog's advisory desktop voice names to API voice ids. The
/// advisory name is a hint, not a contract; unrecognized names get a neutral
/// default.
fn advisory_to_api_voice(name: &str) -> &'static str {
    let n = name.to_ascii_lowercase();
    if n.contains("david") {
        "onyx"
    } else if n.contains("zira") {
        "nova"
    } else if n.contains("mark") {
        "echo"
    } else if n.contains("hazel") {
        "fable"
    } else {
        "alloy"
    }
}

/// Production engine: OpenAI-compatible `audio/speech` endpoint.
/// Uses `TTS_API_URL` (e.g. https://api.openai.com/v1) and `TTS_API_KEY`.
#[derive(Debug, Clone)]
pub struct HttpTts {
    /// Base URL without trailing slash (e.g. https://api.openai.com/v1).
    pub base_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// TTS model: tts-1 (fast) or tts-1-hd (higher quality).
    pub model: String,
    /// HTTP client (blocking) for sync synthesize().
    client: reqwest::blocking::Client,
}

impl HttpTts {
    /// Build from environment: TTS_API_URL, TTS_API_KEY, TTS_MODEL.
    pub fn from_env() -> VoiceResult<Self> {
        let base_url = std::env::var("TTS_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = std::env::var("TTS_API_KEY")
            .map_err(|_| VoiceError::Config("server TTS requires TTS_API_KEY".to_string()))?;
        let model = std::env::var("TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string());
        Self::new(base_url, api_key, model)
    }

    /// Create with explicit config (e.g. for tests or non-env wiring).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> VoiceResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| VoiceError::Tts(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }
}

impl SpeechEngine for HttpTts {
    fn synthesize(&self, text: &str, voice: &str, rate: f32) -> VoiceResult<Vec<u8>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/audio/speech", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
            "voice": advisory_to_api_voice(voice),
            // The API accepts 0.25..=4.0; catalog rates stay well inside.
            "speed": rate.clamp(0.25, 4.0),
        });
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| VoiceError::Tts(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(VoiceError::Tts(format!("TTS API error {}: {}", status, body)));
        }
        let bytes = res.bytes().map_err(|e| VoiceError::Tts(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
