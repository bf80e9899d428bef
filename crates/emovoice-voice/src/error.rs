//! Error types for the Emovoice speech layer

use thiserror::Error;

/// Result type alias for speech operations
pub type VoiceResult<T> = Result<T, VoiceError>;

/// Errors that can occur while producing server-side speech
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TTS error: {0}")]
    Tts(String),

    #[error("Audio playback error: {0}")]
    Playback(String),

    #[error("Synthesis timed out after {0}s")]
    Timeout(u64),

    #[error("Channel send error: {0}")]
    ChannelSend(String),
}
