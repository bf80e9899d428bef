//! # Emovoice Voice — Server-Side Speech Layer
//!
//! Turns resolved voice parameters into audible speech on the server. One
//! `Speaker` per process serializes every invocation of the external engine;
//! when server TTS is disabled the layer degrades to a guaranteed no-op so
//! the protocol keeps flowing and clients synthesize locally.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                       Speaker                          │
//! │  ┌─────────────┐   ┌──────────────┐   ┌────────────┐  │
//! │  │  Mutex +    │ → │ SpeechEngine │ → │  AudioOut  │  │
//! │  │  timeout    │   │ (HTTP/Null)  │   │  (rodio)   │  │
//! │  └─────────────┘   └──────────────┘   └────────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod engine;
pub mod error;
pub mod playback;
pub mod speaker;

pub use engine::{HttpTts, NullEngine, SpeechEngine};
pub use error::{VoiceError, VoiceResult};
pub use playback::AudioOut;
pub use speaker::Speaker;
