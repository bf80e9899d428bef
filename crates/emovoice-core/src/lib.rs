//! # Emovoice Core — Emotion Catalog & Voice Parameter Resolver
//!
//! The authoritative emotion table and the pure resolution pipeline shared by
//! the gateway and the client controller. No I/O lives here.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      emovoice-core                           │
//! │  ┌──────────────┐  ┌───────────────┐  ┌──────────────────┐  │
//! │  │   Emotion    │→ │   Resolver    │→ │ VoiceParameters  │  │
//! │  │  (catalog)   │  │ (base+steps,  │  │ (rate/pitch/vol/ │  │
//! │  │              │  │  transforms)  │  │  voice/text)     │  │
//! │  └──────────────┘  └───────────────┘  └──────────────────┘  │
//! │          ↑                                     ↓             │
//! │  ┌──────────────┐                    ┌──────────────────┐   │
//! │  │ ServerConfig │                    │  Wire protocol   │   │
//! │  │  (from env)  │                    │ (request/result) │   │
//! │  └──────────────┘                    └──────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod emotion;
pub mod profile;
pub mod protocol;

pub use config::ServerConfig;
pub use emotion::{Emotion, UnknownEmotion};
pub use profile::{
    catalog, profile, resolve, spoken_form, CatalogEntry, Intensity, VoiceParameters, VoiceTuple,
};
pub use protocol::{ClientMessage, GenerationRequest, GenerationResult, ServerMessage};

/// The validation message for a request missing text or emotion. Shared by the
/// realtime handler and the one-shot HTTP surface so both reject identically.
pub const VALIDATION_ERROR: &str = "Text and emotion are required";

/// The generic failure message surfaced when synthesis fails. The underlying
/// cause stays in the server logs and never reaches a client.
pub const SYNTHESIS_ERROR: &str = "Failed to generate voice";
