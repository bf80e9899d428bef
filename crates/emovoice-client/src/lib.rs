//! # Emovoice Client — Fallback Controller
//!
//! The client half of the generation handshake: a state machine that submits
//! requests over the realtime channel, tracks the configuration the server
//! sends back, and decides whether audio comes from the server or from local
//! synthesis. The embedding UI is a pure view subscribed to controller
//! events; nothing here touches a document tree.

pub mod controller;
pub mod synth;

pub use controller::{
    intensity_label, ConnectionState, ControllerEvent, FallbackController, NoticeKind,
    RequestPhase,
};
pub use synth::{dispatch, LocalSynthesizer, Utterance};
