//! **Voice parameter resolver** — (emotion, intensity, text) → synthesis instructions.
//!
//! Pure and deterministic: a static per-emotion base profile, a per-intensity
//! override table, and a per-emotion text transform. Intensity outside 1..=5
//! resolves through the level-3 entry. The spoken-form expansion pads
//! punctuation for prosody and is applied only at the engine boundary, never
//! in the text reported back to clients.

use crate::emotion::Emotion;
use serde::{Deserialize, Serialize};

/// One rate/pitch/volume tuple. Rate is positive; pitch stays ≤ 2.0 so the
/// browser fallback can honor it without clamping for catalog values; volume
/// above 1.0 is meaningful only to the server engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceTuple {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl VoiceTuple {
    const fn new(rate: f32, pitch: f32, volume: f32) -> Self {
        Self { rate, pitch, volume }
    }
}

/// Per-emotion profile: base tuple (== the level-3 entry), advisory voice
/// name, and the five intensity steps.
pub struct EmotionProfile {
    pub emotion: Emotion,
    pub voice: &'static str,
    pub base: VoiceTuple,
    pub steps: [VoiceTuple; 5],
    /// Human-readable transform template for the catalog endpoint.
    pub transform: &'static str,
}

/// Advisory voice name understood by the external engine. The browser
/// fallback ignores it and picks its own preferred voice.
const DEFAULT_VOICE: &str = "Microsoft David Desktop";

const HAPPY: EmotionProfile = EmotionProfile {
    emotion: Emotion::Happy,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(1.2, 1.3, 1.0),
    steps: [
        VoiceTuple::new(1.0, 1.1, 0.8),
        VoiceTuple::new(1.1, 1.2, 0.9),
        VoiceTuple::new(1.2, 1.3, 1.0),
        VoiceTuple::new(1.3, 1.4, 1.1),
        VoiceTuple::new(1.4, 1.5, 1.2),
    ],
    transform: "{text}! (periods and commas become !)",
};

const SAD: EmotionProfile = EmotionProfile {
    emotion: Emotion::Sad,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(0.7, 0.6, 0.8),
    steps: [
        VoiceTuple::new(0.8, 0.7, 0.9),
        VoiceTuple::new(0.75, 0.65, 0.85),
        VoiceTuple::new(0.7, 0.6, 0.8),
        VoiceTuple::new(0.65, 0.55, 0.75),
        VoiceTuple::new(0.6, 0.5, 0.7),
    ],
    transform: "{text}... (periods and exclamations become ...)",
};

const SHOCK: EmotionProfile = EmotionProfile {
    emotion: Emotion::Shock,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(1.8, 1.6, 1.2),
    steps: [
        VoiceTuple::new(1.4, 1.3, 1.0),
        VoiceTuple::new(1.6, 1.4, 1.1),
        VoiceTuple::new(1.8, 1.6, 1.2),
        VoiceTuple::new(2.0, 1.8, 1.3),
        VoiceTuple::new(2.2, 2.0, 1.4),
    ],
    transform: "Oh my! {text}! Wow!",
};

const ANGRY: EmotionProfile = EmotionProfile {
    emotion: Emotion::Angry,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(1.4, 1.5, 1.1),
    steps: [
        VoiceTuple::new(1.2, 1.3, 1.0),
        VoiceTuple::new(1.3, 1.4, 1.05),
        VoiceTuple::new(1.4, 1.5, 1.1),
        VoiceTuple::new(1.5, 1.6, 1.15),
        VoiceTuple::new(1.6, 1.7, 1.2),
    ],
    transform: "Listen! {text}! Now!",
};

const SLEEPY: EmotionProfile = EmotionProfile {
    emotion: Emotion::Sleepy,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(0.5, 0.7, 0.6),
    steps: [
        VoiceTuple::new(0.7, 0.8, 0.8),
        VoiceTuple::new(0.6, 0.75, 0.7),
        VoiceTuple::new(0.5, 0.7, 0.6),
        VoiceTuple::new(0.4, 0.65, 0.5),
        VoiceTuple::new(0.3, 0.6, 0.4),
    ],
    transform: "Yawn... {text}... zzz...",
};

const THOUGHTFUL: EmotionProfile = EmotionProfile {
    emotion: Emotion::Thoughtful,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(0.9, 0.9, 0.9),
    steps: [
        VoiceTuple::new(1.0, 1.0, 1.0),
        VoiceTuple::new(0.95, 0.95, 0.95),
        VoiceTuple::new(0.9, 0.9, 0.9),
        VoiceTuple::new(0.85, 0.85, 0.85),
        VoiceTuple::new(0.8, 0.8, 0.8),
    ],
    transform: "Hmm... {text}... I think...",
};

// Monotone delivery does not scale with intensity.
const ROBOTIC: EmotionProfile = EmotionProfile {
    emotion: Emotion::Robotic,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(0.9, 0.9, 1.0),
    steps: [
        VoiceTuple::new(0.9, 0.9, 1.0),
        VoiceTuple::new(0.9, 0.9, 1.0),
        VoiceTuple::new(0.9, 0.9, 1.0),
        VoiceTuple::new(0.9, 0.9, 1.0),
        VoiceTuple::new(0.9, 0.9, 1.0),
    ],
    transform: "Beep. {text}. Beep. Processing complete.",
};

const DRAMATIC: EmotionProfile = EmotionProfile {
    emotion: Emotion::Dramatic,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(0.8, 1.3, 1.0),
    steps: [
        VoiceTuple::new(1.0, 1.1, 0.9),
        VoiceTuple::new(0.9, 1.2, 0.95),
        VoiceTuple::new(0.8, 1.3, 1.0),
        VoiceTuple::new(0.7, 1.4, 1.05),
        VoiceTuple::new(0.6, 1.5, 1.1),
    ],
    transform: "*dramatic pause* {text} *dramatic pause*",
};

const SINGING: EmotionProfile = EmotionProfile {
    emotion: Emotion::Singing,
    voice: DEFAULT_VOICE,
    base: VoiceTuple::new(1.0, 1.1, 1.0),
    steps: [
        VoiceTuple::new(0.9, 0.9, 0.9),
        VoiceTuple::new(0.95, 1.0, 0.95),
        VoiceTuple::new(1.0, 1.1, 1.0),
        VoiceTuple::new(1.05, 1.2, 1.05),
        VoiceTuple::new(1.1, 1.3, 1.1),
    ],
    transform: "🎵 {text} 🎵 La la la!",
};

/// Look up the static profile for an emotion.
pub fn profile(emotion: Emotion) -> &'static EmotionProfile {
    match emotion {
        Emotion::Happy => &HAPPY,
        Emotion::Sad => &SAD,
        Emotion::Shock => &SHOCK,
        Emotion::Angry => &ANGRY,
        Emotion::Sleepy => &SLEEPY,
        Emotion::Thoughtful => &THOUGHTFUL,
        Emotion::Robotic => &ROBOTIC,
        Emotion::Dramatic => &DRAMATIC,
        Emotion::Singing => &SINGING,
    }
}

/// 1–5 scalar modulating a chosen emotion's parameters. Absent or
/// out-of-range values normalize to the default level 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intensity(u8);

impl Intensity {
    pub const DEFAULT: Intensity = Intensity(3);

    /// Build from a raw wire value. Anything outside 1..=5 (including absent)
    /// falls back to level 3, never an error.
    pub fn from_request(raw: Option<i64>) -> Self {
        match raw {
            Some(v @ 1..=5) => Intensity(v as u8),
            _ => Intensity::DEFAULT,
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    fn step(self, prof: &EmotionProfile) -> VoiceTuple {
        prof.steps[(self.0 - 1) as usize]
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::DEFAULT
    }
}

/// Resolved synthesis instructions for one request. Created fresh per request
/// and never persisted server-side; the client keeps the last one for replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceParameters {
    /// The emotion-transformed text.
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Advisory voice name; only meaningful to the external engine.
    pub voice: String,
    pub intensity: u8,
}

/// Resolve (text, emotion, intensity) into synthesis instructions.
///
/// Pure: same inputs always yield the same output. Callers validate the
/// emotion key before reaching this point, so resolution cannot fail.
pub fn resolve(text: &str, emotion: Emotion, intensity: Intensity) -> VoiceParameters {
    let prof = profile(emotion);
    let tuple = intensity.step(prof);
    VoiceParameters {
        text: transform(emotion, text),
        rate: tuple.rate,
        pitch: tuple.pitch,
        volume: tuple.volume,
        voice: prof.voice.to_string(),
        intensity: intensity.level(),
    }
}

/// Apply the emotion's text transformation. Replacement runs before the
/// terminal append so the appended punctuation is never re-expanded, which
/// also keeps a second application from double-appending.
fn transform(emotion: Emotion, text: &str) -> String {
    match emotion {
        Emotion::Happy => {
            let mut t = text.replace(['.', ','], "!");
            if !t.ends_with('!') {
                t.push('!');
            }
            t
        }
        Emotion::Sad => {
            // Periods first: the `!` replacement inserts dots that must not
            // themselves be expanded.
            let mut t = text.replace('.', "...").replace('!', "...");
            if !t.ends_with("...") {
                t.push_str("...");
            }
            t
        }
        Emotion::Shock => format!("Oh my! {text}! Wow!"),
        Emotion::Angry => format!("Listen! {text}! Now!"),
        Emotion::Sleepy => format!("Yawn... {text}... zzz..."),
        Emotion::Thoughtful => format!("Hmm... {text}... I think..."),
        Emotion::Robotic => format!("Beep. {text}. Beep. Processing complete."),
        Emotion::Dramatic => format!("*dramatic pause* {text} *dramatic pause*"),
        Emotion::Singing => format!("🎵 {text} 🎵 La la la!"),
    }
}

/// Pad punctuation for prosody immediately before the engine speaks.
/// Never applied to the text reported back to clients.
pub fn spoken_form(emotion: Emotion, modified_text: &str) -> String {
    match emotion {
        Emotion::Happy | Emotion::Angry => modified_text.replace('!', " ! "),
        Emotion::Shock => modified_text.replace('!', " !!! "),
        Emotion::Sad | Emotion::Sleepy | Emotion::Thoughtful => {
            modified_text.replace("...", " ... ")
        }
        Emotion::Robotic | Emotion::Dramatic | Emotion::Singing => modified_text.to_string(),
    }
}

/// One serializable catalog entry: everything a client needs to render an
/// emotion and predict its resolution without a private copy of the table.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub voice: &'static str,
    pub base: VoiceTuple,
    pub intensity: [VoiceTuple; 5],
    pub transform: &'static str,
}

/// The full authoritative catalog, in canonical order.
pub fn catalog() -> Vec<CatalogEntry> {
    Emotion::ALL
        .iter()
        .map(|&emotion| {
            let prof = profile(emotion);
            CatalogEntry {
                key: emotion.key(),
                label: emotion.label(),
                emoji: emotion.emoji(),
                voice: prof.voice,
                base: prof.base,
                intensity: prof.steps,
                transform: prof.transform,
            }
        })
        .collect()
}
