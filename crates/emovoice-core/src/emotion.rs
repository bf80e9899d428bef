//! The canonical emotion set.
//!
//! One server-owned enumeration drives every table lookup; clients fetch the
//! catalog instead of carrying their own copy. The three formerly client-only
//! emotions (robotic, dramatic, singing) are full members of the canonical set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Enumerated label selecting a voice-parameter and text-transform profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Shock,
    Angry,
    Sleepy,
    Thoughtful,
    Robotic,
    Dramatic,
    Singing,
}

/// Returned when an emotion key is not in the canonical set. Callers validate
/// membership before resolving; the resolver itself never fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown emotion: {0}")]
pub struct UnknownEmotion(pub String);

impl Emotion {
    /// Every canonical emotion, in the order the catalog endpoint reports them.
    pub const ALL: [Emotion; 9] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Shock,
        Emotion::Angry,
        Emotion::Sleepy,
        Emotion::Thoughtful,
        Emotion::Robotic,
        Emotion::Dramatic,
        Emotion::Singing,
    ];

    /// Lowercase wire key, stable across the protocol and the catalog.
    pub fn key(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Shock => "shock",
            Emotion::Angry => "angry",
            Emotion::Sleepy => "sleepy",
            Emotion::Thoughtful => "thoughtful",
            Emotion::Robotic => "robotic",
            Emotion::Dramatic => "dramatic",
            Emotion::Singing => "singing",
        }
    }

    /// Human-readable label for previews and catalog entries.
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Shock => "Shock",
            Emotion::Angry => "Angry",
            Emotion::Sleepy => "Sleepy",
            Emotion::Thoughtful => "Thoughtful",
            Emotion::Robotic => "Robotic",
            Emotion::Dramatic => "Dramatic",
            Emotion::Singing => "Singing",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Shock => "😱",
            Emotion::Angry => "😠",
            Emotion::Sleepy => "😴",
            Emotion::Thoughtful => "🤔",
            Emotion::Robotic => "🤖",
            Emotion::Dramatic => "🎭",
            Emotion::Singing => "🎤",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" => Ok(Emotion::Happy),
            "sad" => Ok(Emotion::Sad),
            "shock" => Ok(Emotion::Shock),
            "angry" => Ok(Emotion::Angry),
            "sleepy" => Ok(Emotion::Sleepy),
            "thoughtful" => Ok(Emotion::Thoughtful),
            "robotic" => Ok(Emotion::Robotic),
            "dramatic" => Ok(Emotion::Dramatic),
            "singing" => Ok(Emotion::Singing),
            other => Err(UnknownEmotion(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for emotion in Emotion::ALL {
            assert_eq!(emotion.key().parse::<Emotion>().unwrap(), emotion);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("HAPPY".parse::<Emotion>().unwrap(), Emotion::Happy);
        assert_eq!(" Thoughtful ".parse::<Emotion>().unwrap(), Emotion::Thoughtful);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "excited".parse::<Emotion>().unwrap_err();
        assert_eq!(err, UnknownEmotion("excited".to_string()));
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Emotion::Dramatic).unwrap();
        assert_eq!(json, "\"dramatic\"");
        let back: Emotion = serde_json::from_str("\"singing\"").unwrap();
        assert_eq!(back, Emotion::Singing);
    }
}
