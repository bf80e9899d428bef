//! Local speech synthesis abstraction.
//!
//! The controller never talks to a speech API directly; it emits an
//! `Utterance` and the embedding client implements `LocalSynthesizer` over
//! whatever is available (the browser's speechSynthesis, a desktop engine, a
//! test recorder). Parameters are clamped to the browser API's accepted
//! ranges at construction so every implementor receives safe values.

use emovoice_core::VoiceParameters;

/// Accepted ranges of the browser speech synthesis API.
const RATE_MIN: f32 = 0.1;
const RATE_MAX: f32 = 10.0;
const PITCH_MIN: f32 = 0.0;
const PITCH_MAX: f32 = 2.0;
const VOLUME_MIN: f32 = 0.0;
const VOLUME_MAX: f32 = 1.0;

/// One locally speakable utterance with in-range parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    /// Build from a received configuration, clamping into browser ranges.
    /// The server's volume may exceed 1.0 (meaningful only to its own
    /// engine); locally it saturates at full volume.
    pub fn from_config(config: &VoiceParameters) -> Self {
        Self {
            text: config.text.clone(),
            rate: config.rate.clamp(RATE_MIN, RATE_MAX),
            pitch: config.pitch.clamp(PITCH_MIN, PITCH_MAX),
            volume: config.volume.clamp(VOLUME_MIN, VOLUME_MAX),
        }
    }
}

/// Implemented by the embedding client over its speech capability.
pub trait LocalSynthesizer {
    /// Begin speaking. Fire-and-forget; no completion signal is required.
    fn speak(&mut self, utterance: &Utterance);

    /// Stop any in-progress utterance.
    fn cancel(&mut self);
}

/// Speak an utterance, implicitly cancelling whatever is still playing.
pub fn dispatch<S: LocalSynthesizer + ?Sized>(synth: &mut S, utterance: &Utterance) {
    synth.cancel();
    synth.speak(utterance);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rate: f32, pitch: f32, volume: f32) -> VoiceParameters {
        VoiceParameters {
            text: "Hello!".to_string(),
            rate,
            pitch,
            volume,
            voice: "Microsoft David Desktop".to_string(),
            intensity: 3,
        }
    }

    #[test]
    fn in_range_parameters_pass_through() {
        let utterance = Utterance::from_config(&config(1.2, 1.3, 1.0));
        assert_eq!(utterance.rate, 1.2);
        assert_eq!(utterance.pitch, 1.3);
        assert_eq!(utterance.volume, 1.0);
    }

    #[test]
    fn out_of_range_parameters_are_clamped() {
        let utterance = Utterance::from_config(&config(0.0, 2.5, 1.4));
        assert_eq!(utterance.rate, 0.1);
        assert_eq!(utterance.pitch, 2.0);
        assert_eq!(utterance.volume, 1.0);
    }

    #[test]
    fn dispatch_cancels_before_speaking() {
        #[derive(Default)]
        struct Recorder(Vec<&'static str>);

        impl LocalSynthesizer for Recorder {
            fn speak(&mut self, _utterance: &Utterance) {
                self.0.push("speak");
            }
            fn cancel(&mut self) {
                self.0.push("cancel");
            }
        }

        let mut recorder = Recorder::default();
        dispatch(&mut recorder, &Utterance::from_config(&config(1.0, 1.0, 1.0)));
        assert_eq!(recorder.0, vec!["cancel", "speak"]);
    }
}
