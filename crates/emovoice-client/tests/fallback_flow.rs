//! End-to-end fallback flow: a controller driven by a simulated server.
//!
//! The "server" here is the real resolver plus hand-built frames, so these
//! tests exercise the exact event sequence a gateway produces without a
//! network in the way.

use emovoice_client::{ControllerEvent, FallbackController, LocalSynthesizer, Utterance};
use emovoice_core::{
    resolve, Emotion, GenerationRequest, GenerationResult, Intensity, ServerMessage,
};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Default)]
struct RecordingSynth {
    spoken: Vec<Utterance>,
    cancels: usize,
}

impl LocalSynthesizer for RecordingSynth {
    fn speak(&mut self, utterance: &Utterance) {
        self.spoken.push(utterance.clone());
    }
    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

/// Answer a `SendRequest` the way the gateway would: config frame, then a
/// successful terminal frame.
fn server_frames(request: &GenerationRequest) -> (ServerMessage, ServerMessage) {
    let emotion: Emotion = request.emotion.parse().unwrap();
    let params = resolve(&request.text, emotion, Intensity::from_request(request.intensity));
    let result = GenerationResult {
        success: true,
        emotion: request.emotion.clone(),
        intensity: params.intensity,
        original_text: request.text.clone(),
        modified_text: params.text.clone(),
    };
    (
        ServerMessage::VoiceConfig(params),
        ServerMessage::VoiceGenerated(result),
    )
}

fn drain(rx: &mut UnboundedReceiver<ControllerEvent>) -> Vec<ControllerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn disabled_server_tts_ends_in_local_speech() {
    let (mut controller, mut rx) = FallbackController::new(true);
    controller.on_connected();
    controller.submit("What a surprise", Emotion::Shock, Some(4));

    let request = drain(&mut rx)
        .into_iter()
        .find_map(|event| match event {
            ControllerEvent::SendRequest(request) => Some(request),
            _ => None,
        })
        .expect("controller must hand the request to the transport");

    let (config, generated) = server_frames(&request);
    controller.on_server_event(config);
    controller.on_server_event(generated);

    let mut synth = RecordingSynth::default();
    for event in drain(&mut rx) {
        if let ControllerEvent::SpeakLocally(utterance) = event {
            emovoice_client::dispatch(&mut synth, &utterance);
        }
    }

    assert_eq!(synth.spoken.len(), 1);
    assert_eq!(synth.cancels, 1, "a new utterance cancels any prior one");
    let spoken = &synth.spoken[0];
    assert_eq!(spoken.text, "Oh my! What a surprise! Wow!");
    // Shock level 4 resolves rate 2.0 / pitch 1.8 / volume 1.3; volume
    // saturates at the browser maximum.
    assert_eq!(spoken.rate, 2.0);
    assert_eq!(spoken.pitch, 1.8);
    assert_eq!(spoken.volume, 1.0);
    assert!(!controller.is_processing());
}

#[test]
fn enabled_server_tts_never_reaches_the_synthesizer() {
    let (mut controller, mut rx) = FallbackController::new(false);
    controller.on_connected();
    controller.submit("Hello world", Emotion::Happy, Some(3));

    let request = drain(&mut rx)
        .into_iter()
        .find_map(|event| match event {
            ControllerEvent::SendRequest(request) => Some(request),
            _ => None,
        })
        .expect("controller must hand the request to the transport");

    let (config, generated) = server_frames(&request);
    controller.on_server_event(config);
    controller.on_server_event(generated);

    let locally_spoken = drain(&mut rx)
        .into_iter()
        .any(|event| matches!(event, ControllerEvent::SpeakLocally(_)));
    assert!(!locally_spoken, "server-side audio needs no local fallback");
    assert!(!controller.is_processing());
}

#[test]
fn single_flight_holds_across_a_full_cycle() {
    let (mut controller, mut rx) = FallbackController::new(false);
    controller.on_connected();

    controller.submit("First", Emotion::Thoughtful, None);
    let first_request = drain(&mut rx)
        .into_iter()
        .find_map(|event| match event {
            ControllerEvent::SendRequest(request) => Some(request),
            _ => None,
        })
        .expect("first submit must go out");

    // A second submit mid-flight stays local.
    controller.submit("Second", Emotion::Angry, None);
    let second_sent = drain(&mut rx)
        .into_iter()
        .any(|event| matches!(event, ControllerEvent::SendRequest(_)));
    assert!(!second_sent);

    // After the cycle completes, submission works again.
    let (config, generated) = server_frames(&first_request);
    controller.on_server_event(config);
    controller.on_server_event(generated);
    drain(&mut rx);

    controller.submit("Second", Emotion::Angry, None);
    let second_sent = drain(&mut rx)
        .into_iter()
        .any(|event| matches!(event, ControllerEvent::SendRequest(_)));
    assert!(second_sent);
}
