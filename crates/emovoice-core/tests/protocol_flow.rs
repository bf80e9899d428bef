//! Protocol-level tests: the wire frames a deployed client actually exchanges.

use emovoice_core::{
    resolve, ClientMessage, Emotion, GenerationResult, Intensity, ServerMessage,
};

#[test]
fn documented_happy_round_trip() {
    let frame = r#"{"type":"generate_voice","text":"Hello world","emotion":"happy","intensity":3}"#;
    let ClientMessage::GenerateVoice(request) = serde_json::from_str(frame).unwrap() else {
        panic!("expected generate_voice frame");
    };

    let emotion: Emotion = request.emotion.parse().unwrap();
    let params = resolve(&request.text, emotion, Intensity::from_request(request.intensity));
    assert_eq!(params.text, "Hello world!");
    assert_eq!(params.rate, 1.2);
    assert_eq!(params.pitch, 1.3);
    assert_eq!(params.volume, 1.0);

    let config_frame = serde_json::to_value(ServerMessage::VoiceConfig(params.clone())).unwrap();
    assert_eq!(config_frame["type"], "voice_config");
    assert_eq!(config_frame["text"], "Hello world!");
    assert_eq!(config_frame["voice"], "Microsoft David Desktop");

    let result = GenerationResult {
        success: true,
        emotion: emotion.key().to_string(),
        intensity: params.intensity,
        original_text: request.text,
        modified_text: params.text,
    };
    let result_frame = serde_json::to_value(ServerMessage::VoiceGenerated(result)).unwrap();
    assert_eq!(result_frame["type"], "voice_generated");
    assert_eq!(result_frame["originalText"], "Hello world");
    assert_eq!(result_frame["modifiedText"], "Hello world!");
}

#[test]
fn a_client_can_parse_every_server_frame_it_may_receive() {
    let frames = [
        r#"{"type":"voice_config","text":"Hi!","rate":1.2,"pitch":1.3,"volume":1.0,"voice":"Microsoft David Desktop","intensity":3}"#,
        r#"{"type":"voice_generated","success":true,"emotion":"happy","intensity":3,"originalText":"Hi","modifiedText":"Hi!"}"#,
        r#"{"type":"error","message":"Failed to generate voice"}"#,
    ];
    for frame in frames {
        let parsed: ServerMessage = serde_json::from_str(frame).unwrap();
        match parsed {
            ServerMessage::VoiceConfig(config) => assert_eq!(config.text, "Hi!"),
            ServerMessage::VoiceGenerated(result) => assert!(result.success),
            ServerMessage::Error { message } => assert!(message.contains("Failed")),
        }
    }
}

#[test]
fn error_frame_carries_the_exact_validation_message() {
    let frame = serde_json::to_value(ServerMessage::Error {
        message: emovoice_core::VALIDATION_ERROR.to_string(),
    })
    .unwrap();
    assert_eq!(frame["message"], "Text and emotion are required");
}
