//! Channel classification and profile behavior.

use crate::pattern::classifier::PatternClassifier;
use crate::pattern::profile::{ProfileRegistry, ResponseCategory, ResponseType};
use crate::{control_chat_response, ResponseControlRequest};

fn request(character_id: &str, response_text: &str) -> ResponseControlRequest {
    ResponseControlRequest {
        character_id: character_id.to_string(),
        response_text: response_text.to_string(),
        user_message: String::new(),
        conversation_history: vec![],
        context: None,
    }
}

#[test]
fn test_default_pattern_shape() {
    let pattern = PatternClassifier::default_pattern("test".to_string());
    assert_eq!(pattern.category, ResponseCategory::Response);
    assert_eq!(pattern.response_type, ResponseType::VoiceAndText);
    assert!(pattern.confidence < 0.5);
}

#[test]
fn test_empty_text_control_result_is_noop() {
    let result = control_chat_response(request("akari", ""));
    assert!(result.is_noop());
    assert!(result.content.text.is_none());
    assert!(result.voice.is_none());
}

#[test]
fn test_whitespace_text_control_result_is_noop() {
    let result = control_chat_response(request("minato", " \n\t "));
    assert!(result.is_noop());
}

#[test]
fn test_greeting_routes_through_voice() {
    let result = control_chat_response(request("akari", "おはよう！今日もよろしくね"));
    assert_eq!(result.pattern.category, ResponseCategory::Greeting);
    assert!(result.content.voice_required);
    assert!(result.voice.is_some());
}

#[test]
fn test_custom_registry_changes_channels() {
    let json = r#"{
        "quiet": {
            "voice_preference": 0.1,
            "category_channels": {
                "greeting": "text_only",
                "advice": "text_only"
            },
            "short_threshold": 30,
            "long_threshold": 120
        }
    }"#;
    let registry = ProfileRegistry::from_json(json).unwrap();
    let classifier = PatternClassifier::with_registry(registry);
    let pattern = classifier.classify(&request("quiet", "おはよう"));
    assert_eq!(pattern.response_type, ResponseType::TextOnly);
}

#[test]
fn test_classification_never_panics_on_odd_input() {
    let classifier = PatternClassifier::new();
    let long = "長".repeat(5000);
    for text in ["", "！？", "🥦🥦🥦", "a", long.as_str()] {
        let pattern = classifier.classify(&request("akari", text));
        assert!((0.0..=1.0).contains(&pattern.confidence));
    }
}
