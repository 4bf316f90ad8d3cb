//! Response control planning.
//!
//! Turns one classified response into the full execution plan the executor
//! consumes: required channels, delivery timing, the voice descriptor, and the
//! ordered fallback channel list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::brain::analysis::Emotion;
use crate::models::{ResponseControlRequest, TimeSlot, Urgency};
use crate::pattern::classifier::{PatternClassifier, ResponsePattern};
use crate::pattern::profile::{Priority, ResponseCategory, ResponseType};
use crate::session::GreetingLedger;
use crate::voice::{select_voice, VoiceDescriptor};

/// What must actually be delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseContent {
    /// The response text. Present for every non-noop plan; displayed only
    /// when `text_required`, but kept around so a failed voice channel can
    /// degrade to text delivery.
    pub text: Option<String>,
    pub voice_required: bool,
    pub text_required: bool,
    pub urgency: Urgency,
}

/// Delivery timing plan, all in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTiming {
    pub voice_delay_ms: u64,
    pub text_delay_ms: u64,
    /// Rough clip length estimate, present iff voice is required.
    pub voice_duration_estimate_ms: Option<u64>,
}

/// One response's complete execution plan. Constructed once, consumed by the
/// executor, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseControlResult {
    /// Correlation id threaded through tracing spans.
    pub response_id: Uuid,
    pub pattern: ResponsePattern,
    pub content: ResponseContent,
    pub timing: ResponseTiming,
    /// Clip to play, present iff voice is required.
    pub voice: Option<VoiceDescriptor>,
    /// Channel alternatives to try if the primary channel fails, in order.
    pub fallbacks: Vec<ResponseType>,
}

impl ResponseControlResult {
    /// True when there is nothing to execute (empty-text short circuit).
    pub fn is_noop(&self) -> bool {
        !self.content.voice_required && !self.content.text_required
    }
}

/// Session-scoped response controller: classification plus planning.
///
/// One controller per chat session - it owns the session's greeting ledger.
pub struct ResponseController {
    classifier: PatternClassifier,
    greetings: GreetingLedger,
}

impl Default for ResponseController {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseController {
    pub fn new() -> Self {
        Self {
            classifier: PatternClassifier::new(),
            greetings: GreetingLedger::new(),
        }
    }

    pub fn with_classifier(classifier: PatternClassifier) -> Self {
        Self {
            classifier,
            greetings: GreetingLedger::new(),
        }
    }

    /// Build the execution plan for one response.
    #[instrument(skip(self, request), fields(character_id = %request.character_id))]
    pub fn control(&mut self, request: ResponseControlRequest) -> ResponseControlResult {
        let response_id = Uuid::new_v4();

        if request.response_text.trim().is_empty() {
            info!("empty response text, producing no-op plan");
            return Self::noop_result(response_id);
        }

        let mut pattern = self.classifier.classify(&request);

        // A character greets once per session; repeats become a quiet
        // text acknowledgment.
        if pattern.category == ResponseCategory::Greeting {
            if self.greetings.has_greeted(&request.character_id) {
                pattern.response_type = ResponseType::TextOnly;
                pattern.category = ResponseCategory::Acknowledgment;
                pattern
                    .reason
                    .push_str("; greeting already played this session");
            } else {
                self.greetings.mark_greeted(&request.character_id);
            }
        }

        let hint = request.context.clone().unwrap_or_default();
        let emotion = hint.emotion.unwrap_or(Emotion::Neutral);
        let time_slot = hint.time_slot.unwrap_or_else(TimeSlot::current);

        let voice_required = pattern.response_type.includes_voice();
        let text_required = pattern.response_type.includes_text();

        let voice = voice_required.then(|| {
            select_voice(&request.character_id, pattern.category, emotion, time_slot)
        });

        let urgency = hint.urgency.unwrap_or(match pattern.priority {
            Priority::Critical | Priority::High => Urgency::High,
            Priority::Medium => Urgency::Normal,
            Priority::Low => Urgency::Low,
        });

        let timing = Self::plan_timing(&pattern, &request.response_text, voice_required);
        let fallbacks = Self::fallback_chain(pattern.response_type);

        debug!(
            "planned response {}: type={} voice_delay={}ms text_delay={}ms",
            response_id,
            pattern.response_type.label(),
            timing.voice_delay_ms,
            timing.text_delay_ms
        );

        ResponseControlResult {
            response_id,
            pattern,
            content: ResponseContent {
                text: Some(request.response_text.clone()),
                voice_required,
                text_required,
                urgency,
            },
            timing,
            voice,
            fallbacks,
        }
    }

    /// Forget session greeting state (host started a new session).
    pub fn reset_session(&mut self) {
        self.greetings.reset();
    }

    fn noop_result(response_id: Uuid) -> ResponseControlResult {
        ResponseControlResult {
            response_id,
            pattern: PatternClassifier::default_pattern("empty response text".to_string()),
            content: ResponseContent {
                text: None,
                voice_required: false,
                text_required: false,
                urgency: Urgency::Low,
            },
            timing: ResponseTiming {
                voice_delay_ms: 0,
                text_delay_ms: 0,
                voice_duration_estimate_ms: None,
            },
            voice: None,
            fallbacks: vec![],
        }
    }

    fn plan_timing(
        pattern: &ResponsePattern,
        response_text: &str,
        voice_required: bool,
    ) -> ResponseTiming {
        let voice_delay_ms = match pattern.priority {
            Priority::Critical => 0,
            Priority::High => 100,
            Priority::Medium => 300,
            Priority::Low => 500,
        };

        // Text trails voice slightly when both channels run, so the bubble
        // appears as the voice starts speaking.
        let text_delay_ms = if pattern.response_type == ResponseType::VoiceAndText {
            voice_delay_ms + 400
        } else {
            0
        };

        let voice_duration_estimate_ms = voice_required.then(|| {
            let chars = response_text.chars().count() as u64;
            (chars * 110).clamp(1200, 8000)
        });

        ResponseTiming {
            voice_delay_ms,
            text_delay_ms,
            voice_duration_estimate_ms,
        }
    }

    fn fallback_chain(primary: ResponseType) -> Vec<ResponseType> {
        match primary {
            ResponseType::VoiceAndText => vec![ResponseType::TextOnly],
            ResponseType::VoiceOnly => vec![ResponseType::VoiceAndText, ResponseType::TextOnly],
            ResponseType::TextOnly => vec![],
        }
    }
}
