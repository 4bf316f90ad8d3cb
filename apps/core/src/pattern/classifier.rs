//! Channel/pattern classification of a generated response.
//!
//! Weighted keyword groups over the response text decide the category; the
//! character's profile (plus length thresholds and host hints) decides the
//! delivery channel. Any internal failure degrades to a low-confidence
//! default pattern - the classifier never propagates an error to its caller.

use tracing::{debug, warn};

use crate::brain::analysis::Emotion;
use crate::error::CoreError;
use crate::models::{ResponseControlRequest, Urgency};
use crate::pattern::profile::{Priority, ProfileRegistry, ResponseCategory, ResponseType};

use serde::{Deserialize, Serialize};

/// Classification outcome for one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsePattern {
    pub response_type: ResponseType,
    pub category: ResponseCategory,
    pub priority: Priority,
    /// Heuristic confidence in [0, 1].
    pub confidence: f32,
    /// Human-readable account of the decision, for logs.
    pub reason: String,
}

/// Keyword tables per category, with a weight expressing how decisive a hit
/// is. These match against the COACH's generated text, so the vocabulary is
/// the coaching register, not the user's.
const CATEGORY_TABLES: &[(ResponseCategory, &[&str], f32)] = &[
    (
        ResponseCategory::Greeting,
        &[
            "おはよう",
            "こんにちは",
            "こんばんは",
            "はじめまして",
            "ようこそ",
            "今日もよろしく",
        ],
        1.0,
    ),
    (
        ResponseCategory::Goodbye,
        &["またね", "おやすみ", "さようなら", "また明日", "お疲れさま"],
        1.0,
    ),
    (
        ResponseCategory::Encouragement,
        &[
            "頑張",
            "がんば",
            "応援",
            "大丈夫",
            "できるよ",
            "えらい",
            "偉い",
            "素晴らしい",
            "すごい",
        ],
        0.9,
    ),
    (
        ResponseCategory::Advice,
        &[
            "おすすめ",
            "しましょう",
            "するといい",
            "心がけ",
            "取り入れ",
            "目安",
            "意識して",
        ],
        0.8,
    ),
    (
        ResponseCategory::Explanation,
        &["なぜなら", "つまり", "理由は", "ポイントは", "仕組み", "というのは"],
        0.75,
    ),
    (
        ResponseCategory::Acknowledgment,
        &["なるほど", "そうなんですね", "わかりました", "いいですね", "了解"],
        0.7,
    ),
];

/// Fixed score for a trailing question mark when no keyword group wins.
const QUESTION_SCORE: f32 = 0.65;

/// Classifier over a profile registry.
pub struct PatternClassifier {
    profiles: ProfileRegistry,
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternClassifier {
    pub fn new() -> Self {
        Self {
            profiles: ProfileRegistry::default(),
        }
    }

    pub fn with_registry(profiles: ProfileRegistry) -> Self {
        Self { profiles }
    }

    /// Classify a response. Never fails: internal errors produce the
    /// best-effort default pattern instead.
    pub fn classify(&self, request: &ResponseControlRequest) -> ResponsePattern {
        match self.classify_inner(request) {
            Ok(pattern) => {
                debug!(
                    "classified response: category={} type={} confidence={:.2} ({})",
                    pattern.category.label(),
                    pattern.response_type.label(),
                    pattern.confidence,
                    pattern.reason
                );
                pattern
            }
            Err(e) => {
                warn!("classification failed, using default pattern: {}", e);
                Self::default_pattern(format!("classification fallback: {}", e))
            }
        }
    }

    /// The low-confidence pattern used when classification itself fails.
    pub fn default_pattern(reason: String) -> ResponsePattern {
        ResponsePattern {
            response_type: ResponseType::VoiceAndText,
            category: ResponseCategory::Response,
            priority: Priority::Low,
            confidence: 0.2,
            reason,
        }
    }

    fn classify_inner(
        &self,
        request: &ResponseControlRequest,
    ) -> Result<ResponsePattern, CoreError> {
        let text = request.response_text.trim();
        if text.is_empty() {
            // Contract: callers must skip all downstream execution for this.
            return Ok(ResponsePattern {
                response_type: ResponseType::TextOnly,
                category: ResponseCategory::Response,
                priority: Priority::Low,
                confidence: 0.0,
                reason: "empty response text".to_string(),
            });
        }

        let profile = self.profiles.get(&request.character_id);
        let (category, confidence, mut reason) = Self::detect_category(text);

        let mut response_type = profile.channel_for(category);
        let char_count = text.chars().count();

        // Length thresholds override the category table
        if char_count >= profile.long_threshold && response_type == ResponseType::VoiceOnly {
            response_type = ResponseType::VoiceAndText;
            reason.push_str("; long text needs the text channel");
        } else if char_count <= profile.short_threshold
            && response_type == ResponseType::VoiceAndText
            && profile.voice_preference >= 0.85
        {
            response_type = ResponseType::VoiceOnly;
            reason.push_str("; short text, voice-leaning character");
        }

        let mut priority = match category {
            ResponseCategory::Encouragement => Priority::High,
            ResponseCategory::Response => Priority::Low,
            _ => Priority::Medium,
        };

        // Host-hint special cases: excitement, concern, urgency
        if let Some(hint) = &request.context {
            match hint.emotion {
                Some(Emotion::Positive) if text.contains('！') || text.contains('!') => {
                    response_type = ResponseType::VoiceAndText;
                    priority = priority.max(Priority::High);
                    reason.push_str("; excitement override");
                }
                Some(Emotion::Negative) => {
                    response_type = ResponseType::VoiceAndText;
                    priority = priority.max(Priority::High);
                    reason.push_str("; concern override");
                }
                _ => {}
            }
            match hint.urgency {
                Some(Urgency::High) => {
                    priority = Priority::Critical;
                    reason.push_str("; urgent");
                }
                Some(Urgency::Low) => priority = Priority::Low,
                _ => {}
            }
        }

        Ok(ResponsePattern {
            response_type,
            category,
            priority,
            confidence,
            reason,
        })
    }

    /// Best-scoring category over the keyword tables; a trailing question
    /// mark competes as its own candidate.
    fn detect_category(text: &str) -> (ResponseCategory, f32, String) {
        let mut best = (ResponseCategory::Response, 0.0_f32, String::new());

        for (category, words, weight) in CATEGORY_TABLES {
            let hits = words.iter().filter(|w| text.contains(*w)).count();
            if hits == 0 {
                continue;
            }
            let score = (weight * (0.6 + 0.2 * hits as f32)).min(*weight);
            if score > best.1 {
                best = (
                    *category,
                    score,
                    format!("matched {} keywords", category.label()),
                );
            }
        }

        if (text.ends_with('？') || text.ends_with('?')) && QUESTION_SCORE > best.1 {
            best = (
                ResponseCategory::Question,
                QUESTION_SCORE,
                "trailing question mark".to_string(),
            );
        }

        if best.1 == 0.0 {
            return (
                ResponseCategory::Response,
                0.3,
                "no category keywords matched".to_string(),
            );
        }

        (best.0, best.1.min(1.0), best.2)
    }
}
