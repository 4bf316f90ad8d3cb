//! Analysis packet produced for each incoming user message.
//!
//! Immutable once produced; consumed by the mode selector, the response
//! controller, and debug logging.

use serde::{Deserialize, Serialize};

/// Detected emotional tone of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Positive,
    Negative,
    Neutral,
    Confused,
}

impl Emotion {
    /// Stable label used in voice file stems and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Positive => "positive",
            Emotion::Negative => "negative",
            Emotion::Neutral => "neutral",
            Emotion::Confused => "confused",
        }
    }
}

/// Two-valued complexity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Complex,
}

/// Everything the analyzer extracted from one raw user message.
///
/// Same input always yields a structurally equal packet: the analyzer is a
/// pure function of the message text and its lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAnalysis {
    /// Detected emotional tone.
    pub emotion: Emotion,
    /// Nutrition topics touched, first-appearance order, deduplicated.
    pub topics: Vec<String>,
    /// The user seems new to the app (introduction phrasing).
    pub is_first_time: bool,
    /// Emotional support should come before advice.
    pub needs_support: bool,
    /// The user is pushing back against the coaching.
    pub is_resistant: bool,
    /// The user explicitly asked for a detailed answer.
    pub requests_details: bool,
    /// The message is a question.
    pub is_question: bool,
    /// Complexity tier driving the medium-length preset.
    pub complexity: Complexity,
    /// All matched lexicon words, first-appearance order.
    pub keywords: Vec<String>,
}

impl MessageAnalysis {
    /// The default packet for empty or unmatched input.
    pub fn neutral() -> Self {
        Self {
            emotion: Emotion::Neutral,
            topics: vec![],
            is_first_time: false,
            needs_support: false,
            is_resistant: false,
            requests_details: false,
            is_question: false,
            complexity: Complexity::Simple,
            keywords: vec![],
        }
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "emotion={} topics={} question={} details={} complexity={:?}",
            self.emotion.label(),
            self.topics.len(),
            self.is_question,
            self.requests_details,
            self.complexity,
        )
    }
}
