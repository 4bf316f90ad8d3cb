use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::brain::analysis::Emotion;

/// Conversation state owned by the surrounding chat session.
///
/// The core reads this but never mutates it; the host keeps it up to date as
/// the conversation progresses.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConversationContext {
    /// Number of user messages exchanged so far in this session.
    pub message_count: u32,
    /// Recent user messages, most-recent-last.
    #[serde(default)]
    pub last_messages: Vec<String>,
    /// Whether the user asked for details earlier in the conversation.
    #[serde(default)]
    pub user_requested_details: bool,
    /// The topic the conversation is currently centered on, if any.
    #[serde(default)]
    pub current_topic: Option<String>,
    /// Coach/user relationship level. Grows slowly over sessions.
    #[validate(range(min = 0, max = 3))]
    #[serde(default)]
    pub relationship_level: u8,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self {
            message_count: 0,
            last_messages: vec![],
            user_requested_details: false,
            current_topic: None,
            relationship_level: 0,
        }
    }
}

impl ConversationContext {
    /// Records one more user message, keeping at most the last five around.
    pub fn push_message(&mut self, message: impl Into<String>) {
        self.message_count += 1;
        self.last_messages.push(message.into());
        if self.last_messages.len() > 5 {
            self.last_messages.remove(0);
        }
    }
}

/// Coarse time-of-day bucket used for voice file selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    /// Buckets an hour of day (0-23) into a slot.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=10 => TimeSlot::Morning,
            11..=16 => TimeSlot::Afternoon,
            17..=21 => TimeSlot::Evening,
            _ => TimeSlot::Night,
        }
    }

    /// The slot for the host's local clock right now.
    pub fn current() -> Self {
        use chrono::Timelike;
        Self::from_hour(chrono::Local::now().hour())
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::Night => "night",
        }
    }
}

/// How urgently a response should reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Normal,
    High,
}

/// Optional hints the host can attach to a response-control request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseContextHint {
    /// Host-observed urgency (e.g. the user is about to close the app).
    #[serde(default)]
    pub urgency: Option<Urgency>,
    /// Emotion the response should be voiced with.
    #[serde(default)]
    pub emotion: Option<Emotion>,
    /// Time slot override; defaults to the local clock when absent.
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
}

/// A request to shape and deliver one generated response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseControlRequest {
    /// Which persona is speaking (e.g. `"akari"`, `"minato"`).
    pub character_id: String,
    /// The generated response text to deliver.
    pub response_text: String,
    /// The user message this response answers.
    pub user_message: String,
    /// Recent conversation lines, most-recent-last.
    #[serde(default)]
    pub conversation_history: Vec<String>,
    /// Optional delivery hints.
    #[serde(default)]
    pub context: Option<ResponseContextHint>,
}
