//! Per-character response delivery profiles.
//!
//! A profile maps response categories to delivery channels and carries the
//! length thresholds and voice preference the classifier consults. Profiles
//! are plain validated config data: hosts can replace the whole registry from
//! JSON without touching the classifier.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use validator::Validate;

use crate::error::CoreError;

/// Delivery channel combination for one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    VoiceOnly,
    TextOnly,
    VoiceAndText,
}

impl ResponseType {
    pub fn label(&self) -> &'static str {
        match self {
            ResponseType::VoiceOnly => "voice_only",
            ResponseType::TextOnly => "text_only",
            ResponseType::VoiceAndText => "voice_and_text",
        }
    }

    pub fn includes_voice(&self) -> bool {
        matches!(self, ResponseType::VoiceOnly | ResponseType::VoiceAndText)
    }

    pub fn includes_text(&self) -> bool {
        matches!(self, ResponseType::TextOnly | ResponseType::VoiceAndText)
    }
}

/// Semantic category of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    Greeting,
    Acknowledgment,
    Explanation,
    Advice,
    Encouragement,
    Question,
    Goodbye,
    /// Fallback bucket when no category keywords match.
    Response,
}

impl ResponseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ResponseCategory::Greeting => "greeting",
            ResponseCategory::Acknowledgment => "acknowledgment",
            ResponseCategory::Explanation => "explanation",
            ResponseCategory::Advice => "advice",
            ResponseCategory::Encouragement => "encouragement",
            ResponseCategory::Question => "question",
            ResponseCategory::Goodbye => "goodbye",
            ResponseCategory::Response => "response",
        }
    }
}

/// Delivery priority attached to a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Delivery preferences for one character.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CharacterResponseProfile {
    /// How strongly this character leans on voice delivery, 0.0-1.0.
    #[validate(range(min = 0.0, max = 1.0))]
    pub voice_preference: f32,
    /// Category -> preferred channel table.
    pub category_channels: HashMap<ResponseCategory, ResponseType>,
    /// Responses at or under this many characters count as short.
    pub short_threshold: usize,
    /// Responses at or past this many characters count as long.
    pub long_threshold: usize,
}

impl CharacterResponseProfile {
    fn standard_channels() -> HashMap<ResponseCategory, ResponseType> {
        HashMap::from([
            (ResponseCategory::Greeting, ResponseType::VoiceOnly),
            (ResponseCategory::Acknowledgment, ResponseType::VoiceOnly),
            (ResponseCategory::Explanation, ResponseType::TextOnly),
            (ResponseCategory::Advice, ResponseType::VoiceAndText),
            (ResponseCategory::Encouragement, ResponseType::VoiceAndText),
            (ResponseCategory::Question, ResponseType::VoiceAndText),
            (ResponseCategory::Goodbye, ResponseType::VoiceOnly),
            (ResponseCategory::Response, ResponseType::VoiceAndText),
        ])
    }

    /// Profile used for character ids with no registered entry.
    pub fn fallback() -> Self {
        Self {
            voice_preference: 0.8,
            category_channels: Self::standard_channels(),
            short_threshold: 30,
            long_threshold: 120,
        }
    }

    fn akari() -> Self {
        let mut channels = Self::standard_channels();
        channels.insert(ResponseCategory::Encouragement, ResponseType::VoiceOnly);
        channels.insert(ResponseCategory::Explanation, ResponseType::VoiceAndText);
        Self {
            voice_preference: 0.9,
            category_channels: channels,
            short_threshold: 40,
            long_threshold: 140,
        }
    }

    fn minato() -> Self {
        Self {
            voice_preference: 0.7,
            category_channels: Self::standard_channels(),
            short_threshold: 30,
            long_threshold: 120,
        }
    }

    /// Preferred channel for a category, falling back on the voice-preference
    /// scalar when the table has no entry.
    pub fn channel_for(&self, category: ResponseCategory) -> ResponseType {
        if let Some(channel) = self.category_channels.get(&category) {
            *channel
        } else if self.voice_preference >= 0.75 {
            ResponseType::VoiceAndText
        } else {
            ResponseType::TextOnly
        }
    }
}

/// All known character profiles plus the fallback.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<String, CharacterResponseProfile>,
    fallback: CharacterResponseProfile,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        let profiles = HashMap::from([
            ("akari".to_string(), CharacterResponseProfile::akari()),
            ("minato".to_string(), CharacterResponseProfile::minato()),
        ]);
        Self {
            profiles,
            fallback: CharacterResponseProfile::fallback(),
        }
    }
}

impl ProfileRegistry {
    /// Profile for a character id; unknown ids get the fallback profile.
    pub fn get(&self, character_id: &str) -> &CharacterResponseProfile {
        self.profiles.get(character_id).unwrap_or_else(|| {
            warn!("no profile for character '{}', using fallback", character_id);
            &self.fallback
        })
    }

    /// Replace the registry from JSON, validating each profile.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let profiles: HashMap<String, CharacterResponseProfile> = serde_json::from_str(json)?;
        for (id, profile) in &profiles {
            profile
                .validate()
                .map_err(|e| CoreError::Config(format!("profile '{}': {}", id, e)))?;
        }
        Ok(Self {
            profiles,
            fallback: CharacterResponseProfile::fallback(),
        })
    }
}
