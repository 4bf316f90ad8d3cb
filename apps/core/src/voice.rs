//! Voice file selection.
//!
//! Builds the descriptor the audio collaborator resolves to an actual clip:
//! a file stem assembled from character, category, emotion, and time slot,
//! plus a default-emotion fallback stem. The fallback intentionally ignores
//! the time slot so a missing slot-specific clip degrades to the character's
//! plain voice.

use serde::{Deserialize, Serialize};

use crate::brain::analysis::Emotion;
use crate::models::TimeSlot;
use crate::pattern::profile::ResponseCategory;

/// What the audio channel should play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    pub character_id: String,
    pub emotion: Emotion,
    pub time_slot: TimeSlot,
    /// Vendor-agnostic clip identifier, e.g. `"akari_greeting_morning"`.
    pub file_stem: String,
}

impl VoiceDescriptor {
    /// The one-shot fallback descriptor: the character's default-emotion
    /// clip, independent of time slot.
    pub fn fallback(&self) -> VoiceDescriptor {
        VoiceDescriptor {
            character_id: self.character_id.clone(),
            emotion: Emotion::Neutral,
            time_slot: self.time_slot,
            file_stem: format!("{}_normal", self.character_id),
        }
    }
}

/// Select the clip for a response.
///
/// Greetings and goodbyes get slot-specific clips; everything else keys on
/// the emotion the response should be voiced with.
pub fn select_voice(
    character_id: &str,
    category: ResponseCategory,
    emotion: Emotion,
    time_slot: TimeSlot,
) -> VoiceDescriptor {
    let file_stem = match category {
        ResponseCategory::Greeting => {
            format!("{}_greeting_{}", character_id, time_slot.label())
        }
        ResponseCategory::Goodbye => {
            format!("{}_goodbye_{}", character_id, time_slot.label())
        }
        _ => format!("{}_{}", character_id, emotion.label()),
    };

    VoiceDescriptor {
        character_id: character_id.to_string(),
        emotion,
        time_slot,
        file_stem,
    }
}
