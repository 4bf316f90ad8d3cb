//! Response length/style selection.
//!
//! Three fixed presets behind a priority rule. The rule is mutually exclusive
//! and exhaustive: every (analysis, context) pair lands in exactly one branch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::brain::analysis::{Complexity, MessageAnalysis};
use crate::models::ConversationContext;

/// Length bucket for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    Short,
    Detailed,
}

/// Writing style for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    /// One-or-two-line chat bubble.
    Line,
    Formal,
    Casual,
}

/// Length and style configuration handed to the instruction renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseLengthConfig {
    pub mode: ResponseMode,
    /// Target length in characters.
    pub target_length: u32,
    /// Hard cap in characters. Always >= `target_length`.
    pub max_length: u32,
    pub style: ResponseStyle,
}

impl ResponseLengthConfig {
    fn new(mode: ResponseMode, target_length: u32, max_length: u32, style: ResponseStyle) -> Self {
        debug_assert!(target_length <= max_length);
        Self {
            mode,
            target_length,
            max_length,
            style,
        }
    }

    /// Long, concrete answer for explicit detail requests.
    pub fn detailed_preset() -> Self {
        Self::new(ResponseMode::Detailed, 200, 300, ResponseStyle::Casual)
    }

    /// Medium answer for complex questions. The mode axis stays `Short`; only
    /// the length budget grows.
    pub fn medium_preset() -> Self {
        Self::new(ResponseMode::Short, 80, 120, ResponseStyle::Line)
    }

    /// Default chat-bubble answer.
    pub fn short_preset() -> Self {
        Self::new(ResponseMode::Short, 60, 100, ResponseStyle::Line)
    }
}

/// Stateless selector applying the priority rule.
#[derive(Debug, Default)]
pub struct ModeSelector;

impl ModeSelector {
    pub fn new() -> Self {
        Self
    }

    /// Pick the length/style preset for one response.
    ///
    /// Priority order:
    /// 1. explicit detail request (message or conversation) -> detailed
    /// 2. complex question -> medium
    /// 3. everything else -> short
    pub fn select(
        &self,
        analysis: &MessageAnalysis,
        context: &ConversationContext,
    ) -> ResponseLengthConfig {
        let config = if analysis.requests_details || context.user_requested_details {
            ResponseLengthConfig::detailed_preset()
        } else if analysis.is_question && analysis.complexity == Complexity::Complex {
            ResponseLengthConfig::medium_preset()
        } else {
            ResponseLengthConfig::short_preset()
        };

        debug!(
            "selected mode {:?} target={} max={} ({})",
            config.mode,
            config.target_length,
            config.max_length,
            analysis.summary()
        );
        config
    }
}
