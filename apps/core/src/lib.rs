//! # NutriRoom Core - Response Brain
//!
//! The response-shaping decision pipeline behind the NutriRoom nutrition
//! coach: analyzes the user's message, picks a response length/style, decides
//! the delivery channels, and executes voice/text delivery with delays,
//! timeouts, fallback, and a watchdog.
//!
//! ## Components
//! - `brain`: keyword analysis of the raw user message
//! - `mode`: length/style selection and instruction rendering
//! - `pattern`: per-character channel/pattern classification
//! - `control`: execution planning and the delivery state machine
//! - `voice` / `session`: clip selection and session greeting state
//!
//! External collaborators (audio playback, the host UI) are consumed through
//! the `VoiceChannel` and `ResponseObserver` traits; nothing in this crate
//! performs I/O of its own.

pub mod brain;
pub mod control;
pub mod error;
pub mod mode;
pub mod models;
pub mod pattern;
pub mod session;
pub mod telemetry;
pub mod voice;

#[cfg(test)]
mod tests;

pub use brain::{Complexity, Emotion, Lexicon, MessageAnalysis, MessageAnalyzer};
pub use control::{
    NoopObserver, ResponseContent, ResponseControlResult, ResponseController,
    ResponseExecutionState, ResponseExecutor, ResponseObserver, ResponseTiming, VoiceChannel,
};
pub use error::CoreError;
pub use mode::{ModeSelector, ResponseLengthConfig, ResponseMode, ResponseStyle};
pub use models::{
    ConversationContext, ResponseContextHint, ResponseControlRequest, TimeSlot, Urgency,
};
pub use pattern::{
    CharacterResponseProfile, PatternClassifier, Priority, ProfileRegistry, ResponseCategory,
    ResponsePattern, ResponseType,
};
pub use session::GreetingLedger;
pub use voice::VoiceDescriptor;

/// Analyze one raw user message with the built-in lexicon.
pub fn analyze_user_message(message: &str) -> MessageAnalysis {
    MessageAnalyzer::new().analyze(message)
}

/// Pick the length/style preset for a response.
pub fn determine_response_mode(
    analysis: &MessageAnalysis,
    context: &ConversationContext,
) -> ResponseLengthConfig {
    ModeSelector::new().select(analysis, context)
}

/// Render the directive block steering the external text generator.
pub fn generate_response_instruction(
    config: &ResponseLengthConfig,
    character_id: &str,
    analysis: &MessageAnalysis,
) -> String {
    mode::instruction::generate_instruction(config, character_id, analysis)
}

/// Build an execution plan with a throwaway controller.
///
/// Session-scoped behavior (the greeting ledger) starts fresh on every call;
/// hosts that keep a session alive should hold a [`ResponseController`]
/// instead.
pub fn control_chat_response(request: ResponseControlRequest) -> ResponseControlResult {
    ResponseController::new().control(request)
}
