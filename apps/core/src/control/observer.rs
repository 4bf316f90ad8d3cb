//! Host callback seam for response execution.

/// Callbacks the host UI receives while a response executes.
///
/// All methods default to no-ops so hosts implement only what they render.
/// `on_response_complete` is authoritative for "the system is done, even if
/// imperfectly"; `on_error` is diagnostic only and never a reason to re-block
/// the UI.
pub trait ResponseObserver: Send + Sync + 'static {
    /// The response text should appear in the chat transcript now.
    fn on_text_display(&self, _text: &str) {}

    /// Voice playback is starting.
    fn on_voice_start(&self) {}

    /// Voice playback finished normally.
    fn on_voice_end(&self) {}

    /// Execution finished (normally or forced). Fired exactly once.
    fn on_response_complete(&self) {}

    /// A sub-task failed. Informational; execution continues where it can.
    fn on_error(&self, _message: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ResponseObserver for NoopObserver {}
