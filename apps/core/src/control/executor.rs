//! Response execution.
//!
//! Drives one planned response through its delivery channels: voice and text
//! run concurrently with independent delays, the playback call is bounded by
//! its own timeout with a single fallback attempt, and a watchdog armed
//! before either channel first suspends forces completion so the host is
//! never left waiting. Failures surface only through the observer's
//! `on_error`; nothing crosses this boundary as an error or a panic.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout, Duration};
use tracing::{info, instrument, warn};

use crate::control::audio::VoiceChannel;
use crate::control::observer::ResponseObserver;
use crate::control::plan::{ResponseControlResult, ResponseController};
use crate::error::CoreError;
use crate::models::ResponseControlRequest;
use crate::voice::VoiceDescriptor;

/// Channel delays are capped here no matter what the plan says.
const MAX_CHANNEL_DELAY_MS: u64 = 3_000;

/// Bound on a single playback call (primary or fallback).
const VOICE_PLAYBACK_TIMEOUT: Duration = Duration::from_secs(10);

/// The watchdog forces completion at this point regardless of sub-task state.
const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Text display is considered settled after this fixed delay.
const TEXT_SETTLE: Duration = Duration::from_millis(150);

/// Progress snapshot of one response execution.
///
/// Terminal once `completed` is true - either normally or via the watchdog
/// (`forced`). Forced completion is a completion, not an error, though it may
/// co-occur with an earlier `error`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseExecutionState {
    pub is_voice_playing: bool,
    pub is_text_displaying: bool,
    pub voice_started: bool,
    pub text_started: bool,
    pub completed: bool,
    pub forced: bool,
    pub error: Option<String>,
}

/// Executes one response plan at a time against the host's audio channel.
pub struct ResponseExecutor {
    voice: Arc<dyn VoiceChannel>,
    busy: AtomicBool,
}

impl ResponseExecutor {
    pub fn new(voice: Arc<dyn VoiceChannel>) -> Self {
        Self {
            voice,
            busy: AtomicBool::new(false),
        }
    }

    /// Plan and deliver one response in a single call.
    ///
    /// The session's controller supplies classification and greeting state;
    /// everything else behaves exactly like [`execute`](Self::execute).
    pub async fn run(
        &self,
        controller: &mut ResponseController,
        request: ResponseControlRequest,
        observer: Arc<dyn ResponseObserver>,
    ) -> ResponseExecutionState {
        let result = controller.control(request);
        self.execute(result, observer).await
    }

    /// Run one planned response to completion.
    ///
    /// Returns the final execution state. `on_response_complete` fires exactly
    /// once for every non-noop plan, within the watchdog bound.
    #[instrument(skip(self, result, observer), fields(response_id = %result.response_id))]
    pub async fn execute(
        &self,
        result: ResponseControlResult,
        observer: Arc<dyn ResponseObserver>,
    ) -> ResponseExecutionState {
        if result.is_noop() {
            info!("nothing to deliver, skipping execution");
            return ResponseExecutionState::default();
        }

        if self.busy.swap(true, Ordering::SeqCst) {
            warn!("response execution already in flight, refusing new request");
            observer.on_error("response execution already in flight");
            return ResponseExecutionState::default();
        }

        let state = Arc::new(Mutex::new(ResponseExecutionState::default()));

        // Armed before either sub-task reaches its first suspension point, so
        // forced completion can preempt a stuck channel.
        let watchdog = sleep(WATCHDOG_TIMEOUT);

        let voice_task = self.run_voice(&result, state.clone(), observer.clone());
        let text_task = Self::run_text(&result, state.clone(), observer.clone());
        let channels = futures::future::join(voice_task, text_task);

        tokio::select! {
            _ = channels => {
                let mut st = state.lock().await;
                st.completed = true;
                info!("response execution completed");
            }
            _ = watchdog => {
                let mut st = state.lock().await;
                st.is_voice_playing = false;
                st.is_text_displaying = false;
                st.completed = true;
                st.forced = true;
                warn!("watchdog forced completion after {:?}", WATCHDOG_TIMEOUT);
            }
        }

        observer.on_response_complete();
        self.busy.store(false, Ordering::SeqCst);

        let snapshot = state.lock().await.clone();
        snapshot
    }

    async fn run_voice(
        &self,
        result: &ResponseControlResult,
        state: Arc<Mutex<ResponseExecutionState>>,
        observer: Arc<dyn ResponseObserver>,
    ) {
        if !result.content.voice_required {
            return;
        }
        let Some(descriptor) = result.voice.as_ref() else {
            let message = "voice required but no descriptor selected".to_string();
            warn!("{}", message);
            observer.on_error(&message);
            state.lock().await.error = Some(message);
            return;
        };

        let delay = result.timing.voice_delay_ms.min(MAX_CHANNEL_DELAY_MS);
        sleep(Duration::from_millis(delay)).await;

        {
            let mut st = state.lock().await;
            st.voice_started = true;
            st.is_voice_playing = true;
        }
        observer.on_voice_start();

        match self.play_bounded(descriptor).await {
            Ok(true) => {
                state.lock().await.is_voice_playing = false;
                observer.on_voice_end();
            }
            outcome => {
                let message = match outcome {
                    Err(e) => format!("voice playback failed for {}: {}", descriptor.file_stem, e),
                    _ => format!("voice playback declined for {}", descriptor.file_stem),
                };
                warn!("{}", message);
                observer.on_error(&message);

                // One fallback attempt only; the fallback itself never falls
                // back again.
                let fallback = descriptor.fallback();
                match self.play_bounded(&fallback).await {
                    Ok(true) => {
                        state.lock().await.is_voice_playing = false;
                        observer.on_voice_end();
                    }
                    Ok(false) | Err(_) => {
                        let message =
                            format!("voice fallback failed for {}", fallback.file_stem);
                        warn!("{}", message);
                        observer.on_error(&message);
                        {
                            let mut st = state.lock().await;
                            st.is_voice_playing = false;
                            st.error = Some(message);
                        }
                        Self::switch_to_text_channel(result, &state, &observer).await;
                    }
                }
            }
        }
    }

    /// Channel fallback: when voice delivery is lost entirely and the plan
    /// allows a text-bearing alternative, push the text out so the response
    /// still reaches the user.
    async fn switch_to_text_channel(
        result: &ResponseControlResult,
        state: &Arc<Mutex<ResponseExecutionState>>,
        observer: &Arc<dyn ResponseObserver>,
    ) {
        if result.content.text_required {
            // The text channel runs on its own; nothing to switch.
            return;
        }
        let allows_text = result.fallbacks.iter().any(|t| t.includes_text());
        let Some(text) = result.content.text.as_ref() else {
            return;
        };
        if allows_text {
            info!("switching failed voice delivery to text channel");
            state.lock().await.text_started = true;
            observer.on_text_display(text);
        }
    }

    /// Stop anything playing, then play one clip under the playback bound.
    async fn play_bounded(&self, descriptor: &VoiceDescriptor) -> Result<bool, CoreError> {
        self.voice.stop_current().await;
        match timeout(VOICE_PLAYBACK_TIMEOUT, self.voice.play_exclusive(descriptor)).await {
            Ok(outcome) => outcome,
            Err(elapsed) => Err(elapsed.into()),
        }
    }

    async fn run_text(
        result: &ResponseControlResult,
        state: Arc<Mutex<ResponseExecutionState>>,
        observer: Arc<dyn ResponseObserver>,
    ) {
        if !result.content.text_required {
            return;
        }
        let Some(text) = result.content.text.as_ref() else {
            return;
        };

        let delay = result.timing.text_delay_ms.min(MAX_CHANNEL_DELAY_MS);
        sleep(Duration::from_millis(delay)).await;

        {
            let mut st = state.lock().await;
            st.text_started = true;
            st.is_text_displaying = true;
        }
        observer.on_text_display(text);

        sleep(TEXT_SETTLE).await;
        state.lock().await.is_text_displaying = false;
    }
}
