//! Delivery state machine tests: watchdog, fallback, exclusivity, busy guard.
//!
//! All timer-driven tests run under `start_paused` so the 10-second bounds
//! are exercised in virtual time.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, Instant};
use uuid::Uuid;

use crate::brain::analysis::Emotion;
use crate::control::audio::VoiceChannel;
use crate::control::executor::ResponseExecutor;
use crate::control::observer::ResponseObserver;
use crate::control::plan::{ResponseContent, ResponseControlResult, ResponseTiming};
use crate::error::CoreError;
use crate::models::{TimeSlot, Urgency};
use crate::pattern::classifier::ResponsePattern;
use crate::pattern::profile::{Priority, ResponseCategory, ResponseType};
use crate::voice::VoiceDescriptor;

// --- Mock collaborators ---

#[derive(Clone, Copy)]
enum VoiceMode {
    /// Every playback succeeds.
    Play,
    /// Every playback fails.
    Fail,
    /// Playback never resolves.
    Hang,
    /// Primary clips fail, `_normal` fallback clips succeed.
    FailPrimaryOnly,
}

struct ScriptedVoiceChannel {
    mode: VoiceMode,
    events: Arc<Mutex<Vec<String>>>,
    play_calls: Arc<AtomicUsize>,
}

impl ScriptedVoiceChannel {
    fn new(mode: VoiceMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            events: Arc::new(Mutex::new(Vec::new())),
            play_calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl VoiceChannel for ScriptedVoiceChannel {
    async fn stop_current(&self) {
        self.events.lock().unwrap().push("stop".to_string());
    }

    async fn play_exclusive(&self, descriptor: &VoiceDescriptor) -> Result<bool, CoreError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("play:{}", descriptor.file_stem));
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            VoiceMode::Play => Ok(true),
            VoiceMode::Fail => Err(CoreError::Voice("injected playback failure".to_string())),
            VoiceMode::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            VoiceMode::FailPrimaryOnly => {
                if descriptor.file_stem.ends_with("_normal") {
                    Ok(true)
                } else {
                    Err(CoreError::Voice("primary clip missing".to_string()))
                }
            }
        }
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
    completions: AtomicUsize,
    errors: AtomicUsize,
}

impl RecordingObserver {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ResponseObserver for RecordingObserver {
    fn on_text_display(&self, text: &str) {
        self.events.lock().unwrap().push(format!("text:{}", text));
    }

    fn on_voice_start(&self) {
        self.events.lock().unwrap().push("voice_start".to_string());
    }

    fn on_voice_end(&self) {
        self.events.lock().unwrap().push("voice_end".to_string());
    }

    fn on_response_complete(&self) {
        self.completions.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push("complete".to_string());
    }

    fn on_error(&self, message: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.events
            .lock()
            .unwrap()
            .push(format!("error:{}", message));
    }
}

// --- Plan construction ---

fn plan(response_type: ResponseType, text: &str) -> ResponseControlResult {
    let voice_required = response_type.includes_voice();
    let text_required = response_type.includes_text();
    ResponseControlResult {
        response_id: Uuid::new_v4(),
        pattern: ResponsePattern {
            response_type,
            category: ResponseCategory::Advice,
            priority: Priority::Medium,
            confidence: 0.8,
            reason: "scripted".to_string(),
        },
        content: ResponseContent {
            text: Some(text.to_string()),
            voice_required,
            text_required,
            urgency: Urgency::Normal,
        },
        timing: ResponseTiming {
            voice_delay_ms: 100,
            text_delay_ms: 200,
            voice_duration_estimate_ms: voice_required.then_some(2_000),
        },
        voice: voice_required.then(|| VoiceDescriptor {
            character_id: "akari".to_string(),
            emotion: Emotion::Neutral,
            time_slot: TimeSlot::Morning,
            file_stem: "akari_neutral".to_string(),
        }),
        fallbacks: vec![],
    }
}

fn noop_plan() -> ResponseControlResult {
    let mut result = plan(ResponseType::TextOnly, "unused");
    result.content.text = None;
    result.content.text_required = false;
    result
}

// --- Tests ---

#[tokio::test(start_paused = true)]
async fn test_both_channels_complete_normally() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Play);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    let state = executor
        .execute(plan(ResponseType::VoiceAndText, "こんにちは"), observer.clone())
        .await;

    assert!(state.completed);
    assert!(!state.forced);
    assert!(state.voice_started);
    assert!(state.text_started);
    assert!(state.error.is_none());
    assert_eq!(observer.completions.load(Ordering::SeqCst), 1);
    assert_eq!(observer.errors.load(Ordering::SeqCst), 0);

    let events = observer.events();
    assert!(events.contains(&"voice_start".to_string()));
    assert!(events.contains(&"voice_end".to_string()));
    assert!(events.contains(&"text:こんにちは".to_string()));
    assert_eq!(events.last().unwrap(), "complete");
}

#[tokio::test(start_paused = true)]
async fn test_watchdog_forces_completion_when_playback_hangs() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Hang);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    let start = Instant::now();
    let state = executor
        .execute(plan(ResponseType::VoiceAndText, "お水を飲もう"), observer.clone())
        .await;
    let elapsed = start.elapsed();

    assert!(state.completed);
    assert!(state.forced);
    assert!(!state.is_voice_playing);
    assert!(!state.is_text_displaying);
    assert!(
        elapsed <= Duration::from_secs(10) + Duration::from_millis(100),
        "took {:?}",
        elapsed
    );
    assert_eq!(observer.completions.load(Ordering::SeqCst), 1);
    // Text still made it out before the watchdog fired
    assert!(observer.events().iter().any(|e| e.starts_with("text:")));
}

#[tokio::test(start_paused = true)]
async fn test_always_failing_playback_reports_error_before_completion() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Fail);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    let start = Instant::now();
    let state = executor
        .execute(plan(ResponseType::VoiceAndText, "野菜を食べよう"), observer.clone())
        .await;
    let elapsed = start.elapsed();

    assert!(state.completed);
    assert!(state.error.is_some());
    assert!(elapsed < Duration::from_secs(10), "took {:?}", elapsed);
    assert!(observer.errors.load(Ordering::SeqCst) >= 1);
    assert_eq!(observer.completions.load(Ordering::SeqCst), 1);

    // Errors arrived before the completion event
    let events = observer.events();
    let first_error = events.iter().position(|e| e.starts_with("error:")).unwrap();
    let complete = events.iter().position(|e| e == "complete").unwrap();
    assert!(first_error < complete);

    // Text was unaffected by the voice failure
    assert!(events.iter().any(|e| e.starts_with("text:")));
}

#[tokio::test(start_paused = true)]
async fn test_fallback_clip_rescues_playback() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::FailPrimaryOnly);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    let state = executor
        .execute(plan(ResponseType::VoiceOnly, ""), observer.clone())
        .await;

    assert!(state.completed);
    assert!(state.error.is_none());
    assert_eq!(channel.play_calls.load(Ordering::SeqCst), 2);

    let events = channel.events();
    assert!(events.contains(&"play:akari_neutral".to_string()));
    assert!(events.contains(&"play:akari_normal".to_string()));
    assert!(observer.events().contains(&"voice_end".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_fallback_attempted_exactly_once() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Fail);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    executor
        .execute(plan(ResponseType::VoiceOnly, ""), observer.clone())
        .await;

    // Primary attempt + one fallback, never more
    assert_eq!(channel.play_calls.load(Ordering::SeqCst), 2);
    assert!(observer.errors.load(Ordering::SeqCst) >= 2);
}

#[tokio::test(start_paused = true)]
async fn test_voice_only_degrades_to_text_when_voice_is_lost() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Fail);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    let mut voice_only = plan(ResponseType::VoiceOnly, "今日の目標は達成です");
    voice_only.fallbacks = vec![ResponseType::VoiceAndText, ResponseType::TextOnly];

    let state = executor.execute(voice_only, observer.clone()).await;

    assert!(state.completed);
    assert!(state.text_started);
    assert!(state.error.is_some());
    assert!(observer
        .events()
        .contains(&"text:今日の目標は達成です".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_stop_precedes_every_playback() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Play);
    let executor = ResponseExecutor::new(channel.clone());

    executor
        .execute(plan(ResponseType::VoiceOnly, ""), RecordingObserver::new())
        .await;
    executor
        .execute(plan(ResponseType::VoiceOnly, ""), RecordingObserver::new())
        .await;

    let events = channel.events();
    let mut pending_stops = 0;
    for event in &events {
        if event == "stop" {
            pending_stops += 1;
        } else if event.starts_with("play:") {
            assert!(pending_stops > 0, "playback without prior stop: {:?}", events);
            pending_stops -= 1;
        }
    }
    assert_eq!(events.iter().filter(|e| e.starts_with("play:")).count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_second_execution_is_refused_while_running() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Hang);
    let executor = Arc::new(ResponseExecutor::new(channel.clone()));

    let first_observer = RecordingObserver::new();
    let first = {
        let executor = executor.clone();
        let observer = first_observer.clone();
        tokio::spawn(async move {
            executor
                .execute(plan(ResponseType::VoiceAndText, "一通目"), observer)
                .await
            })
    };

    // Let the first execution reach its voice suspension point
    tokio::time::sleep(Duration::from_millis(500)).await;

    let second_observer = RecordingObserver::new();
    let state = executor
        .execute(plan(ResponseType::VoiceAndText, "二通目"), second_observer.clone())
        .await;

    assert!(!state.completed);
    assert_eq!(second_observer.completions.load(Ordering::SeqCst), 0);
    assert_eq!(second_observer.errors.load(Ordering::SeqCst), 1);
    assert!(second_observer.events()[0].starts_with("error:"));

    // The first execution still completes (forced by its watchdog)
    let first_state = first.await.unwrap();
    assert!(first_state.completed);
    assert!(first_state.forced);
    assert_eq!(first_observer.completions.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_noop_plan_invokes_nothing() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Play);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    let state = executor.execute(noop_plan(), observer.clone()).await;

    assert!(!state.completed);
    assert!(observer.events().is_empty());
    assert_eq!(observer.completions.load(Ordering::SeqCst), 0);
    assert_eq!(channel.play_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_text_only_plan_never_touches_audio() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Play);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    let state = executor
        .execute(plan(ResponseType::TextOnly, "記録を見ました"), observer.clone())
        .await;

    assert!(state.completed);
    assert!(state.text_started);
    assert!(!state.voice_started);
    assert_eq!(channel.play_calls.load(Ordering::SeqCst), 0);
    assert!(observer
        .events()
        .contains(&"text:記録を見ました".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_oversized_delays_are_capped() {
    let channel = ScriptedVoiceChannel::new(VoiceMode::Play);
    let executor = ResponseExecutor::new(channel.clone());
    let observer = RecordingObserver::new();

    let mut oversized = plan(ResponseType::VoiceAndText, "遅延テスト");
    oversized.timing.voice_delay_ms = 60_000;
    oversized.timing.text_delay_ms = 60_000;

    let start = Instant::now();
    let state = executor.execute(oversized, observer.clone()).await;
    let elapsed = start.elapsed();

    // Both channels ran despite the absurd requested delays
    assert!(state.completed);
    assert!(!state.forced);
    assert!(state.voice_started);
    assert!(state.text_started);
    assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
}
