//! # Control Module
//!
//! Response delivery: planning and execution.
//!
//! ## Components
//! - `plan`: classification -> execution plan (timing, fallbacks, descriptor)
//! - `executor`: concurrent voice/text delivery under a watchdog
//! - `audio`: exclusive-playback capability seam
//! - `observer`: host callback seam

pub mod audio;
pub mod executor;
pub mod observer;
pub mod plan;

pub use audio::VoiceChannel;
pub use executor::{ResponseExecutionState, ResponseExecutor};
pub use observer::{NoopObserver, ResponseObserver};
pub use plan::{ResponseContent, ResponseControlResult, ResponseController, ResponseTiming};
