//! Audio playback capability seam.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::voice::VoiceDescriptor;

/// The host's exclusive audio channel.
///
/// Implementations guarantee at-most-one concurrent voice output per session:
/// `play_exclusive` must not overlap a previous clip. The executor relies on
/// that invariant and always calls [`stop_current`](VoiceChannel::stop_current)
/// before issuing a new playback, so a well-behaved implementation only has to
/// honor the stop.
#[async_trait]
pub trait VoiceChannel: Send + Sync + 'static {
    /// Stop whatever is currently playing, if anything. Must not fail.
    async fn stop_current(&self);

    /// Play one clip to completion.
    ///
    /// Resolves `Ok(true)` when the clip played, `Ok(false)` when the host
    /// declined to play it (e.g. muted), and `Err` on playback failure.
    async fn play_exclusive(&self, descriptor: &VoiceDescriptor) -> Result<bool, CoreError>;
}
