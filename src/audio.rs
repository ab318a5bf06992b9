use crate::error::AudioError;

/// The playback seam between the engine and whatever actually makes sound.
///
/// Playback is fire-and-forget: `play` returns as soon as the cue has been
/// handed off. A returned error must be treated as an immediate fallback to
/// the default transition path, never left pending. The flow controller
/// guarantees `stop` is called before a new step instance is entered, so at
/// most one handle is live per step.
pub trait AudioPlayer {
    /// Starts playback of an opaque asset reference.
    fn play(&mut self, url: &str) -> Result<(), AudioError>;

    /// Stops and resets any live playback. Idempotent.
    fn stop(&mut self);
}

/// A no-op player for headless use and tests. `play` always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioPlayer for NullAudio {
    fn play(&mut self, _url: &str) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self) {}
}
