use crate::audio::AudioPlayer;
use crate::error::ValidationError;
use crate::event::CompletionEvent;
use crate::script::PickReadStep;
use crate::session::{selection_success, toggle_selection};
use tracing::warn;

/// What a pick-read confirmation did.
#[derive(Debug)]
pub enum PickReadOutcome {
    /// The audio cue was started; a second confirm performs the transition.
    AudioCued,
    /// The transition event, carrying the explicit target.
    Complete(CompletionEvent),
}

/// Selection and audio-gating state for an active pick-read step.
///
/// Selection and success semantics are identical to `choice`. A correct pick
/// with a configured cue is read aloud first: the first confirm plays the cue
/// without transitioning, the second transitions to `success_next`. A
/// playback failure never blocks progress; it falls back to an immediate
/// transition. A failed pick transitions to `fail_next` immediately.
#[derive(Debug)]
pub struct PickReadSession {
    step: PickReadStep,
    selected: Vec<String>,
    audio_played: bool,
}

impl PickReadSession {
    pub fn new(step: &PickReadStep) -> Self {
        Self {
            step: step.clone(),
            selected: Vec::new(),
            audio_played: false,
        }
    }

    pub fn select(&mut self, value: &str) {
        toggle_selection(&mut self.selected, self.step.multiple, value);
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|v| v == value)
    }

    /// Whether the cue has been played and the next confirm will transition.
    pub fn audio_played(&self) -> bool {
        self.audio_played
    }

    fn is_success(&self) -> bool {
        selection_success(
            &self.selected,
            self.step.multiple,
            self.step.success_value.as_ref(),
            self.step.success_values.as_ref(),
        )
    }

    pub fn confirm(&mut self, audio: &mut dyn AudioPlayer) -> Result<PickReadOutcome, ValidationError> {
        if self.selected.is_empty() {
            return Err(ValidationError::EmptySelection);
        }

        let success = self.is_success();
        if !success {
            return Ok(PickReadOutcome::Complete(
                CompletionEvent::targeted(false, self.step.fail_next)
                    .with_selection(self.selected.clone()),
            ));
        }

        if !self.audio_played {
            if let Some(url) = &self.step.audio_url {
                match audio.play(url) {
                    Ok(()) => {
                        self.audio_played = true;
                        return Ok(PickReadOutcome::AudioCued);
                    }
                    Err(error) => {
                        warn!(%error, "audio cue failed, transitioning immediately");
                    }
                }
            }
        }

        Ok(PickReadOutcome::Complete(
            CompletionEvent::targeted(true, self.step.success_next)
                .with_selection(self.selected.clone()),
        ))
    }
}
