//! Per-step-instance state: one session per active step, created on step
//! entry and dropped on exit.
//!
//! A session owns everything mutable about the step the user is currently
//! interacting with (selection, form values, dialogue pointer, reveal state,
//! assembled ingredients). The flow controller tears the session down on
//! every index change, which uniformly covers typewriter cancellation; the
//! matching audio teardown happens in the controller itself.

mod ad;
mod choice;
mod cook;
mod feedback;
mod fill;
mod pick_read;
mod story;

pub use ad::AdSession;
pub use choice::ChoiceSession;
pub use cook::{CookGameSession, CookResult, CookbookEntry, PanelTab};
pub use feedback::FeedbackSession;
pub use fill::FillSession;
pub use pick_read::{PickReadOutcome, PickReadSession};
pub use story::{StoryAdvance, StorySession, Typewriter};

use crate::script::Step;

/// The active step's session, matching the step's variant.
#[derive(Debug)]
pub enum StepSession {
    Story(StorySession),
    Choice(ChoiceSession),
    Fill(FillSession),
    Feedback(FeedbackSession),
    PickRead(PickReadSession),
    Ad(AdSession),
    CookGame(CookGameSession),
    /// `end` carries no per-instance state; restart is a controller
    /// operation.
    End,
    /// Inert placeholder for an unrecognized step type. The flow stalls here
    /// until a go-back or reset.
    Inert,
}

impl StepSession {
    pub fn for_step(step: &Step) -> Self {
        match step {
            Step::Story(story) => StepSession::Story(StorySession::new(story)),
            Step::Choice(choice) => StepSession::Choice(ChoiceSession::new(choice)),
            Step::Fill(fill) => StepSession::Fill(FillSession::new(fill)),
            Step::Feedback(feedback) => StepSession::Feedback(FeedbackSession::new(feedback)),
            Step::PickRead(pick) => StepSession::PickRead(PickReadSession::new(pick)),
            Step::Ad(ad) => StepSession::Ad(AdSession::new(ad)),
            Step::CookGame(game) => StepSession::CookGame(CookGameSession::new(game)),
            Step::End(_) => StepSession::End,
            Step::Unknown => StepSession::Inert,
        }
    }
}

/// Toggles membership for multi-select, replaces the selection otherwise.
pub(crate) fn toggle_selection(selected: &mut Vec<String>, multiple: bool, value: &str) {
    if multiple {
        if let Some(position) = selected.iter().position(|v| v == value) {
            selected.remove(position);
        } else {
            selected.push(value.to_string());
        }
    } else {
        selected.clear();
        selected.push(value.to_string());
    }
}

/// The success rule shared by `choice` and `pick-read`, in priority order:
/// a configured single value must be the entire selection; a configured value
/// set must be covered by a multi-select selection (and never succeeds for
/// single-select); with nothing configured, any non-empty selection counts.
pub(crate) fn selection_success(
    selected: &[String],
    multiple: bool,
    success_value: Option<&String>,
    success_values: Option<&Vec<String>>,
) -> bool {
    if selected.is_empty() {
        return false;
    }

    if let Some(expected) = success_value {
        return selected.len() == 1 && selected[0] == *expected;
    }

    if let Some(required) = success_values {
        if multiple {
            return required.iter().all(|value| selected.contains(value));
        }
        return false;
    }

    true
}
