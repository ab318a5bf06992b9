//! Authoring-time script validation.
//!
//! Out-of-range jump targets are an authoring bug, caught here rather than by
//! runtime guards: the resolver and controller trust validated scripts.

use crate::error::ScriptError;
use crate::script::{Script, Step};

impl Script {
    /// Checks structural invariants of an authored script: every jump target
    /// is in range, interactive steps carry the content they need, and rating
    /// thresholds fit the 1-5 star scale.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.is_empty() {
            return Err(ScriptError::EmptyScript);
        }

        for (step_index, step) in self.steps.iter().enumerate() {
            for target in jump_targets(step) {
                if target >= self.len() {
                    return Err(ScriptError::JumpOutOfRange {
                        step_index,
                        target,
                        len: self.len(),
                    });
                }
            }

            match step {
                Step::Choice(choice) if choice.options.is_empty() => {
                    return Err(ScriptError::MissingContent {
                        step_index,
                        step_type: "choice",
                        what: "options",
                    });
                }
                Step::PickRead(pick) if pick.options.is_empty() => {
                    return Err(ScriptError::MissingContent {
                        step_index,
                        step_type: "pick-read",
                        what: "options",
                    });
                }
                Step::Fill(fill) if fill.fields.is_empty() => {
                    return Err(ScriptError::MissingContent {
                        step_index,
                        step_type: "fill",
                        what: "fields",
                    });
                }
                Step::CookGame(game) if game.pantry_items.is_empty() => {
                    return Err(ScriptError::MissingContent {
                        step_index,
                        step_type: "cook-game",
                        what: "pantry items",
                    });
                }
                Step::Feedback(feedback) => {
                    if let Some(value) = feedback.min_rating {
                        if !(1..=5).contains(&value) {
                            return Err(ScriptError::RatingOutOfRange { step_index, value });
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Every literal jump target a step can carry.
fn jump_targets(step: &Step) -> Vec<usize> {
    let mut targets = Vec::new();
    match step {
        Step::Story(story) => targets.extend(story.next),
        Step::Choice(choice) => {
            targets.extend(choice.success_next);
            targets.extend(choice.fail_next);
            if let Some(table) = &choice.option_next {
                targets.extend(table.values().copied());
            }
        }
        Step::Fill(fill) => targets.extend(fill.success_next),
        Step::Feedback(feedback) => {
            targets.extend(feedback.success_next);
            targets.extend(feedback.fail_next);
            targets.extend(feedback.next);
        }
        Step::PickRead(pick) => {
            targets.extend(pick.success_next);
            targets.extend(pick.fail_next);
        }
        Step::Ad(_) | Step::End(_) | Step::CookGame(_) | Step::Unknown => {}
    }
    targets
}
