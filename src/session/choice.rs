use crate::error::ValidationError;
use crate::event::CompletionEvent;
use crate::script::ChoiceStep;
use crate::session::{selection_success, toggle_selection};

/// Selection state for an active choice step.
#[derive(Debug)]
pub struct ChoiceSession {
    step: ChoiceStep,
    selected: Vec<String>,
}

impl ChoiceSession {
    pub fn new(step: &ChoiceStep) -> Self {
        Self {
            step: step.clone(),
            selected: Vec::new(),
        }
    }

    /// Toggles membership for multi-select; replaces the selection for
    /// single-select.
    pub fn select(&mut self, value: &str) {
        toggle_selection(&mut self.selected, self.step.multiple, value);
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|v| v == value)
    }

    /// Per-option feedback for the current single-select pick, shown before
    /// confirmation. Multi-select picks carry no per-option feedback.
    pub fn pending_feedback(&self) -> Option<&str> {
        if self.step.multiple {
            return None;
        }
        let value = self.selected.first()?;
        self.step
            .options
            .iter()
            .find(|option| &option.value == value)?
            .feedback
            .as_deref()
    }

    fn is_success(&self) -> bool {
        selection_success(
            &self.selected,
            self.step.multiple,
            self.step.success_value.as_ref(),
            self.step.success_values.as_ref(),
        )
    }

    /// Confirms the selection. An empty selection fails validation with no
    /// state change. A per-option jump table entry for the selected value
    /// wins outright and is emitted as the authoritative target; otherwise
    /// the event carries only the success flag and defers branch resolution
    /// to the resolver.
    pub fn confirm(&self) -> Result<CompletionEvent, ValidationError> {
        if self.selected.is_empty() {
            return Err(ValidationError::EmptySelection);
        }

        let success = self.is_success();

        let target = self.step.option_next.as_ref().and_then(|table| {
            self.selected
                .first()
                .and_then(|value| table.get(value.as_str()).copied())
        });

        Ok(CompletionEvent::targeted(success, target).with_selection(self.selected.clone()))
    }
}
