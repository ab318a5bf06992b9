use crate::error::{FieldError, ValidationError};
use crate::event::CompletionEvent;
use crate::script::FillStep;
use ahash::AHashMap;

/// Form state for an active fill step.
///
/// Validation failure blocks the transition and is purely local: the session
/// keeps per-field error messages for re-rendering and the flow index never
/// changes. There is no fail-jump path for fill steps.
#[derive(Debug)]
pub struct FillSession {
    step: FillStep,
    values: AHashMap<String, String>,
    errors: Vec<FieldError>,
}

impl FillSession {
    pub fn new(step: &FillStep) -> Self {
        Self {
            step: step.clone(),
            values: AHashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Records a field edit. Editing a field clears its pending error.
    pub fn set_field(&mut self, field_id: &str, value: impl Into<String>) {
        self.values.insert(field_id.to_string(), value.into());
        self.errors.retain(|error| error.field_id != field_id);
    }

    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).map(String::as_str)
    }

    /// Per-field errors from the last failed confirmation.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Validates that all required fields are non-empty. On success the event
    /// targets `success_next` (absent means default-next); on failure the
    /// per-field messages are retained and nothing else changes.
    pub fn confirm(&mut self) -> Result<CompletionEvent, ValidationError> {
        let errors: Vec<FieldError> = self
            .step
            .fields
            .iter()
            .filter(|field| {
                field.required
                    && self
                        .values
                        .get(&field.id)
                        .is_none_or(|value| value.trim().is_empty())
            })
            .map(|field| FieldError {
                field_id: field.id.clone(),
                message: format!("{} is required", field.label),
            })
            .collect();

        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(ValidationError::MissingFields(errors));
        }

        self.errors.clear();
        let mut event = CompletionEvent::targeted(true, self.step.success_next);
        event.form_data = self.values.clone();
        Ok(event)
    }
}
