use thiserror::Error;

/// Errors that can occur while loading or validating an authored script.
#[derive(Error, Debug, Clone)]
pub enum ScriptError {
    #[error("Failed to parse script JSON: {0}")]
    JsonParseError(String),

    #[error("Script contains no steps")]
    EmptyScript,

    #[error("Step {step_index} jumps to index {target}, but the script has only {len} steps")]
    JumpOutOfRange {
        step_index: usize,
        target: usize,
        len: usize,
    },

    #[error("Step {step_index} is a '{step_type}' step but defines no {what}")]
    MissingContent {
        step_index: usize,
        step_type: &'static str,
        what: &'static str,
    },

    #[error("Step {step_index} sets a minimum rating of {value}, outside the 1-5 star range")]
    RatingOutOfRange { step_index: usize, value: u8 },
}

/// Errors that can occur when converting a custom authored format into a
/// canonical `Script`.
#[derive(Error, Debug, Clone)]
pub enum ScriptConversionError {
    #[error("Invalid step record: {0}")]
    ValidationError(String),
}

/// A recoverable, user-visible validation failure raised by a step session.
///
/// Validation failures block the transition and leave all state untouched;
/// they are surfaced as structured results for the renderer to display, never
/// as a blocking side channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one option must be selected")]
    EmptySelection,

    #[error("{} required field(s) are empty", .0.len())]
    MissingFields(Vec<FieldError>),

    #[error("A rating is required before submitting")]
    MissingRating,
}

/// A field-scoped message for a failed `fill` validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

/// Audio playback failure. Always recoverable: callers fall back to the
/// default transition path so a missing or broken asset never blocks the
/// user.
#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("Playback failed for '{url}': {message}")]
    PlaybackFailed { url: String, message: String },
}
