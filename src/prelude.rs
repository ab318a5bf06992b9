//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the kamishibai crate so that
//! collaborators can get going with a single import.

// Flow state machine
pub use crate::controller::{ConfirmOutcome, FlowController, ViewMode};
pub use crate::resolver::resolve_next;

// Script model
pub use crate::script::{
    AdStep, ChoiceOption, ChoiceStep, CookGameStep, DialogueLine, EndStep, FeedbackStep, FillStep,
    FormField, IntoScript, LegacyRecords, PantryItem, PickReadStep, Recipe, Script,
    ScriptRegistry, Step, StoryStep,
};

// Completion events and per-step sessions
pub use crate::event::CompletionEvent;
pub use crate::session::{
    AdSession, ChoiceSession, CookGameSession, CookResult, CookbookEntry, FeedbackSession,
    FillSession, PanelTab, PickReadOutcome, PickReadSession, StepSession, StoryAdvance,
    StorySession, Typewriter,
};

// Audio boundary
pub use crate::audio::{AudioPlayer, NullAudio};

// Error types
pub use crate::error::{
    AudioError, FieldError, ScriptConversionError, ScriptError, ValidationError,
};

// Map types commonly used with this crate
pub use ahash::{AHashMap, AHashSet};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
