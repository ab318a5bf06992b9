//! # Kamishibai - Branching Narrative Flow Engine
//!
//! **Kamishibai** is a data-driven flow engine for branching "visual novel"
//! style learning games. Authored scripts are plain data: an ordered sequence
//! of typed steps (story, choice, fill, feedback, pick-read, ad, cook-game,
//! end). The engine owns the step-transition state machine — which step index
//! to visit next, given the current step and what the user did — while
//! rendering, styling and asset playback stay with the collaborator.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Scripts**: Parse authored JSON into the canonical
//!     [`script::Script`] model (or implement [`script::IntoScript`] for a
//!     custom format) and register each flow in a [`script::ScriptRegistry`].
//! 2.  **Drive the Controller**: Create a [`controller::FlowController`],
//!     select a flow, and hand the active step plus its
//!     [`session::StepSession`] to your renderer.
//! 3.  **Feed Events Back**: The renderer pushes user actions into the
//!     session; when a session produces a [`event::CompletionEvent`], pass it
//!     to `advance` and the transition resolver picks the next index.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kamishibai::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // The three built-in flows: "rescue", "explore", "cook".
//!     let registry = ScriptRegistry::builtin()?;
//!     let mut controller = FlowController::new(registry);
//!
//!     controller.select_flow("rescue");
//!
//!     // Press through the story; completion defers to default-next.
//!     if let Some(StepSession::Story(story)) = controller.session_mut() {
//!         while let StoryAdvance::NextLine | StoryAdvance::Settled = story.advance() {}
//!         if let StoryAdvance::Complete(event) = story.advance() {
//!             controller.advance(event);
//!         }
//!     }
//!
//!     println!("now at step {}", controller.current_index());
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod controller;
pub mod error;
pub mod event;
pub mod prelude;
pub mod resolver;
pub mod script;
pub mod session;
