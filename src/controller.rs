use crate::audio::{AudioPlayer, NullAudio};
use crate::error::ValidationError;
use crate::event::CompletionEvent;
use crate::resolver::resolve_next;
use crate::script::{Script, ScriptRegistry, Step};
use crate::session::{CookResult, PickReadOutcome, StepSession};
use ahash::AHashSet;
use tracing::{debug, warn};

/// Whether the entry menu or an active flow is being presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Menu,
    Flow,
}

/// The outcome of a controller-mediated confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The transition was applied.
    Advanced,
    /// The audio cue is playing; confirming again will transition.
    AudioCued,
    /// The active step is not of the confirmed kind; nothing happened.
    Ignored,
}

/// Holds the only mutable flow state: the view mode, the selected flow, the
/// current step index, the active step session and the session-wide
/// unlocked-recipes set.
///
/// `current_index` changes only through the transition resolver's output or
/// an explicit reset, and entering a new step always tears down the previous
/// instance's session and audio handle first.
pub struct FlowController<A: AudioPlayer = NullAudio> {
    registry: ScriptRegistry,
    audio: A,
    view_mode: ViewMode,
    flow_id: String,
    current_index: usize,
    session: Option<StepSession>,
    unlocked_recipes: AHashSet<String>,
    restart_hook: Option<Box<dyn FnMut() -> usize>>,
}

impl FlowController<NullAudio> {
    /// A controller with no audio backend, starting at the entry menu.
    pub fn new(registry: ScriptRegistry) -> Self {
        Self::with_audio(registry, NullAudio)
    }
}

impl<A: AudioPlayer> FlowController<A> {
    pub fn with_audio(registry: ScriptRegistry, audio: A) -> Self {
        Self {
            flow_id: registry.default_id().to_string(),
            registry,
            audio,
            view_mode: ViewMode::Menu,
            current_index: 0,
            session: None,
            unlocked_recipes: AHashSet::new(),
            restart_hook: None,
        }
    }

    /// Overrides the `end` step's restart target. Without a hook, restart
    /// unconditionally returns to index 0.
    pub fn set_restart_hook(&mut self, hook: impl FnMut() -> usize + 'static) {
        self.restart_hook = Some(Box::new(hook));
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    /// The controller-owned audio sink.
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Recipes unlocked during this session by the cooking mini-game.
    pub fn unlocked_recipes(&self) -> &AHashSet<String> {
        &self.unlocked_recipes
    }

    fn script(&self) -> &Script {
        self.registry.get(&self.flow_id)
    }

    /// The step currently rendered and awaiting input, if a flow is active.
    pub fn active_step(&self) -> Option<&Step> {
        match self.view_mode {
            ViewMode::Flow => self.script().get(self.current_index),
            ViewMode::Menu => None,
        }
    }

    pub fn session(&self) -> Option<&StepSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut StepSession> {
        self.session.as_mut()
    }

    /// Selects a flow and enters its first step. An unknown id is a
    /// configuration error: it is logged and falls back to the default flow.
    pub fn select_flow(&mut self, flow_id: &str) {
        self.flow_id = self.registry.resolve(flow_id).to_string();
        self.view_mode = ViewMode::Flow;
        self.enter_step(0);
    }

    /// Tears down the previous step instance (audio handle, session and with
    /// it any live typewriter) and enters the step at `index`.
    fn enter_step(&mut self, index: usize) {
        self.audio.stop();
        self.session = None;
        self.current_index = index;

        // Validated scripts guarantee the index is in range.
        let step = self.script()[index].clone();
        if let Step::Story(story) = &step {
            if let Some(url) = &story.audio_url {
                if let Err(error) = self.audio.play(url) {
                    warn!(%error, "entry audio cue failed");
                }
            }
        }
        debug!(index, step_type = step.type_name(), "entered step");
        self.session = Some(StepSession::for_step(&step));
    }

    /// Applies a completion event: an `end` step restarts without consulting
    /// the resolver; an unrecognized step type is an observable no-op;
    /// everything else goes through the transition resolver.
    pub fn advance(&mut self, event: CompletionEvent) {
        if self.view_mode != ViewMode::Flow {
            return;
        }
        let Some(step) = self.script().get(self.current_index).cloned() else {
            return;
        };

        match step {
            Step::End(_) => self.restart(),
            Step::Unknown => {
                warn!(
                    index = self.current_index,
                    "advance on an unrecognized step type is a no-op"
                );
            }
            _ => {
                let next = resolve_next(&step, &event, self.current_index, self.script().len());
                self.enter_step(next);
            }
        }
    }

    /// Restarts the active flow: index 0, or whatever the restart hook says.
    pub fn restart(&mut self) {
        let target = match self.restart_hook.as_mut() {
            Some(hook) => hook(),
            None => 0,
        };
        self.enter_step(target);
    }

    /// Steps back one index, floored at 0. A raw decrement, independent of
    /// how the user arrived here: it does not retrace choice branches. Only
    /// offered by contracts that expose a "previous" action.
    pub fn go_back(&mut self) {
        if self.view_mode != ViewMode::Flow {
            return;
        }
        if self.current_index > 0 {
            self.enter_step(self.current_index - 1);
        }
    }

    /// Returns to the entry menu. The flow id and index are left stale until
    /// the next `select_flow`.
    pub fn return_to_menu(&mut self) {
        self.audio.stop();
        self.session = None;
        self.view_mode = ViewMode::Menu;
    }

    /// Confirms the active pick-read step, wiring in the controller-owned
    /// audio sink. Applies the transition itself when one results.
    pub fn confirm_pick_read(&mut self) -> Result<ConfirmOutcome, ValidationError> {
        let outcome = match self.session.as_mut() {
            Some(StepSession::PickRead(session)) => session.confirm(&mut self.audio)?,
            _ => {
                warn!("confirm_pick_read on a step that is not pick-read");
                return Ok(ConfirmOutcome::Ignored);
            }
        };

        match outcome {
            PickReadOutcome::AudioCued => Ok(ConfirmOutcome::AudioCued),
            PickReadOutcome::Complete(event) => {
                self.advance(event);
                Ok(ConfirmOutcome::Advanced)
            }
        }
    }

    /// Attempts to cook the assembled ingredients in the active cook-game
    /// step, updating the session-wide unlocked set on a match. Returns the
    /// result popup content, or `None` when slots are still empty or the
    /// active step is not a cook-game.
    pub fn cook(&mut self) -> Option<CookResult> {
        let Self {
            session,
            unlocked_recipes,
            ..
        } = self;
        match session.as_mut() {
            Some(StepSession::CookGame(game)) => game.cook(unlocked_recipes).cloned(),
            _ => None,
        }
    }

    /// Dismisses the cook-game result popup, handing control back to the
    /// flow via default-next resolution.
    pub fn dismiss_cook_result(&mut self) {
        let event = match self.session.as_mut() {
            Some(StepSession::CookGame(game)) => game.dismiss_result(),
            _ => None,
        };
        if let Some(event) = event {
            self.advance(event);
        }
    }
}
