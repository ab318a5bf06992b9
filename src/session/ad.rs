use crate::script::AdStep;

/// State for an active ad interstitial.
///
/// Intentionally a dead-end: the single claim action reveals the fixed
/// reward, and no further transition is offered. Leaving requires navigating
/// back to the menu (or, in the cook-game flow, the mini-game's result popup
/// is what routed the user here).
#[derive(Debug)]
pub struct AdSession {
    step: AdStep,
    claimed: bool,
}

impl AdSession {
    pub fn new(step: &AdStep) -> Self {
        Self {
            step: step.clone(),
            claimed: false,
        }
    }

    /// Reveals the reward. Idempotent.
    pub fn claim(&mut self) {
        self.claimed = true;
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// The reward asset, once claimed.
    pub fn reward_image(&self) -> Option<&str> {
        if self.claimed {
            self.step.reward_image.as_deref()
        } else {
            None
        }
    }
}
