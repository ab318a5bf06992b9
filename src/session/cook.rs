use crate::event::CompletionEvent;
use crate::script::CookGameStep;
use ahash::AHashSet;
use itertools::Itertools;

/// Which collection view the side panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTab {
    Pantry,
    Cookbook,
}

/// The outcome of one cooking attempt, shown in the result popup until
/// dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookResult {
    pub success: bool,
    pub message: String,
    /// The matched recipe, for artwork display.
    pub recipe_id: Option<String>,
}

/// One cookbook row: locked recipes have name, image and ingredients
/// redacted.
#[derive(Debug)]
pub struct CookbookEntry<'a> {
    pub recipe_id: &'a str,
    pub unlocked: bool,
    pub name: Option<&'a str>,
    pub image: Option<&'a str>,
    pub ingredients: Option<&'a [String]>,
}

/// The self-contained cooking mini-game: not flow-indexed, it hands control
/// back to the flow only when its result popup is dismissed.
#[derive(Debug)]
pub struct CookGameSession {
    step: CookGameStep,
    slots: Vec<Option<String>>,
    panel: Option<PanelTab>,
    result: Option<CookResult>,
}

impl CookGameSession {
    pub fn new(step: &CookGameStep) -> Self {
        let arity = step.slots.max(1);
        Self {
            step: step.clone(),
            slots: vec![None; arity],
            panel: None,
            result: None,
        }
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Places a token in the first empty slot. Tokens are trimmed and
    /// lowercased. Returns whether a slot was filled.
    pub fn add_ingredient(&mut self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return false;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(token);
                true
            }
            None => false,
        }
    }

    /// Empties a slot, e.g. to correct a typo.
    pub fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Whether every slot is filled and cooking can start.
    pub fn can_cook(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_in_pantry(&self, token: &str) -> bool {
        self.step.pantry_items.iter().any(|item| item.id == token)
    }

    /// Attempts to cook the assembled ingredients. Matching is
    /// order-independent exact multiset equality against each recipe: no
    /// partial credit, no supersets. A match adds the recipe to `unlocked`
    /// (idempotent); an invalid ingredient or no match produces a generic
    /// failure. Returns `None` while slots are still empty.
    pub fn cook(&mut self, unlocked: &mut AHashSet<String>) -> Option<&CookResult> {
        if !self.can_cook() {
            return None;
        }

        let assembled: Vec<&str> = self.slots.iter().flatten().map(String::as_str).collect();

        if !assembled.iter().all(|token| self.is_in_pantry(token)) {
            self.result = Some(CookResult {
                success: false,
                message: "Some ingredients are not in your pantry!".to_string(),
                recipe_id: None,
            });
            return self.result.as_ref();
        }

        let assembled: Vec<String> = assembled
            .iter()
            .map(|token| token.to_string())
            .sorted()
            .collect();

        let matched = self.step.recipes.iter().find(|recipe| {
            recipe.ingredients.len() == assembled.len()
                && recipe
                    .ingredients
                    .iter()
                    .map(|ingredient| ingredient.to_lowercase())
                    .sorted()
                    .eq(assembled.iter().cloned())
        });

        self.result = Some(match matched {
            Some(recipe) => {
                unlocked.insert(recipe.id.clone());
                CookResult {
                    success: true,
                    message: format!("Congratulations! You made {}!", recipe.name),
                    recipe_id: Some(recipe.id.clone()),
                }
            }
            None => CookResult {
                success: false,
                message: "Sorry, your recipe doesn't match any known dish!".to_string(),
                recipe_id: None,
            },
        });

        self.result.as_ref()
    }

    /// The pending result popup, if any.
    pub fn result(&self) -> Option<&CookResult> {
        self.result.as_ref()
    }

    /// Dismisses the result popup and empties the slots for the next
    /// attempt, emitting the completion event that hands control back to the
    /// flow (no explicit target: default-next).
    pub fn dismiss_result(&mut self) -> Option<CompletionEvent> {
        let result = self.result.take()?;
        self.slots.fill(None);
        let mut event = CompletionEvent::deferred();
        event.success = result.success;
        Some(event)
    }

    // Side panel: browsing is independent of the cooking state.

    pub fn open_panel(&mut self, tab: PanelTab) {
        self.panel = Some(tab);
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    pub fn panel(&self) -> Option<PanelTab> {
        self.panel
    }

    pub fn pantry(&self) -> &[crate::script::PantryItem] {
        &self.step.pantry_items
    }

    /// The cookbook view: one entry per recipe, redacting name, image and
    /// ingredients for recipes that have not been unlocked yet.
    pub fn cookbook<'a>(&'a self, unlocked: &AHashSet<String>) -> Vec<CookbookEntry<'a>> {
        self.step
            .recipes
            .iter()
            .map(|recipe| {
                let is_unlocked = unlocked.contains(&recipe.id);
                CookbookEntry {
                    recipe_id: &recipe.id,
                    unlocked: is_unlocked,
                    name: is_unlocked.then_some(recipe.name.as_str()),
                    image: if is_unlocked {
                        recipe.image.as_deref()
                    } else {
                        None
                    },
                    ingredients: is_unlocked.then_some(recipe.ingredients.as_slice()),
                }
            })
            .collect()
    }
}
