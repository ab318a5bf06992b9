use ahash::AHashMap;

/// The payload a step session emits when the user finishes interacting with
/// the active step.
///
/// `next_step_index`, when present, is authoritative: the transition resolver
/// uses it verbatim and skips every other rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionEvent {
    /// The option values the user had selected, in selection order.
    pub selected_values: Vec<String>,
    /// Whether the interaction counts as a success for branch resolution.
    pub success: bool,
    /// Authoritative jump target. Short-circuits all other resolution rules.
    pub next_step_index: Option<usize>,
    /// Submitted form values, keyed by field id (`fill` steps only).
    pub form_data: AHashMap<String, String>,
    /// Submitted star rating (`feedback` steps only).
    pub rating: Option<u8>,
    /// Submitted free-text comment (`feedback` steps only).
    pub comment: Option<String>,
}

impl CompletionEvent {
    /// A successful event with no explicit target, deferring to the
    /// default-next rule.
    pub fn deferred() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// An event carrying an explicit jump target (which may itself be absent,
    /// falling through to the remaining resolution rules).
    pub fn targeted(success: bool, next_step_index: Option<usize>) -> Self {
        Self {
            success,
            next_step_index,
            ..Self::default()
        }
    }

    /// Attaches the selection that produced this event.
    pub fn with_selection(mut self, selected_values: Vec<String>) -> Self {
        self.selected_values = selected_values;
        self
    }
}
