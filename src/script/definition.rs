use crate::error::ScriptError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A complete branching script: an ordered, 0-indexed sequence of steps for
/// one storyline.
///
/// Index stability is a hard invariant. Every jump target (`successNext`,
/// `failNext`, `next`, `optionNext` values) is a literal index into this
/// sequence; indices are never remapped at runtime. Out-of-range targets are
/// an authoring error caught by [`Script::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Parses a script from its canonical JSON document form.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json).map_err(|e| ScriptError::JsonParseError(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }
}

impl std::ops::Index<usize> for Script {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

/// One unit of interaction or presentation within a flow, tagged by its
/// `type` field in the authored JSON.
///
/// The enum is closed: renderers and the transition resolver pattern-match
/// exhaustively. Step types the parser does not recognize land in
/// [`Step::Unknown`], which renders an inert placeholder and stalls the flow
/// at that index until a go-back or reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Step {
    Story(StoryStep),
    Choice(ChoiceStep),
    Fill(FillStep),
    Feedback(FeedbackStep),
    PickRead(PickReadStep),
    Ad(AdStep),
    End(EndStep),
    CookGame(CookGameStep),
    #[serde(other)]
    Unknown,
}

impl Step {
    /// The tag name this step carries in authored JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Step::Story(_) => "story",
            Step::Choice(_) => "choice",
            Step::Fill(_) => "fill",
            Step::Feedback(_) => "feedback",
            Step::PickRead(_) => "pick-read",
            Step::Ad(_) => "ad",
            Step::End(_) => "end",
            Step::CookGame(_) => "cook-game",
            Step::Unknown => "unknown",
        }
    }

    /// The static "return to step N" link carried by narrative and feedback
    /// steps (resolver rule 3).
    pub fn static_next(&self) -> Option<usize> {
        match self {
            Step::Story(story) => story.next,
            Step::Feedback(feedback) => feedback.next,
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Step::Story(s) => s.title.as_deref(),
            Step::Choice(s) => s.title.as_deref(),
            Step::Fill(s) => s.title.as_deref(),
            Step::Feedback(s) => s.title.as_deref(),
            Step::PickRead(s) => s.title.as_deref(),
            Step::CookGame(s) => s.title.as_deref(),
            Step::Ad(_) | Step::End(_) | Step::Unknown => None,
        }
    }

    /// Opaque background asset reference, passed through to the renderer.
    pub fn background_image(&self) -> Option<&str> {
        match self {
            Step::Story(s) => s.background_image.as_deref(),
            Step::Choice(s) => s.background_image.as_deref(),
            Step::Fill(s) => s.background_image.as_deref(),
            Step::Feedback(s) => s.background_image.as_deref(),
            Step::PickRead(s) => s.background_image.as_deref(),
            Step::Ad(s) => s.background_image.as_deref(),
            Step::End(s) => s.background_image.as_deref(),
            Step::CookGame(_) | Step::Unknown => None,
        }
    }
}

/// A narrative step: a single paragraph or an ordered list of dialogue lines,
/// optionally revealed incrementally ("typewriter").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryStep {
    pub title: Option<String>,
    /// Single-paragraph form. Ignored when `dialogue` is non-empty.
    pub content: Option<String>,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    /// Enables incremental reveal of the current line.
    #[serde(default)]
    pub typewriter: bool,
    /// Audio cue played on step entry and stopped on exit.
    pub audio_url: Option<String>,
    pub background_image: Option<String>,
    /// Static jump taken after the last line (resolver rule 3).
    pub next: Option<usize>,
}

/// One line of dialogue within a story step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub speaker: Option<String>,
    pub text: String,
    pub avatar: Option<String>,
}

/// A selectable option shared by `choice` and `pick-read` steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    pub value: String,
    /// Per-option feedback text shown after a single-select pick, before
    /// confirmation.
    pub feedback: Option<String>,
}

/// A mutually-exclusive or multi-select question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceStep {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub multiple: bool,
    /// The single value that counts as a success.
    pub success_value: Option<String>,
    /// The set of values that must all be selected for a multi-select
    /// success.
    pub success_values: Option<Vec<String>>,
    /// Per-option jump table: maps a selected value directly to a target
    /// index, taking precedence over all success/fail logic.
    pub option_next: Option<AHashMap<String, usize>>,
    pub success_next: Option<usize>,
    pub fail_next: Option<usize>,
    pub background_image: Option<String>,
}

/// A labeled input field within a `fill` step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    pub placeholder: Option<String>,
    /// Carried opaquely for the presentation layer; the engine does not grade
    /// answers.
    pub correct_answer: Option<String>,
}

/// A form step. Validation failure blocks without transitioning; there is no
/// fail-jump path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillStep {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    pub success_next: Option<usize>,
    pub background_image: Option<String>,
}

/// A rating/comment step, also used by scripts as a plain "try again" page
/// with a static `next` link back to the step being retried.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStep {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Whether a star rating is collected (and required).
    #[serde(default)]
    pub rating: bool,
    /// Whether a free-text comment is collected.
    #[serde(default)]
    pub comment: bool,
    pub rating_label: Option<String>,
    pub comment_label: Option<String>,
    /// Minimum rating counted as a success. Absent means always success.
    pub min_rating: Option<u8>,
    pub success_next: Option<usize>,
    pub fail_next: Option<usize>,
    /// Static jump link (resolver rule 3).
    pub next: Option<usize>,
    pub button_text: Option<String>,
    pub background_image: Option<String>,
}

/// Like `choice`, but a correct pick with an audio cue is read aloud before
/// the transition: the first confirm plays the cue, the second transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickReadStep {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub multiple: bool,
    pub success_value: Option<String>,
    pub success_values: Option<Vec<String>>,
    pub success_next: Option<usize>,
    pub fail_next: Option<usize>,
    /// Cue played on a successful pick, gating the transition.
    pub audio_url: Option<String>,
    pub background_image: Option<String>,
}

/// A terminal interstitial: claiming reveals a fixed reward and offers no
/// further transition. Leaving requires navigating back to the menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdStep {
    pub button_text: Option<String>,
    pub reward_image: Option<String>,
    pub background_image: Option<String>,
}

/// Displays a completion message and a restart action. Restart resets the
/// index to 0 (or invokes the controller's restart hook) without consulting
/// the resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndStep {
    pub message: Option<String>,
    pub button_text: Option<String>,
    pub background_image: Option<String>,
}

/// An ingredient available in the cooking mini-game's pantry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

/// A dish the cooking mini-game can produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// Pantry ids; matched against the assembled slots as an exact multiset.
    pub ingredients: Vec<String>,
    pub image: Option<String>,
}

fn default_slots() -> usize {
    3
}

/// The self-contained cooking mini-game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookGameStep {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub pantry_items: Vec<PantryItem>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Number of ingredient slots to fill before cooking.
    #[serde(default = "default_slots")]
    pub slots: usize,
}

impl Default for CookGameStep {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            pantry_items: Vec::new(),
            recipes: Vec::new(),
            slots: default_slots(),
        }
    }
}
