use crate::event::CompletionEvent;
use crate::script::StoryStep;

/// Incremental reveal state for a single line of text.
///
/// The engine is synchronous: the renderer drives the reveal by calling
/// [`Typewriter::tick`] from its own timer. Dropping the typewriter (which
/// happens whenever the underlying line changes or the step is exited)
/// cancels the sequence, so a stale timer can never mutate a step that is no
/// longer visible.
#[derive(Debug)]
pub struct Typewriter {
    text: String,
    revealed: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            revealed: 0,
        }
    }

    /// Reveals the next character. Returns whether the reveal is still in
    /// progress afterwards.
    pub fn tick(&mut self) -> bool {
        if !self.is_complete() {
            self.revealed += 1;
        }
        !self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.text.chars().count()
    }

    /// Settles the reveal, showing the full text at once.
    pub fn settle(&mut self) {
        self.revealed = self.text.chars().count();
    }

    /// The currently visible prefix of the line.
    pub fn visible(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map_or(self.text.len(), |(byte_index, _)| byte_index);
        &self.text[..end]
    }
}

/// What a story advance did.
#[derive(Debug)]
pub enum StoryAdvance {
    /// The in-progress reveal was settled to the full line; the dialogue
    /// pointer did not move.
    Settled,
    /// The press was consumed by the dialogue: moved to the next line, or
    /// acknowledged the last one. The flow index is unchanged.
    NextLine,
    /// The last line was already acknowledged; the event defers to
    /// default-next.
    Complete(CompletionEvent),
}

/// Dialogue pointer and reveal state for an active story step.
#[derive(Debug)]
pub struct StorySession {
    lines: Vec<String>,
    line_index: usize,
    acknowledged: bool,
    typewriter_enabled: bool,
    typewriter: Option<Typewriter>,
}

impl StorySession {
    pub fn new(step: &StoryStep) -> Self {
        let lines: Vec<String> = if step.dialogue.is_empty() {
            step.content.iter().cloned().collect()
        } else {
            step.dialogue.iter().map(|line| line.text.clone()).collect()
        };
        let typewriter = (step.typewriter && !lines.is_empty())
            .then(|| Typewriter::new(&lines[0]));
        Self {
            lines,
            line_index: 0,
            acknowledged: false,
            typewriter_enabled: step.typewriter,
            typewriter,
        }
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn current_line(&self) -> Option<&str> {
        self.lines.get(self.line_index).map(String::as_str)
    }

    /// The text the renderer should show right now: the revealed prefix while
    /// a typewriter is running, otherwise the full current line.
    pub fn visible_text(&self) -> Option<&str> {
        match &self.typewriter {
            Some(typewriter) => Some(typewriter.visible()),
            None => self.current_line(),
        }
    }

    /// Drives the reveal one character forward. Returns whether a reveal is
    /// still in progress.
    pub fn tick(&mut self) -> bool {
        self.typewriter.as_mut().is_some_and(Typewriter::tick)
    }

    /// Handles a "Next" press. While a reveal is in progress the press
    /// settles the current line instead of advancing; while dialogue lines
    /// remain it moves the pointer without touching the flow index. One press
    /// per line: the press on the last visible line acknowledges it, and only
    /// the following press completes, deferring to default-next. Three lines
    /// thus take three presses before the fourth changes the flow index.
    pub fn advance(&mut self) -> StoryAdvance {
        if let Some(typewriter) = &mut self.typewriter {
            if !typewriter.is_complete() {
                typewriter.settle();
                return StoryAdvance::Settled;
            }
        }

        if self.line_index + 1 < self.lines.len() {
            self.line_index += 1;
            if self.typewriter_enabled {
                // Supersede the old reveal; the line changed.
                self.typewriter = Some(Typewriter::new(&self.lines[self.line_index]));
            }
            return StoryAdvance::NextLine;
        }

        if !self.acknowledged && !self.lines.is_empty() {
            self.acknowledged = true;
            return StoryAdvance::NextLine;
        }

        StoryAdvance::Complete(CompletionEvent::deferred())
    }
}
