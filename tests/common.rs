//! Common test utilities for building scripts, steps and test doubles.
use kamishibai::prelude::*;

/// A plain narrative step with a single paragraph.
#[allow(dead_code)]
pub fn story(content: &str) -> Step {
    Step::Story(StoryStep {
        content: Some(content.to_string()),
        ..StoryStep::default()
    })
}

/// A narrative step carrying a static "return to step N" link.
#[allow(dead_code)]
pub fn story_with_next(content: &str, next: usize) -> Step {
    Step::Story(StoryStep {
        content: Some(content.to_string()),
        next: Some(next),
        ..StoryStep::default()
    })
}

/// A dialogue story step, optionally revealed with the typewriter.
#[allow(dead_code)]
pub fn dialogue_story(lines: &[&str], typewriter: bool) -> StoryStep {
    StoryStep {
        dialogue: lines
            .iter()
            .map(|text| DialogueLine {
                speaker: None,
                text: text.to_string(),
                avatar: None,
            })
            .collect(),
        typewriter,
        ..StoryStep::default()
    }
}

/// An option whose id, label and value all share one string.
#[allow(dead_code)]
pub fn option(value: &str) -> ChoiceOption {
    ChoiceOption {
        id: value.to_string(),
        label: value.to_string(),
        value: value.to_string(),
        feedback: None,
    }
}

/// A single-select choice with a configured success value and both branches.
#[allow(dead_code)]
pub fn simple_choice(
    values: &[&str],
    success_value: &str,
    success_next: usize,
    fail_next: usize,
) -> ChoiceStep {
    ChoiceStep {
        options: values.iter().map(|v| option(v)).collect(),
        success_value: Some(success_value.to_string()),
        success_next: Some(success_next),
        fail_next: Some(fail_next),
        ..ChoiceStep::default()
    }
}

/// The retry-loop scenario:
/// `[story "A", choice(open/close, success=open, successNext=3, failNext=2), story(next=1), story "B"]`.
#[allow(dead_code)]
pub fn scenario_script() -> Script {
    Script::new(vec![
        story("A"),
        Step::Choice(simple_choice(&["open", "close"], "open", 3, 2)),
        story_with_next("Try again", 1),
        story("B"),
    ])
}

/// The cooking mini-game step used across cook tests.
#[allow(dead_code)]
pub fn cook_step() -> CookGameStep {
    CookGameStep {
        title: Some("Cooking".to_string()),
        pantry_items: ["tomato", "onion", "pasta", "lettuce", "cucumber", "apple"]
            .iter()
            .map(|id| PantryItem {
                id: id.to_string(),
                name: id.to_string(),
                image: None,
            })
            .collect(),
        recipes: vec![
            Recipe {
                id: "tomato-pasta".to_string(),
                name: "Tomato Pasta".to_string(),
                ingredients: vec!["tomato".to_string(), "onion".to_string(), "pasta".to_string()],
                image: Some("/image/tomato-pasta.png".to_string()),
            },
            Recipe {
                id: "duo".to_string(),
                name: "Tomato Onion Duo".to_string(),
                ingredients: vec!["tomato".to_string(), "onion".to_string()],
                image: None,
            },
        ],
        ..CookGameStep::default()
    }
}

/// A registry holding a single flow, which is also the default.
#[allow(dead_code)]
pub fn single_flow_registry(id: &str, script: Script) -> ScriptRegistry {
    ScriptRegistry::new(id, script)
}

/// Records every play/stop call; can be configured to fail playback.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<String>,
    pub stops: usize,
    pub fail_playback: bool,
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, url: &str) -> std::result::Result<(), AudioError> {
        if self.fail_playback {
            return Err(AudioError::PlaybackFailed {
                url: url.to_string(),
                message: "decoder unavailable".to_string(),
            });
        }
        self.played.push(url.to_string());
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}
