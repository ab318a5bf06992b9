//! Integration tests for the flow controller: menu/flow lifecycle, step
//! transitions, resource teardown and the end-step restart.
mod common;
use common::*;
use kamishibai::prelude::*;

fn advance_story(controller: &mut FlowController<RecordingAudio>) {
    let event = loop {
        let Some(StepSession::Story(session)) = controller.session_mut() else {
            panic!("expected a story session at index {}", controller.current_index());
        };
        match session.advance() {
            StoryAdvance::Complete(event) => break event,
            StoryAdvance::NextLine | StoryAdvance::Settled => {}
        }
    };
    controller.advance(event);
}

#[test]
fn controller_starts_at_the_menu_with_no_active_step() {
    let controller = FlowController::new(single_flow_registry("demo", scenario_script()));
    assert_eq!(controller.view_mode(), ViewMode::Menu);
    assert!(controller.active_step().is_none());
    assert!(controller.session().is_none());
}

#[test]
fn selecting_a_flow_enters_its_first_step() {
    let mut controller = FlowController::new(single_flow_registry("demo", scenario_script()));
    controller.select_flow("demo");

    assert_eq!(controller.view_mode(), ViewMode::Flow);
    assert_eq!(controller.current_index(), 0);
    assert!(matches!(controller.session(), Some(StepSession::Story(_))));
}

#[test]
fn unknown_flow_id_falls_back_to_the_default_flow() {
    let mut controller = FlowController::new(single_flow_registry("demo", scenario_script()));
    controller.select_flow("no-such-flow");

    assert_eq!(controller.flow_id(), "demo");
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn retry_loop_scenario_walks_fail_and_success_branches() {
    // [story "A", choice(success=open, successNext=3, failNext=2),
    //  story(next=1), story "B"]
    let registry = single_flow_registry("demo", scenario_script());
    let mut controller = FlowController::with_audio(registry, RecordingAudio::default());
    controller.select_flow("demo");

    // Step 0: story "A" advances by default-next to the choice.
    advance_story(&mut controller);
    assert_eq!(controller.current_index(), 1);

    // Wrong pick: failNext routes to the retry page at index 2.
    let Some(StepSession::Choice(session)) = controller.session_mut() else {
        panic!("expected a choice session");
    };
    session.select("close");
    let event = session.confirm().unwrap();
    controller.advance(event);
    assert_eq!(controller.current_index(), 2);

    // The retry page's static next points back at the choice.
    advance_story(&mut controller);
    assert_eq!(controller.current_index(), 1);

    // Right pick: successNext routes to story "B".
    let Some(StepSession::Choice(session)) = controller.session_mut() else {
        panic!("expected a choice session");
    };
    session.select("open");
    let event = session.confirm().unwrap();
    controller.advance(event);
    assert_eq!(controller.current_index(), 3);
}

#[test]
fn entering_a_step_stops_audio_and_replaces_the_session() {
    let step = Step::Story(StoryStep {
        content: Some("A".to_string()),
        audio_url: Some("/audio/theme.mp3".to_string()),
        ..StoryStep::default()
    });
    let script = Script::new(vec![step, story("B")]);
    let mut controller = FlowController::with_audio(
        single_flow_registry("demo", script),
        RecordingAudio::default(),
    );

    controller.select_flow("demo");
    assert_eq!(controller.audio().played, ["/audio/theme.mp3".to_string()]);
    assert_eq!(controller.audio().stops, 1);

    advance_story(&mut controller);
    assert_eq!(controller.current_index(), 1);
    // Leaving the step stopped its audio; the new step cues nothing.
    assert_eq!(controller.audio().stops, 2);
    assert_eq!(controller.audio().played.len(), 1);
}

#[test]
fn failed_entry_audio_does_not_block_the_step() {
    let step = Step::Story(StoryStep {
        content: Some("A".to_string()),
        audio_url: Some("/audio/broken.mp3".to_string()),
        ..StoryStep::default()
    });
    let registry = single_flow_registry("demo", Script::new(vec![step]));
    let audio = RecordingAudio {
        fail_playback: true,
        ..RecordingAudio::default()
    };
    let mut controller = FlowController::with_audio(registry, audio);

    controller.select_flow("demo");
    assert!(matches!(controller.session(), Some(StepSession::Story(_))));
}

#[test]
fn go_back_decrements_and_floors_at_zero() {
    let mut controller = FlowController::new(single_flow_registry("demo", scenario_script()));
    controller.select_flow("demo");

    controller.advance(CompletionEvent::deferred());
    assert_eq!(controller.current_index(), 1);

    controller.go_back();
    assert_eq!(controller.current_index(), 0);
    controller.go_back();
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn go_back_rebuilds_the_session_fresh() {
    let mut controller = FlowController::new(single_flow_registry("demo", scenario_script()));
    controller.select_flow("demo");
    controller.advance(CompletionEvent::deferred());

    let Some(StepSession::Choice(session)) = controller.session_mut() else {
        panic!("expected a choice session");
    };
    session.select("open");

    controller.go_back();
    controller.advance(CompletionEvent::deferred());
    let Some(StepSession::Choice(session)) = controller.session() else {
        panic!("expected a choice session");
    };
    assert!(session.selected().is_empty());
}

#[test]
fn return_to_menu_stops_audio_and_drops_the_session() {
    let mut controller = FlowController::with_audio(
        single_flow_registry("demo", scenario_script()),
        RecordingAudio::default(),
    );
    controller.select_flow("demo");
    controller.advance(CompletionEvent::deferred());

    controller.return_to_menu();
    assert_eq!(controller.view_mode(), ViewMode::Menu);
    assert!(controller.session().is_none());
    assert!(controller.active_step().is_none());
    assert_eq!(controller.audio().stops, 3);

    // Re-selecting starts over at index 0.
    controller.select_flow("demo");
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn end_step_restarts_at_index_zero() {
    let script = Script::new(vec![
        story("A"),
        Step::End(EndStep {
            message: Some("Done".to_string()),
            ..EndStep::default()
        }),
    ]);
    let mut controller = FlowController::new(single_flow_registry("demo", script));
    controller.select_flow("demo");
    controller.advance(CompletionEvent::deferred());
    assert_eq!(controller.current_index(), 1);
    assert!(matches!(controller.session(), Some(StepSession::End)));

    controller.advance(CompletionEvent::deferred());
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.view_mode(), ViewMode::Flow);
}

#[test]
fn end_step_restart_honors_the_restart_hook() {
    let script = Script::new(vec![story("A"), story("B"), Step::End(EndStep::default())]);
    let mut controller = FlowController::new(single_flow_registry("demo", script));
    controller.set_restart_hook(|| 1);

    controller.select_flow("demo");
    controller.advance(CompletionEvent::deferred());
    controller.advance(CompletionEvent::deferred());
    assert_eq!(controller.current_index(), 2);

    controller.advance(CompletionEvent::deferred());
    assert_eq!(controller.current_index(), 1);
}

#[test]
fn unknown_step_type_stalls_until_go_back() {
    let json = r#"[
        { "type": "story", "content": "A" },
        { "type": "hologram", "intensity": 11 },
        { "type": "story", "content": "B" }
    ]"#;
    let script = Script::from_json(json).unwrap();
    let mut controller = FlowController::new(single_flow_registry("demo", script));
    controller.select_flow("demo");
    controller.advance(CompletionEvent::deferred());

    assert!(matches!(controller.active_step(), Some(Step::Unknown)));
    assert!(matches!(controller.session(), Some(StepSession::Inert)));

    // Advancing is an observable no-op; go-back still works.
    controller.advance(CompletionEvent::deferred());
    assert_eq!(controller.current_index(), 1);
    controller.go_back();
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn advance_in_menu_mode_is_a_no_op() {
    let mut controller = FlowController::new(single_flow_registry("demo", scenario_script()));
    controller.advance(CompletionEvent::deferred());
    assert_eq!(controller.view_mode(), ViewMode::Menu);
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn confirm_pick_read_gates_then_advances_through_the_controller() {
    let pick = Step::PickRead(PickReadStep {
        options: vec![option("leg"), option("arm")],
        success_value: Some("leg".to_string()),
        success_next: Some(2),
        fail_next: Some(1),
        audio_url: Some("/audio/leg.mp3".to_string()),
        ..PickReadStep::default()
    });
    let script = Script::new(vec![pick, story("fail"), story("success")]);
    let mut controller = FlowController::with_audio(
        single_flow_registry("demo", script),
        RecordingAudio::default(),
    );
    controller.select_flow("demo");

    let Some(StepSession::PickRead(session)) = controller.session_mut() else {
        panic!("expected a pick-read session");
    };
    session.select("leg");

    assert_eq!(controller.confirm_pick_read().unwrap(), ConfirmOutcome::AudioCued);
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.audio().played, ["/audio/leg.mp3".to_string()]);

    assert_eq!(controller.confirm_pick_read().unwrap(), ConfirmOutcome::Advanced);
    assert_eq!(controller.current_index(), 2);
}

#[test]
fn confirm_pick_read_on_another_step_is_ignored() {
    let mut controller = FlowController::new(single_flow_registry("demo", scenario_script()));
    controller.select_flow("demo");
    assert_eq!(controller.confirm_pick_read().unwrap(), ConfirmOutcome::Ignored);
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn cook_unlocks_persist_across_steps_within_the_controller() {
    let script = Script::new(vec![Step::CookGame(cook_step()), story("after")]);
    let mut controller = FlowController::new(single_flow_registry("demo", script));
    controller.select_flow("demo");

    {
        let Some(StepSession::CookGame(game)) = controller.session_mut() else {
            panic!("expected a cook-game session");
        };
        for token in ["tomato", "onion", "pasta"] {
            game.add_ingredient(token);
        }
    }

    let result = controller.cook().unwrap();
    assert!(result.success);
    assert!(controller.unlocked_recipes().contains("tomato-pasta"));

    // Dismissing the popup hands control back via default-next.
    controller.dismiss_cook_result();
    assert_eq!(controller.current_index(), 1);
    assert!(controller.unlocked_recipes().contains("tomato-pasta"));
}

#[test]
fn cook_on_another_step_returns_nothing() {
    let mut controller = FlowController::new(single_flow_registry("demo", scenario_script()));
    controller.select_flow("demo");
    assert!(controller.cook().is_none());
    controller.dismiss_cook_result();
    assert_eq!(controller.current_index(), 0);
}
