//! Tests for the cooking mini-game: slot assembly, recipe matching, the
//! unlocked cookbook and the result popup lifecycle.
mod common;
use common::*;
use kamishibai::prelude::*;

#[test]
fn ingredients_are_normalized_into_the_first_empty_slot() {
    let mut game = CookGameSession::new(&cook_step());
    assert!(game.add_ingredient("  Tomato "));
    assert!(game.add_ingredient("ONION"));
    assert!(!game.add_ingredient("   "));
    assert_eq!(
        game.slots(),
        [Some("tomato".to_string()), Some("onion".to_string()), None]
    );
    assert!(!game.can_cook());
}

#[test]
fn full_slots_reject_further_ingredients() {
    let mut game = CookGameSession::new(&cook_step());
    for token in ["tomato", "onion", "pasta"] {
        assert!(game.add_ingredient(token));
    }
    assert!(!game.add_ingredient("apple"));
    assert!(game.can_cook());
}

#[test]
fn clearing_a_slot_reopens_it() {
    let mut game = CookGameSession::new(&cook_step());
    game.add_ingredient("tomato");
    game.clear_slot(0);
    assert_eq!(game.slots(), [None, None, None]);
    // Out-of-range clears are ignored.
    game.clear_slot(99);
}

#[test]
fn cooking_with_empty_slots_is_rejected() {
    let mut game = CookGameSession::new(&cook_step());
    let mut unlocked = AHashSet::new();
    game.add_ingredient("tomato");
    assert!(game.cook(&mut unlocked).is_none());
    assert!(game.result().is_none());
}

#[test]
fn recipe_matching_is_order_independent() {
    let mut game = CookGameSession::new(&cook_step());
    let mut unlocked = AHashSet::new();
    for token in ["pasta", "tomato", "onion"] {
        game.add_ingredient(token);
    }

    let result = game.cook(&mut unlocked).unwrap();
    assert!(result.success);
    assert_eq!(result.recipe_id.as_deref(), Some("tomato-pasta"));
    assert_eq!(result.message, "Congratulations! You made Tomato Pasta!");
    assert!(unlocked.contains("tomato-pasta"));
}

#[test]
fn supersets_of_a_recipe_do_not_match() {
    // {tomato, onion, apple} contains the two-ingredient "duo" recipe but is
    // not equal to it, and matches nothing else either.
    let mut game = CookGameSession::new(&cook_step());
    let mut unlocked = AHashSet::new();
    for token in ["tomato", "onion", "apple"] {
        game.add_ingredient(token);
    }

    let result = game.cook(&mut unlocked).unwrap();
    assert!(!result.success);
    assert_eq!(result.message, "Sorry, your recipe doesn't match any known dish!");
    assert!(unlocked.is_empty());
}

#[test]
fn unknown_ingredients_fail_before_matching() {
    let mut game = CookGameSession::new(&cook_step());
    let mut unlocked = AHashSet::new();
    for token in ["tomato", "onion", "gravel"] {
        game.add_ingredient(token);
    }

    let result = game.cook(&mut unlocked).unwrap();
    assert!(!result.success);
    assert_eq!(result.message, "Some ingredients are not in your pantry!");
}

#[test]
fn unlocking_the_same_recipe_twice_is_idempotent() {
    let mut unlocked = AHashSet::new();
    for _ in 0..2 {
        let mut game = CookGameSession::new(&cook_step());
        for token in ["tomato", "onion", "pasta"] {
            game.add_ingredient(token);
        }
        assert!(game.cook(&mut unlocked).unwrap().success);
    }
    assert_eq!(unlocked.len(), 1);
}

#[test]
fn cookbook_redacts_locked_recipes() {
    let game = CookGameSession::new(&cook_step());
    let mut unlocked = AHashSet::new();
    unlocked.insert("tomato-pasta".to_string());

    let entries = game.cookbook(&unlocked);
    assert_eq!(entries.len(), 2);

    let pasta = entries.iter().find(|e| e.recipe_id == "tomato-pasta").unwrap();
    assert!(pasta.unlocked);
    assert_eq!(pasta.name, Some("Tomato Pasta"));
    assert_eq!(pasta.image, Some("/image/tomato-pasta.png"));
    assert_eq!(pasta.ingredients.map(<[String]>::len), Some(3));

    let duo = entries.iter().find(|e| e.recipe_id == "duo").unwrap();
    assert!(!duo.unlocked);
    assert_eq!(duo.name, None);
    assert_eq!(duo.image, None);
    assert_eq!(duo.ingredients, None);
}

#[test]
fn dismissing_the_result_clears_slots_and_hands_back_a_deferred_event() {
    let mut game = CookGameSession::new(&cook_step());
    let mut unlocked = AHashSet::new();
    for token in ["tomato", "onion", "pasta"] {
        game.add_ingredient(token);
    }
    game.cook(&mut unlocked);

    let event = game.dismiss_result().unwrap();
    assert!(event.success);
    assert_eq!(event.next_step_index, None);
    assert!(game.result().is_none());
    assert_eq!(game.slots(), [None, None, None]);

    // Nothing to dismiss the second time.
    assert!(game.dismiss_result().is_none());
}

#[test]
fn panel_browsing_is_independent_of_cooking_state() {
    let mut game = CookGameSession::new(&cook_step());
    assert_eq!(game.panel(), None);

    game.open_panel(PanelTab::Pantry);
    assert_eq!(game.panel(), Some(PanelTab::Pantry));
    assert_eq!(game.pantry().len(), 6);

    game.open_panel(PanelTab::Cookbook);
    assert_eq!(game.panel(), Some(PanelTab::Cookbook));
    game.close_panel();
    assert_eq!(game.panel(), None);
}
