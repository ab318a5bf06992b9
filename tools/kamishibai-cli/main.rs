use clap::Parser;
use kamishibai::prelude::*;
use std::fs;
use std::io::{self, Write};

/// A terminal player for branching visual-novel flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a script JSON file to register alongside the built-in flows
    script_path: Option<String>,

    /// Treat the script file as legacy records with nested `content` objects
    #[arg(long)]
    legacy: bool,

    /// Validate the script file and exit without playing
    #[arg(long)]
    check: bool,

    /// Start directly in the given flow, skipping the menu
    #[arg(short, long)]
    flow: Option<String>,
}

/// Prints audio cues instead of playing them.
struct StdoutAudio;

impl AudioPlayer for StdoutAudio {
    fn play(&mut self, url: &str) -> std::result::Result<(), AudioError> {
        println!("  [audio: {url}]");
        Ok(())
    }

    fn stop(&mut self) {}
}

/// What the player should do after handling one round of input.
enum Command {
    Stay,
    Menu,
    Back,
    Quit,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut registry = ScriptRegistry::builtin()
        .unwrap_or_else(|e| exit_with_error(&format!("Built-in scripts failed to load: {}", e)));

    if let Some(path) = &cli.script_path {
        let script = load_script(path, cli.legacy);
        if cli.check {
            println!("{}: {} steps, all jump targets in range.", path, script.len());
            return;
        }
        registry.insert("custom", script);
    } else if cli.check {
        exit_with_error("--check requires a script path.");
    }

    let mut controller = FlowController::with_audio(registry, StdoutAudio);
    if let Some(flow) = &cli.flow {
        controller.select_flow(flow);
    }

    loop {
        let command = match controller.view_mode() {
            ViewMode::Menu => run_menu(&mut controller),
            ViewMode::Flow => play_step(&mut controller),
        };
        match command {
            Command::Stay => {}
            Command::Menu => controller.return_to_menu(),
            Command::Back => controller.go_back(),
            Command::Quit => return,
        }
    }
}

fn load_script(path: &str, legacy: bool) -> Script {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));

    let script = if legacy {
        let records: Vec<serde_json::Value> = serde_json::from_str(&json)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)));
        LegacyRecords(records)
            .into_script()
            .unwrap_or_else(|e| exit_with_error(&format!("Legacy conversion failed: {}", e)))
    } else {
        Script::from_json(&json)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
    };

    script
        .validate()
        .unwrap_or_else(|e| exit_with_error(&format!("Script validation failed: {}", e)));
    script
}

fn run_menu(controller: &mut FlowController<StdoutAudio>) -> Command {
    println!("\n--- Kamishibai Story Menu ---");
    let ids: Vec<String> = controller
        .registry()
        .ids()
        .into_iter()
        .map(str::to_string)
        .collect();
    for (number, id) in ids.iter().enumerate() {
        println!("  {}: {}", number + 1, id);
    }

    let input = prompt_for_input("Select a story, or 'q' to quit", Some("1"));
    if input == "q" {
        return Command::Quit;
    }

    let selected = match input.parse::<usize>() {
        Ok(number) if (1..=ids.len()).contains(&number) => &ids[number - 1],
        _ => input.as_str(),
    };
    controller.select_flow(selected);
    Command::Stay
}

/// Renders the active step and handles one round of input for it.
fn play_step(controller: &mut FlowController<StdoutAudio>) -> Command {
    let step = controller
        .active_step()
        .unwrap_or_else(|| exit_with_error("No active step in flow mode."));

    println!();
    if let Some(title) = step.title() {
        println!("=== {} ===", title);
    }

    match controller.session_mut() {
        Some(StepSession::Story(_)) => play_story(controller),
        Some(StepSession::Choice(_)) => play_choice(controller),
        Some(StepSession::Fill(_)) => play_fill(controller),
        Some(StepSession::Feedback(_)) => play_feedback(controller),
        Some(StepSession::PickRead(_)) => play_pick_read(controller),
        Some(StepSession::Ad(_)) => play_ad(controller),
        Some(StepSession::CookGame(_)) => play_cook_game(controller),
        Some(StepSession::End) => play_end(controller),
        Some(StepSession::Inert) | None => {
            println!("This part of the story is not available.");
            read_command("'back' or 'menu'")
        }
    }
}

fn play_story(controller: &mut FlowController<StdoutAudio>) -> Command {
    let Some(StepSession::Story(session)) = controller.session_mut() else {
        return Command::Stay;
    };
    // The terminal has no frame timer; drain the reveal and show full lines.
    while session.tick() {}
    if let Some(text) = session.visible_text() {
        println!("{}", text);
    }

    let input = prompt_for_input("Enter to continue", None);
    match parse_nav(&input) {
        None => {}
        Some(Command::Stay) => return Command::Stay,
        Some(other) => return other,
    }

    let Some(StepSession::Story(session)) = controller.session_mut() else {
        return Command::Stay;
    };
    if let StoryAdvance::Complete(event) = session.advance() {
        controller.advance(event);
    }
    Command::Stay
}

fn play_choice(controller: &mut FlowController<StdoutAudio>) -> Command {
    let Some(Step::Choice(step)) = controller.active_step() else {
        return Command::Stay;
    };
    if let Some(description) = &step.description {
        println!("{}", description);
    }
    let values = print_options(&step.options);
    let multiple = step.multiple;

    loop {
        let prompt = if multiple {
            "Pick options (toggle), then 'done'"
        } else {
            "Pick an option"
        };
        let input = prompt_for_input(prompt, None);
        match parse_command(&input) {
            Some(Command::Stay) | None => {}
            Some(other) => return other,
        }

        let Some(StepSession::Choice(session)) = controller.session_mut() else {
            return Command::Stay;
        };
        if input == "done" || (!multiple && resolve_option(&values, &input).is_none() && input.is_empty()) {
            // fall through to confirm below
        } else if let Some(value) = resolve_option(&values, &input) {
            session.select(&value);
            if let Some(feedback) = session.pending_feedback() {
                println!("  ({})", feedback);
            }
            if multiple {
                println!("  selected: {:?}", session.selected());
                continue;
            }
        } else {
            println!("Unknown option '{}'.", input);
            continue;
        }

        match session.confirm() {
            Ok(event) => {
                controller.advance(event);
                return Command::Stay;
            }
            Err(error) => println!("  {}", error),
        }
    }
}

fn play_fill(controller: &mut FlowController<StdoutAudio>) -> Command {
    let Some(Step::Fill(step)) = controller.active_step() else {
        return Command::Stay;
    };
    if let Some(description) = &step.description {
        println!("{}", description);
    }
    let fields: Vec<(String, String)> = step
        .fields
        .iter()
        .map(|field| (field.id.clone(), field.label.clone()))
        .collect();

    for (id, label) in &fields {
        let value = prompt_for_input(label, None);
        match parse_command(&value) {
            Some(Command::Stay) | None => {}
            Some(other) => return other,
        }
        if let Some(StepSession::Fill(session)) = controller.session_mut() {
            session.set_field(id, value);
        }
    }

    let Some(StepSession::Fill(session)) = controller.session_mut() else {
        return Command::Stay;
    };
    match session.confirm() {
        Ok(event) => controller.advance(event),
        Err(error) => {
            println!("  {}", error);
            if let Some(StepSession::Fill(session)) = controller.session() {
                for field_error in session.errors() {
                    println!("    - {}", field_error.message);
                }
            }
        }
    }
    Command::Stay
}

fn play_feedback(controller: &mut FlowController<StdoutAudio>) -> Command {
    let Some(Step::Feedback(step)) = controller.active_step() else {
        return Command::Stay;
    };
    if let Some(description) = &step.description {
        println!("{}", description);
    }
    let wants_rating = step.rating;
    let wants_comment = step.comment;
    let rating_label = step.rating_label.clone().unwrap_or_else(|| "Rating (1-5)".to_string());
    let comment_label = step.comment_label.clone().unwrap_or_else(|| "Comment".to_string());
    let button = step.button_text.clone().unwrap_or_else(|| "Continue".to_string());

    if !wants_rating && !wants_comment {
        // Plain "try again" page: just the button.
        let input = prompt_for_input(&format!("[{}] Enter to continue", button), None);
        match parse_command(&input) {
            Some(Command::Stay) | None => {}
            Some(other) => return other,
        }
    }
    if wants_rating {
        let input = prompt_for_input(&rating_label, None);
        match parse_command(&input) {
            Some(Command::Stay) | None => {}
            Some(other) => return other,
        }
        if let (Ok(stars), Some(StepSession::Feedback(session))) =
            (input.parse::<u8>(), controller.session_mut())
        {
            session.set_rating(stars);
        }
    }
    if wants_comment {
        let input = prompt_for_input(&comment_label, None);
        match parse_command(&input) {
            Some(Command::Stay) | None => {}
            Some(other) => return other,
        }
        if let Some(StepSession::Feedback(session)) = controller.session_mut() {
            session.set_comment(input);
        }
    }

    let Some(StepSession::Feedback(session)) = controller.session_mut() else {
        return Command::Stay;
    };
    match session.confirm() {
        Ok(event) => controller.advance(event),
        Err(error) => println!("  {}", error),
    }
    Command::Stay
}

fn play_pick_read(controller: &mut FlowController<StdoutAudio>) -> Command {
    let Some(Step::PickRead(step)) = controller.active_step() else {
        return Command::Stay;
    };
    if let Some(description) = &step.description {
        println!("{}", description);
    }
    let values = print_options(&step.options);

    loop {
        let cued = matches!(
            controller.session(),
            Some(StepSession::PickRead(session)) if session.audio_played()
        );
        let prompt = if cued {
            "Listening... Enter to continue"
        } else {
            "Pick an option"
        };
        let input = prompt_for_input(prompt, None);
        match parse_command(&input) {
            Some(Command::Stay) | None => {}
            Some(other) => return other,
        }

        if !cued {
            let Some(value) = resolve_option(&values, &input) else {
                println!("Unknown option '{}'.", input);
                continue;
            };
            if let Some(StepSession::PickRead(session)) = controller.session_mut() {
                session.select(&value);
            }
        }

        match controller.confirm_pick_read() {
            Ok(ConfirmOutcome::Advanced) => return Command::Stay,
            Ok(ConfirmOutcome::AudioCued) => {}
            Ok(ConfirmOutcome::Ignored) => return Command::Stay,
            Err(error) => println!("  {}", error),
        }
    }
}

fn play_ad(controller: &mut FlowController<StdoutAudio>) -> Command {
    let Some(Step::Ad(step)) = controller.active_step() else {
        return Command::Stay;
    };
    let button = step.button_text.clone().unwrap_or_else(|| "Claim".to_string());

    let input = prompt_for_input(&format!("[{}] Enter to claim", button), None);
    match parse_nav(&input) {
        None => {}
        Some(Command::Stay) => return Command::Stay,
        Some(other) => return other,
    }

    if let Some(StepSession::Ad(session)) = controller.session_mut() {
        session.claim();
        if let Some(image) = session.reward_image() {
            println!("  Reward unlocked: {}", image);
        }
    }
    println!("That's all for this story. Type 'menu' to choose another.");
    let input = prompt_for_input("'menu' or 'q'", None);
    parse_nav(&input).unwrap_or(Command::Stay)
}

fn play_end(controller: &mut FlowController<StdoutAudio>) -> Command {
    let Some(Step::End(step)) = controller.active_step() else {
        return Command::Stay;
    };
    if let Some(message) = &step.message {
        println!("{}", message);
    }
    let button = step.button_text.clone().unwrap_or_else(|| "Restart".to_string());

    let input = prompt_for_input(&format!("[{}] Enter to restart", button), None);
    match parse_nav(&input) {
        None => {}
        Some(Command::Stay) => return Command::Stay,
        Some(other) => return other,
    }
    controller.advance(CompletionEvent::deferred());
    Command::Stay
}

fn play_cook_game(controller: &mut FlowController<StdoutAudio>) -> Command {
    loop {
        let Some(StepSession::CookGame(game)) = controller.session() else {
            return Command::Stay;
        };
        println!("\nSlots: {:?}", game.slots());

        let input = prompt_for_input(
            "Ingredient word, 'pantry', 'cookbook', 'clear <slot>' or 'cook'",
            None,
        );
        match parse_nav(&input) {
            None => {}
            Some(Command::Stay) => continue,
            Some(other) => return other,
        }

        match input.as_str() {
            "pantry" => {
                let Some(StepSession::CookGame(game)) = controller.session() else {
                    return Command::Stay;
                };
                for item in game.pantry() {
                    println!("  - {} ({})", item.name, item.id);
                }
            }
            "cookbook" => {
                let unlocked = controller.unlocked_recipes().clone();
                let Some(StepSession::CookGame(game)) = controller.session() else {
                    return Command::Stay;
                };
                for entry in game.cookbook(&unlocked) {
                    match entry.name {
                        Some(name) => println!("  - {}: {:?}", name, entry.ingredients.unwrap_or(&[])),
                        None => println!("  - ??? (locked)"),
                    }
                }
            }
            "cook" => {
                match controller.cook() {
                    Some(result) => {
                        println!("  {}", result.message);
                        // Dismissing hands control back to the flow.
                        controller.dismiss_cook_result();
                        return Command::Stay;
                    }
                    None => println!("  Fill every slot before cooking."),
                }
            }
            other if other.starts_with("clear ") => {
                let slot = other.trim_start_matches("clear ").trim().parse::<usize>();
                if let (Ok(slot), Some(StepSession::CookGame(game))) =
                    (slot, controller.session_mut())
                {
                    game.clear_slot(slot);
                }
            }
            word => {
                let Some(StepSession::CookGame(game)) = controller.session_mut() else {
                    return Command::Stay;
                };
                if !game.add_ingredient(word) {
                    println!("  All slots are full. 'cook' or 'clear <slot>' first.");
                }
            }
        }
    }
}

/// Prints numbered options and returns their values for input resolution.
fn print_options(options: &[ChoiceOption]) -> Vec<String> {
    for (number, option) in options.iter().enumerate() {
        println!("  {}: {}", number + 1, option.label);
    }
    options.iter().map(|option| option.value.clone()).collect()
}

/// Resolves a numbered pick or a literal value to an option value.
fn resolve_option(values: &[String], input: &str) -> Option<String> {
    if let Ok(number) = input.parse::<usize>() {
        if (1..=values.len()).contains(&number) {
            return Some(values[number - 1].clone());
        }
    }
    values.iter().find(|value| *value == input).cloned()
}

/// Reads one line and maps the global navigation words.
fn read_command(prompt: &str) -> Command {
    let input = prompt_for_input(prompt, None);
    parse_command(&input).unwrap_or(Command::Stay)
}

fn parse_command(input: &str) -> Option<Command> {
    match input {
        "menu" => Some(Command::Menu),
        "back" => Some(Command::Back),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

/// Navigation words for steps whose contract offers no "previous" action
/// (story, ad, end, cook-game): 'back' is swallowed with a notice.
fn parse_nav(input: &str) -> Option<Command> {
    match parse_command(input) {
        Some(Command::Back) => {
            println!("  This step has no 'back'.");
            Some(Command::Stay)
        }
        other => other,
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
