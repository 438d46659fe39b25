//! # Headless Demo
//!
//! Runs the menu and confirm dialog through the real frame loop with a
//! recording backend and a scripted player: open the dialog, confirm it,
//! then press the quit button.
//!
//! ## Usage
//!
//! ```bash
//! headless_demo [config/display.toml]
//! ```

use kiln::MenuScreen;
use kiln_ui::{
    Display, DisplayConfig, DrawBackend, InputEvents, RecordingBackend, ScriptedInput, UiResult,
};
use std::process::ExitCode;

fn run(config: DisplayConfig) -> UiResult<()> {
    let (width, height) = (config.screen_width, config.screen_height);
    let backend = RecordingBackend::new(width, height);
    let mut display = Display::new(backend, ScriptedInput::new(), config)?;

    let menu = MenuScreen::new();
    let confirmations = menu.confirmations();
    display.push_screen(menu);

    // Both the open button and the OK button sit at the center of the screen.
    // A window-close event follows in case the quit button was missed.
    let (cx, cy) = (width / 2.0, height / 2.0);
    let (quit_x, quit_y) = MenuScreen::quit_button_center(width, height);
    display
        .input_mut()
        .end_frame()
        .end_frame()
        .click(cx, cy)
        .click(cx, cy)
        .click(quit_x, quit_y)
        .push(InputEvents::quit());

    let frames = display.main_loop();
    let backend = display.backend();

    println!("Frames rendered:    {frames}");
    println!("Frames presented:   {}", backend.frames_presented());
    println!("Draw commands:      {}", backend.commands().len());
    println!("Confirmations:      {}", confirmations.get());
    println!("Screens remaining:  {}", display.screen_count());
    println!("Elapsed ticks (ms): {}", backend.ticks());
    Ok(())
}

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         KILN HEADLESS DEMO                                       ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => match DisplayConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => DisplayConfig::default(),
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Demo failed: {e}");
            ExitCode::FAILURE
        }
    }
}
