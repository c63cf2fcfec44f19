//! Barrowdark - Entry Point
//!
//! Initializes the terminal, loads or creates a game, and runs the
//! blocking turn loop.

use std::fs::OpenOptions;
use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use barrowdark::data::GameData;
use barrowdark::game::{tick, Command, Game, TurnOutcome};
use barrowdark::rng::Dice;
use barrowdark::save;
use barrowdark::ui::App;

fn main() -> Result<()> {
    // Log to a file so the TUI stays clean
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("barrowdark.log")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Barrowdark v{}", env!("CARGO_PKG_VERSION"));

    let data = GameData::load()?;
    let mut game = if save::save_exists() {
        match save::load_game(data.clone()) {
            Ok(game) => game,
            Err(err) => {
                log::warn!("could not load save, starting fresh: {err}");
                Game::new(data, Dice::from_entropy())
            }
        }
    } else {
        Game::new(data, Dice::from_entropy())
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_game_loop(&mut terminal, &mut app, &mut game);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Game exited with error: {e}");
        eprintln!("Error: {e}");
    }

    // A finished run deletes its save; an abandoned one keeps it
    if game.is_over() {
        if let Err(err) = save::delete_save() {
            log::warn!("could not delete save: {err}");
        }
    } else if let Err(err) = save::save_game(&game) {
        log::warn!("could not save on exit: {err}");
    }

    log::info!("Barrowdark shut down cleanly");
    result
}

/// Blocking turn loop: draw, wait for a key, run one tick
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut Game,
) -> Result<()> {
    // Settle the fresh floor before the first draw
    tick(game, Command::None)?;

    loop {
        terminal.draw(|frame| app.render(frame, game))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let command = app.handle_key(key, game);
        if tick(game, command)? == TurnOutcome::Quit {
            break;
        }
    }

    Ok(())
}
