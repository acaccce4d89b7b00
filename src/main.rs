//! Main entry point for the episode-browser CLI application.

use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use episode_browser::config::Config;
use episode_browser::tui::{Action, App, draw, poll_event};
use episode_browser::types::load_episodes;
use log::{debug, info, warn};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Command-line arguments for the episode-browser application.
#[derive(Parser, Debug)]
#[command(
    name = "episode-browser",
    version,
    about = "Browse and pick episodes in the terminal",
    long_about = "Page through an episode list loaded from JSON and pick one to play. \
                  The id of the picked episode is printed on exit."
)]
struct Args {
    /// JSON file containing an array of episodes ({"id", "number", "title", "image"})
    #[arg(required_unless_present = "write_config")]
    episodes: Option<PathBuf>,

    /// Id of the episode that starts out selected
    #[arg(short, long)]
    selected: Option<String>,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Write the default config file if none exists, print its path and exit
    #[arg(long)]
    write_config: bool,
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    debug!("Log level set to {:?}", log_level);

    if args.write_config {
        let path = Config::create_default_if_missing()?;
        println!("{}", path.display());
        return Ok(());
    }

    let Some(episodes_path) = args.episodes else {
        eprintln!("Error: no episodes file given");
        std::process::exit(2);
    };

    // Load config
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    let episodes = match load_episodes(&episodes_path) {
        Ok(episodes) => episodes,
        Err(e) => {
            eprintln!(
                "Error: could not load episodes from '{}': {}",
                episodes_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    info!(
        "Loaded {} episodes from {}",
        episodes.len(),
        episodes_path.display()
    );

    let mut selected = args.selected.clone();

    let mut terminal = init_terminal()?;

    let mut app = App::new(
        Arc::from(episodes),
        selected.as_deref().unwrap_or_default(),
        config.keybindings.clone(),
        config.colors.resolve(),
    );

    let result = run_app(&mut terminal, &mut app, &mut selected);

    restore_terminal()?;
    result?;

    if let Some(id) = selected {
        println!("{}", id);
    }

    Ok(())
}

/// Run the event loop. The host owns the selection: activations reported by
/// the episode list are written back into it here.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    selected: &mut Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.handle_input(key) {
                Action::Quit => break,
                Action::SelectEpisode(id) => {
                    info!("Selected episode {}", id);
                    app.episode_list.set_selected_episode_id(&id);
                    *selected = Some(id);
                }
                Action::None => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
