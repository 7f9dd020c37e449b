//! Fluxify - terminal movie and TV discovery
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! fluxify
//!
//! # CLI mode (for automation)
//! fluxify trending -t tv
//! fluxify discover --genre 878 --year 2014 --sort rating
//! fluxify synth 603 27205 157336 --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use fluxify::api::{Gateway, TmdbClient};
use fluxify::app::App;
use fluxify::cli::{Cli, Command, ExitCode, FavoritesAction, FavoritesCmd, Output};
use fluxify::store::{FavoritesStore, SynthesisEngine};
use fluxify::{commands, logging, ui, worker, Config};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        logging::init_stderr();
        run_cli(cli).await.into()
    } else {
        logging::init_file();
        match run_tui(&cli).await {
            Ok(()) => ExitCode::Success.into(),
            Err(e) => {
                eprintln!("fluxify: {:#}", e);
                ExitCode::Error.into()
            }
        }
    }
}

fn load_favorites(config: &Config) -> FavoritesStore {
    match config.favorites_path() {
        Some(path) => FavoritesStore::load(path),
        None => {
            warn!("no data directory, favorites will not persist");
            FavoritesStore::in_memory()
        }
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config = Config::load_from(cli.config.as_deref());

    // Listing favorites works offline, without a key
    if let Some(Command::Favorites(FavoritesCmd {
        action: FavoritesAction::List,
    })) = &cli.command
    {
        return commands::favorites_list_cmd(&load_favorites(&config), &output);
    }

    let api_key = match config.api_key() {
        Ok(key) => key,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };
    let client = TmdbClient::new(api_key, config.language());

    match cli.command {
        Some(Command::Trending(cmd)) => commands::trending_cmd(cmd, &client, &output).await,

        Some(Command::Discover(cmd)) => commands::discover_cmd(cmd, &client, &output).await,

        Some(Command::Genres(cmd)) => commands::genres_cmd(cmd, &client, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &client, &output).await,

        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &client, &output).await,

        Some(Command::Favorites(cmd)) => {
            let mut favorites = load_favorites(&config);
            commands::favorites_cmd(cmd, &mut favorites, &client, &output).await
        }

        Some(Command::Synth(cmd)) => {
            commands::synth_cmd(cmd, config.synthesis_delay(), &client, &output).await
        }

        // Handled by the is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: &Cli) -> Result<()> {
    // Fail before touching the terminal so the message stays readable
    let config = Config::load_from(cli.config.as_deref());
    let api_key = config.api_key()?;
    let gateway: Arc<dyn Gateway> = Arc::new(TmdbClient::new(api_key, config.language()));

    let favorites = load_favorites(&config);
    let synthesis = SynthesisEngine::new().with_delay(config.synthesis_delay());
    let mut app = App::new(favorites, synthesis);
    app.start();
    info!("tui started");

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, gateway).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, dispatches requests, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, gateway: Arc<dyn Gateway>) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel();

    while app.running {
        for request in app.take_requests() {
            worker::spawn(request, Arc::clone(&gateway), tx.clone());
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll on a blocking thread so spawned requests keep running
        let ready = tokio::task::block_in_place(|| event::poll(TICK_RATE))?;
        if ready {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(response) = rx.try_recv() {
            app.apply(response);
        }
    }

    Ok(())
}
