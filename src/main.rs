//! # Pokédex CLI Entry Point
//!
//! This is the main entry point for the Pokédex TUI application.
//!
//! ## Overview
//!
//! Type a Pokémon name, press Enter, and the view shows its sprite, its types
//! and its first five moves, as returned by the public PokéAPI.
//!
//! ## Usage
//!
//! ```bash
//! # Search against the public API
//! pokedex
//!
//! # Pre-fill the input and search right away
//! pokedex --query pikachu
//!
//! # Use a different API root (e.g. through the dev proxy)
//! pokedex --base-url http://127.0.0.1:5173/api/api/v2
//!
//! # Run the development proxy: /api/* -> https://pokeapi.co/*
//! pokedex proxy --listen 127.0.0.1:5173
//! ```
//!
//! ## Key Bindings
//!
//! - any character - Edit the name
//! - `Backspace` - Delete the last character
//! - `Ctrl+u` - Clear the name
//! - `Enter` - Search
//! - `Esc` / `Ctrl+c` - Quit

use pokedex::api::PokeApiClient;
use pokedex::logging;
use pokedex::proxy::{self, ProxyConfig};
use pokedex::ui::{self, app::KeyAction, config::Config, theme::Theme, App, SearchDispatcher};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::net::SocketAddr;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Pokédex - look up a Pokémon by name
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Look up a Pokémon by name and see its sprite, types and moves", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Root of the lookup API (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Color theme (overrides the config file)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Pre-fill the search box and search on start
    #[arg(short, long, value_name = "NAME")]
    query: Option<String>,

    /// Log file for the TUI (default: the user data directory)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log debug details
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Forward /api/* to the remote API host for local development
    Proxy {
        /// Address to listen on
        #[arg(long, default_value = proxy::DEFAULT_LISTEN)]
        listen: SocketAddr,

        /// Host requests are forwarded to
        #[arg(long, default_value = proxy::DEFAULT_TARGET)]
        target: String,

        /// Path prefix to strip before forwarding
        #[arg(long, default_value = proxy::DEFAULT_PREFIX)]
        prefix: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Try to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        // Call the original panic hook
        original_hook(panic_info);
    }));

    // Run the application and ensure cleanup happens
    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<()> {
    if let Some(Command::Proxy {
        listen,
        target,
        prefix,
    }) = args.command
    {
        if let Err(e) = logging::init_stderr(args.verbose) {
            eprintln!("Warning: {}", e);
        }
        return proxy::serve(ProxyConfig {
            listen,
            target,
            prefix,
        })
        .await;
    }

    // Logging goes to a file: the terminal belongs to the UI
    match args.log_file.clone().or_else(logging::default_log_path) {
        Some(path) => {
            if let Err(e) = logging::init_file(&path, args.verbose) {
                eprintln!("Warning: Could not initialize logging: {:#}", e);
            }
        }
        None => eprintln!("Warning: Could not determine a log file location"),
    }

    let config = Config::load();
    let theme = resolve_theme(args.theme.as_deref(), &config)?;
    let base_url = args.base_url.unwrap_or(config.base_url);
    info!(%base_url, theme = theme.name, "starting");

    let client = PokeApiClient::new(base_url).context("Failed to create HTTP client")?;
    let mut dispatcher = SearchDispatcher::new(client);

    let mut app = App::new(theme.clone());
    if let Some(query) = args.query {
        app.set_query(query);
        dispatcher.submit(&mut app);
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut dispatcher, &mut event_reader);

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    Ok(())
}

/// Pick the theme: an explicit `--theme` must exist, a bad config value
/// falls back to the default.
fn resolve_theme(cli_theme: Option<&str>, config: &Config) -> Result<&'static Theme> {
    if let Some(name) = cli_theme {
        return match Theme::by_name(name) {
            Some(theme) => Ok(theme),
            None => {
                let known: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
                bail!("Unknown theme '{}' (available: {})", name, known.join(", "))
            }
        };
    }

    Ok(Theme::by_name(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme in config, using default");
        Theme::default_theme()
    }))
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

/// Apply one terminal event. Returns `false` once the app should exit.
fn handle_event(app: &mut App, dispatcher: &SearchDispatcher, event: Event) -> bool {
    if let Event::Key(key) = event {
        match app.handle_key(key) {
            KeyAction::Submit(lookup_key) => dispatcher.spawn_lookup(lookup_key),
            KeyAction::Quit => return false,
            KeyAction::None => {}
        }
    }

    !app.should_quit
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &mut SearchDispatcher,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    loop {
        // Apply lookups that finished since the last frame
        dispatcher.pump(app);

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        // Short timeout so finished lookups show up without a key press
        let poll_timeout = if app.loading {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        let event = match event_reader.read_event(poll_timeout)? {
            Some(e) => e,
            None => continue,
        };

        if !handle_event(app, dispatcher, event) {
            break;
        }
    }

    Ok(())
}
