mod app;
mod config;
mod domain;
mod input;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{TaskListStore, View};
use persistence::{ensure_dir, get_data_dir, init_local_data_dir, KeyValueDocument, KeyValueStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;

/// Log file written inside the data directory
const LOG_FILE_NAME: &str = "flowspace.log";

#[derive(Parser)]
#[command(name = "flowspace")]
#[command(about = "A keyboard-driven task list with a pomodoro focus dashboard", long_about = None)]
struct Cli {
    /// Path to a config.toml (defaults to <data-dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use this data directory instead of the discovered one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .flowspace directory in the current directory
    Init,
    /// Open the focus dashboard instead of the task list
    Dashboard,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            println!("Initialized flowspace directory: {}", data_dir.display());
            println!();
            println!("Flowspace will now use this local directory for task storage.");
            println!("Run 'flowspace' to open your list.");
            Ok(())
        }
        Some(Commands::Dashboard) => run_tui(&cli, View::Dashboard),
        None => run_tui(&cli, View::List),
    }
}

/// Initialize file-based logging.
///
/// Logs go to a file, never stdout, since ratatui owns the terminal. The
/// returned guard must be held until shutdown so buffered entries flush.
fn init_logging(level: &str, data_dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    guard
}

fn run_tui(cli: &Cli, view: View) -> Result<()> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => get_data_dir()?,
    };
    ensure_dir(&data_dir)?;

    let config = Config::load(cli.config.as_deref(), &data_dir).context("Failed to load configuration")?;
    let _guard = init_logging(&config.logging.level, &data_dir);

    eprintln!("Using flowspace directory: {}", data_dir.display());
    tracing::info!(data_dir = %data_dir.display(), view = ?view, "flowspace starting");

    let kv_store = KeyValueStore::open(&data_dir)?;
    tracing::debug!(dir = %kv_store.dir().display(), "opened key-value store");
    let document = KeyValueDocument::new(kv_store);
    let store = TaskListStore::mount(Box::new(document))?;
    let mut app = AppState::new(store, view, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ticker::tick_duration(Some(config.ui.tick_ms)));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("{:#}", err);
        eprintln!("Error: {:#}", err);
    }
    tracing::info!("flowspace exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_rate: std::time::Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    match input::handle_key(app, key) {
                        Ok(true) => return Ok(()),
                        Ok(false) => {}
                        // Storage failures are shown, not fatal
                        Err(err) => app.report_error(&err),
                    }
                }
            }
        }

        // Apply due timer seconds
        app.tick();
    }
}
