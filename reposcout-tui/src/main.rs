//! reposcout-tui - Terminal UI for Reposcout
//!
//! Search a GitHub user, read their profile and browse their repositories.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use libreposcout::logging::{config_from_env, LogTarget};
use libreposcout::Config;
use reposcout_tui::{
    app::event::EventHandler,
    services::ServiceHandle,
    terminal::{TerminalSession, Tui},
    App, AppState, TuiError,
};

#[derive(Parser, Debug)]
#[command(name = "reposcout-tui", version)]
#[command(about = "Search GitHub users and browse their repositories", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $REPOSCOUT_CONFIG or the user config dir)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Search for this user id on start
    #[arg(short, long, value_name = "ID")]
    user: Option<String>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Use built-in sample data instead of the GitHub API (try "octocat")
    #[arg(long)]
    offline_demo: bool,

    /// Do not probe the network before searching
    #[arg(long)]
    skip_connectivity: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<TuiError>()
            .map(TuiError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.log_file {
        let mut logging = config_from_env().with_target(LogTarget::File(path.clone()));
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        logging
            .init()
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_at(path),
        None => Config::load(),
    }
    .map_err(TuiError::from)?;
    if cli.skip_connectivity {
        config.search.skip_connectivity_check = true;
    }

    let services = if cli.offline_demo {
        tracing::info!("Starting in offline demo mode");
        ServiceHandle::offline_demo(&config)?
    } else {
        ServiceHandle::from_config(&config)?
    };

    let mut terminal = TerminalSession::enter()?;

    let result = run_app(&mut terminal, services, cli.user.as_deref());

    terminal.restore()?;

    result.map_err(Into::into)
}

fn run_app(terminal: &mut Tui, services: ServiceHandle, user: Option<&str>) -> reposcout_tui::Result<()> {
    let mut app = App::new(services, AppState::new());

    let event_handler = EventHandler::new(app.state.config.tick_rate_ms)
        .with_service_events(app.services().subscribe());

    if let Some(user) = user {
        app.start_search(user);
    }

    loop {
        terminal.draw(|frame| app.render(frame))?;

        let event = event_handler.next()?;
        app.handle_event(event);

        // Fold every queued view-model event before the next frame
        while let Some(event) = event_handler.next_service_event() {
            app.handle_event(event);
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}
