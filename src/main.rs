//! EduBridge - Onboarding Screen
//!
//! Runs the EduBridge onboarding screen in the terminal: a home view that
//! leads into a validated registration form submitted to a remote endpoint.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use edubridge::application::{App, SubmissionPipeline, ViewEffect};
use edubridge::domain::Tab;
use edubridge::infrastructure::{AppConfig, HttpRegistrationClient, init_logging};
use edubridge::presentation::{InputHandler, render_ui};

const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "edubridge", about = "EduBridge onboarding screen")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Registration endpoint, overrides the config file
    #[arg(long)]
    endpoint: Option<String>,
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the EduBridge onboarding screen.
///
/// Loads configuration, sets up logging and the terminal, then runs the
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, the log file cannot
/// be opened, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(log_file) = args.log_file {
        config.log_file = Some(log_file);
    }

    init_logging(config.log_file.as_deref(), args.verbose)?;
    tracing::info!(endpoint = %config.endpoint, "starting onboarding screen");

    let client = HttpRegistrationClient::new(config.endpoint.clone(), config.request_timeout())?;
    let pipeline = SubmissionPipeline::new(Arc::new(client));
    let mut app = App::new(pipeline, config.screen_settings(), Instant::now());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "onboarding screen exited with an error");
        println!("{err:?}");
    }

    Ok(())
}

/// Main event loop.
///
/// Polls for input with a short tick so the pending submission and the
/// acknowledgment timer advance while the user is idle.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        let now = Instant::now();
        app.update(now);
        for effect in app.take_effects() {
            match effect {
                ViewEffect::ScrollTo(tab) => {
                    tracing::debug!(?tab, "scrolling to tab");
                    terminal.clear()?;
                }
            }
        }

        terminal.draw(|f| render_ui(f, app, now))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Char('q') if app.tab() == Tab::Home => return Ok(()),
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            }
        }
    }
}
