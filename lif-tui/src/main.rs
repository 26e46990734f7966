//! Viewer entrypoint: runs one LIF simulation and charts every unit's
//! membrane potential over time.
//! Controls: [q]/[Esc] Quit

mod app;
mod backend;
mod cli;
mod ui;

use anyhow::Result;
use app::App;
use backend::CoreBackend;
use clap::Parser;
use cli::Cli;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::draw;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute, terminal,
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Upper bound on plotted points per unit; braille cells give 2 points per column.
const MAX_POINTS: usize = 2000;

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Simulate before touching the terminal so errors and logs print normally
    let backend = CoreBackend::new(cli.simulation_config(), cli.constants());
    let mut app = App::new(backend, MAX_POINTS)?;
    info!(
        units = app.result.unit_count(),
        steps = app.result.step_count(),
        spikes = app.result.total_spikes(),
        "simulation finished"
    );

    if cli.headless {
        for line in app.summary_lines() {
            println!("{}", line);
        }
        return Ok(());
    }

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Ensure terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));

    let outcome = event_loop(&mut terminal, &mut app);
    restore_terminal()?;
    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<CoreBackend>,
) -> Result<()> {
    while !app.quit {
        draw(terminal, app)?;

        if event::poll(Duration::from_millis(250))? {
            if let CEvent::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    app.quit = true;
                }
            }
        }
    }
    Ok(())
}
