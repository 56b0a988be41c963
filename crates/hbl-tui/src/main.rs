mod app;
mod fetch;
mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use hbl_core::config::Config;

use crate::app::App;
use crate::fetch::{CsvClient, FetchOutcome};

fn main() -> Result<()> {
    // Parse CLI args (simple, no clap dependency).
    let args: Vec<String> = std::env::args().collect();
    let offline = args.iter().any(|a| a == "--offline");

    let mut config = match args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
    {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    // A --source override goes through the same validation as the file.
    if let Some(url) = args
        .iter()
        .position(|a| a == "--source")
        .and_then(|i| args.get(i + 1))
    {
        config.source.url = url.clone();
        config.validate()?;
    }
    let source_url = config.source.url.clone();

    hbl_telemetry::logging::init_logging("hbl-tui", "warn");

    // Set up panic hook to restore terminal on panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run(offline, &source_url, config.ui.tick_ms);

    restore_terminal()?;
    result
}

/// Run the interactive TUI with the standard crossterm backend.
fn run(offline: bool, source_url: &str, tick_ms: u64) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(offline);
    let (tx, rx) = flume::unbounded::<FetchOutcome>();
    let client = CsvClient::new(source_url);
    tracing::debug!(url = client.url(), offline, "dashboard starting");

    // Initial load on mount.
    if !offline {
        let token = app.state.begin();
        fetch::spawn_fetch(client.clone(), token, tx.clone());
    }

    loop {
        while let Ok(outcome) = rx.try_recv() {
            app.apply_outcome(outcome);
        }

        terminal.draw(|frame| {
            ui::render(frame, &app);
        })?;

        if ct_event::poll(Duration::from_millis(tick_ms))? {
            if let Event::Key(key) = ct_event::read()? {
                app.on_key(key);
            }
        }

        if app.take_refresh_request() && !offline {
            let token = app.state.begin();
            fetch::spawn_fetch(client.clone(), token, tx.clone());
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    Ok(())
}
