use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::cli::commands::Cli;
use crate::io::config_io::{config_path, read_config};
use crate::io::credentials::{credentials_path, load_or_enroll};
use crate::io::gateway::HttpGateway;
use crate::io::logging::init_file_logging;
use crate::ops::cache::HierarchyCache;

use super::input;
use super::render;
use super::session::Session;
use super::theme::Theme;

/// Run the browser: load config and credentials, fetch the boards, then
/// hand the terminal to the event loop until the user quits.
pub fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(log_file) = &cli.log_file {
        init_file_logging(log_file, cli.log_level.as_deref())?;
    }

    let config_file = cli.config.clone().unwrap_or_else(config_path);
    let config = read_config(&config_file)?;

    let credentials_file = cli
        .credentials
        .clone()
        .or_else(|| config.api.credentials_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(credentials_path);
    let credentials = load_or_enroll(&credentials_file)?;

    let base_url = cli.api_url.as_deref().unwrap_or(&config.api.base_url);
    tracing::info!(%base_url, "starting");
    let gateway = HttpGateway::new(
        base_url,
        credentials,
        Duration::from_secs(config.api.timeout_secs),
    );
    let cache = HierarchyCache::load(Box::new(gateway))?;
    let theme = Theme::from_config(&config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    let mut session = Session::new(cache, theme, Rect::new(0, 0, size.width, size.height));

    let result = run_event_loop(&mut terminal, &mut session);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// One event at a time: read it, apply it to the session, draw the grid.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render::blit(session.screen(), frame.buffer_mut(), area);
        })?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(nav) = input::map_key(key) {
                    session.handle(nav)?;
                }
            }
            Event::Resize(width, height) => session.resize(Rect::new(0, 0, width, height)),
            _ => {}
        }

        if session.should_quit {
            break;
        }
    }
    Ok(())
}
