use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tonkeygen::{KeygenConfig, SharedCollaborator, TonCollaborator, WizardController};

mod app;
mod event;
mod screens;
mod theme;
mod ui;
mod widgets;

pub use app::App;
pub use event::EventHandler;

/// Run the TUI application
pub async fn run_tui(config: &KeygenConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new();
    let (tx, rx) = mpsc::unbounded_channel();
    event_handler.forward_completions(rx);

    let collaborator: SharedCollaborator = Arc::new(TonCollaborator::from_config(config));
    let mut wizard = WizardController::new(collaborator, config, tx);
    wizard.start();

    let mut app = App::new(wizard, config);
    let res = run_app(&mut terminal, &mut app, event_handler).await;
    app.wizard.finish().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut event_handler: EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if let Some(event) = event_handler.next().await {
            if !app.handle_event(event) {
                break;
            }
        }
    }

    Ok(())
}
