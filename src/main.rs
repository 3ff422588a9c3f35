//! Invite TUI - Terminal screen for inviting friends and colleagues
//!
//! Collects up to three `{name, email}` rows, validates them and queues
//! the invites for delivery.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use invite_tui::app::App;
use invite_tui::config::InviteConfig;
use invite_tui::environment::Environment;
use invite_tui::invites::{InviteSender, OutboxSender};
use invite_tui::messages::{DefaultMessages, MessageCatalog, MessageResolver};
use invite_tui::state::ScreenOptions;
use invite_tui::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invite_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = InviteConfig::load()?;
    let environment = Environment::detect();
    let api = config.api_target(&environment);
    tracing::info!(%api, url = api.base_url(), "starting invite screen");

    let resolver: Box<dyn MessageResolver> = match &config.messages {
        Some(path) => Box::new(MessageCatalog::load(path)?),
        None => Box::new(DefaultMessages),
    };

    let outbox_path = config
        .outbox_path
        .clone()
        .or_else(OutboxSender::default_path)
        .unwrap_or_else(|| PathBuf::from("outbox.jsonl"));
    let sender = OutboxSender::new(outbox_path, api);

    let options = ScreenOptions {
        from: config.from_or_default().to_string(),
        embed: config.is_embedded(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(resolver.as_ref(), options, sender);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    // The embedding shell navigates back to the origin token
    if let Some(destination) = app.exit_destination() {
        println!("{destination}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend, S: InviteSender>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        let animating = app.tick();

        // Redraw only when the form or screen state changed
        if app.state.take_dirty() {
            terminal.draw(|frame| ui::draw(frame, app))?;
        }

        // Faster polling while the banner animates (16ms = ~60fps)
        let poll_duration = if animating {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key).await?,
                Event::Resize(_width, _height) => app.state.mark_dirty(),
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
