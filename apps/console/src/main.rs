use std::io::{stdout, Stdout};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use portfolio_api::content::loader::load_portfolio;
use portfolio_api::models::chat::ChatRequest;
use portfolio_api::models::content::Portfolio;
use portfolio_console::app::App;
use portfolio_console::config::ConsoleConfig;
use portfolio_console::store::{Action, Store};
use portfolio_console::transport::{
    fetch_portfolio, ChatTransport, HttpChatTransport, TransportError,
};
use portfolio_console::view::render;

type Outcomes = mpsc::UnboundedSender<Result<String, TransportError>>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConsoleConfig::from_env()?;

    // the terminal belongs to the UI; logs go to a file or stderr
    let writer = match &config.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    let client = reqwest::Client::new();
    let portfolio = Arc::new(load_content(&config, &client).await?);
    info!("Loaded {} portfolio item(s)", portfolio.total_items());

    let transport: Arc<dyn ChatTransport> =
        Arc::new(HttpChatTransport::new(client, config.api_url.clone()));
    let mut app = App::new(Store::new(portfolio));

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;

    let res = run(&mut terminal, &mut app, transport).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    transport: Arc<dyn ChatTransport>,
) -> Result<()> {
    let (outcomes, mut resolved) = mpsc::unbounded_channel();
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| render(f, app))?;
        if app.should_quit() {
            return Ok(());
        }

        tokio::select! {
            event = events.next() => {
                let input_closed = match event {
                    Some(Ok(Event::Key(key))) => {
                        for request in app.on_key(key) {
                            send(&transport, request, &outcomes);
                        }
                        false
                    }
                    // resize and the like only need a redraw
                    Some(Ok(_)) => false,
                    Some(Err(e)) => {
                        warn!("Terminal input failed: {e}");
                        true
                    }
                    None => true,
                };
                if input_closed {
                    app.settle(&mut resolved).await;
                    terminal.draw(|f| render(f, app))?;
                    return Ok(());
                }
            }
            Some(outcome) = resolved.recv() => {
                app.apply(Action::ChatResolved(outcome));
            }
        }
    }
}

/// Sends off the input loop; the outcome is applied even if the panel was
/// closed meanwhile.
fn send(transport: &Arc<dyn ChatTransport>, request: ChatRequest, outcomes: &Outcomes) {
    let transport = Arc::clone(transport);
    let outcomes = outcomes.clone();
    tokio::spawn(async move {
        let outcome = transport.send(&request).await;
        let _ = outcomes.send(outcome);
    });
}

async fn load_content(config: &ConsoleConfig, client: &reqwest::Client) -> Result<Portfolio> {
    match &config.portfolio_data_path {
        Some(path) => load_portfolio(path)
            .with_context(|| format!("Could not load portfolio content from {}", path.display())),
        None => fetch_portfolio(client, &config.api_url)
            .await
            .with_context(|| format!("Could not fetch portfolio content from {}", config.api_url)),
    }
}
