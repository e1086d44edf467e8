use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_api::assistant::{AgentSettings, PortfolioAgent};
use portfolio_api::config::Config;
use portfolio_api::content::loader::load_portfolio;
use portfolio_api::llm_client::{self, LlmClient};
use portfolio_api::routes::build_router;
use portfolio_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Static content is a process-lifetime constant
    let portfolio = Arc::new(load_portfolio(&config.portfolio_data_path).with_context(|| {
        format!(
            "Could not load portfolio content (PORTFOLIO_DATA_PATH={})",
            config.portfolio_data_path.display()
        )
    })?);

    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let settings = AgentSettings {
        max_steps: config.agent_max_steps,
        history_limit: config.chat_history_limit,
    };
    let assistant = PortfolioAgent::new(Arc::new(llm), portfolio.clone(), settings);
    info!(
        "Portfolio agent ready (max_steps: {}, history_limit: {})",
        settings.max_steps, settings.history_limit
    );

    let state = AppState {
        portfolio,
        assistant: Arc::new(assistant),
    };

    if let Some(dir) = &config.static_dir {
        info!("Serving frontend from {}", dir.display());
    }

    let app = build_router(state, config.static_dir.as_deref())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
