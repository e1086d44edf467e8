use std::sync::Arc;

use crate::assistant::Assistant;
use crate::models::content::Portfolio;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated.
    pub portfolio: Arc<Portfolio>,
    /// Pluggable assistant backend. Default: `PortfolioAgent` over the Anthropic client.
    pub assistant: Arc<dyn Assistant>,
}
