//! Portfolio assistant. Answers visitor questions about the portfolio.
//!
//! Default: `PortfolioAgent`, a plan-then-answer loop over the static
//! content. `AppState` holds an `Arc<dyn Assistant>` so handlers never depend
//! on a concrete backend.

pub mod easter_egg;
pub mod history;
pub mod prompts;
pub mod tools;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::{parse_json_reply, CompletionModel, LlmMessage};
use crate::models::chat::ChatMessage;
use crate::models::content::Portfolio;

use self::tools::ToolCall;

#[async_trait]
pub trait Assistant: Send + Sync {
    /// Produces one complete reply to `message`, given the visitor's log so far.
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> Result<String, AppError>;

    fn model_name(&self) -> &str;
}

#[derive(Debug, Clone, Copy)]
pub struct AgentSettings {
    /// Maximum tool invocations per exchange.
    pub max_steps: usize,
    /// Most recent history messages forwarded to the model.
    pub history_limit: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_steps: 6,
            history_limit: 20,
        }
    }
}

pub struct PortfolioAgent {
    model: Arc<dyn CompletionModel>,
    portfolio: Arc<Portfolio>,
    settings: AgentSettings,
}

impl PortfolioAgent {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        portfolio: Arc<Portfolio>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            model,
            portfolio,
            settings,
        }
    }

    /// Asks the model which lookups it needs. Planning is best-effort: any
    /// failure degrades to answering without observations.
    async fn plan(&self, message: &str) -> Vec<ToolCall> {
        if self.settings.max_steps == 0 {
            return Vec::new();
        }

        let reply = match self
            .model
            .complete(
                &prompts::planner_system(),
                &[LlmMessage::user(prompts::planning_prompt(message))],
            )
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Tool planning failed, answering without tools: {e}");
                return Vec::new();
            }
        };

        match parse_json_reply::<Value>(&reply) {
            Ok(plan) => tools::decode_plan(plan, self.settings.max_steps),
            Err(e) => {
                warn!("Planner returned non-JSON output, answering without tools: {e}");
                Vec::new()
            }
        }
    }

    fn observe(&self, calls: &[ToolCall]) -> Option<String> {
        if calls.is_empty() {
            return None;
        }
        let observations: Vec<String> = calls
            .iter()
            .map(|call| {
                debug!("Running tool {}", call.name());
                format!("[{}]\n{}", call.name(), call.run(&self.portfolio))
            })
            .collect();
        Some(observations.join("\n\n"))
    }
}

#[async_trait]
impl Assistant for PortfolioAgent {
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> Result<String, AppError> {
        let egg = easter_egg::detect(message);

        let system = match egg {
            Some(egg) => {
                info!("Easter egg '{}' triggered", egg.term);
                prompts::vacation_system_prompt(&self.portfolio, egg)
            }
            None => prompts::base_system_prompt(&self.portfolio),
        };

        let calls = self.plan(message).await;
        info!(
            "Chat exchange: {} tool call(s) [{}]",
            calls.len(),
            calls.iter().map(ToolCall::name).collect::<Vec<_>>().join(", ")
        );

        let user_turn = match self.observe(&calls) {
            Some(observations) => prompts::with_observations(message, &observations),
            None => message.to_string(),
        };

        let mut turns = history::recent_turns(history, self.settings.history_limit);
        if let Some(egg) = egg {
            turns.push(LlmMessage::assistant(egg.greeting()));
        }
        turns.push(LlmMessage::user(user_turn));

        let answer = self
            .model
            .complete(&system, &history::normalize(turns))
            .await?;

        Ok(match egg {
            Some(egg) => format!(
                "{}\n\n{}\n\n{}",
                easter_egg::NOTIFICATION,
                egg.greeting(),
                answer
            ),
            None => answer,
        })
    }

    fn model_name(&self) -> &str {
        self.model.model_name()
    }
}
