//! The tool catalogue the planner can pick from, and its execution against the portfolio.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::content::queries::{self, ExperienceFilter, DEFAULT_RECENT_PROJECTS};
use crate::models::content::Portfolio;

pub const TOOL_NAMES: [&str; 7] = [
    "list_experiences",
    "list_skills",
    "list_certifications",
    "list_education",
    "search_portfolio",
    "analyze_expertise_match",
    "recent_projects",
];

/// One tool invocation as emitted by the planner, e.g.
/// `{"tool": "list_experiences", "technology": "MCP"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolCall {
    ListExperiences(ExperienceFilter),
    ListSkills {
        #[serde(default)]
        category: Option<String>,
    },
    ListCertifications,
    ListEducation,
    SearchPortfolio {
        query: String,
    },
    AnalyzeExpertiseMatch {
        requirements: String,
    },
    RecentProjects {
        #[serde(default)]
        limit: Option<usize>,
    },
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::ListExperiences(_) => TOOL_NAMES[0],
            ToolCall::ListSkills { .. } => TOOL_NAMES[1],
            ToolCall::ListCertifications => TOOL_NAMES[2],
            ToolCall::ListEducation => TOOL_NAMES[3],
            ToolCall::SearchPortfolio { .. } => TOOL_NAMES[4],
            ToolCall::AnalyzeExpertiseMatch { .. } => TOOL_NAMES[5],
            ToolCall::RecentProjects { .. } => TOOL_NAMES[6],
        }
    }

    pub fn run(&self, portfolio: &Portfolio) -> String {
        match self {
            ToolCall::ListExperiences(filter) => queries::list_experiences(portfolio, filter),
            ToolCall::ListSkills { category } => queries::list_skills(portfolio, category.as_deref()),
            ToolCall::ListCertifications => queries::list_certifications(portfolio),
            ToolCall::ListEducation => queries::list_education(portfolio),
            ToolCall::SearchPortfolio { query } => queries::search_portfolio(portfolio, query),
            ToolCall::AnalyzeExpertiseMatch { requirements } => {
                queries::analyze_expertise_match(portfolio, requirements)
            }
            ToolCall::RecentProjects { limit } => {
                queries::recent_projects(portfolio, limit.unwrap_or(DEFAULT_RECENT_PROJECTS))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPlan {
    #[serde(default)]
    calls: Vec<Value>,
}

/// Decodes a planner reply. Individual malformed calls are skipped so one bad
/// entry does not discard the rest of the plan.
pub fn decode_plan(plan: Value, max_steps: usize) -> Vec<ToolCall> {
    let raw: RawPlan = match serde_json::from_value(plan) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Planner reply has no usable 'calls' array: {e}");
            return Vec::new();
        }
    };

    raw.calls
        .into_iter()
        .filter_map(|call| match serde_json::from_value::<ToolCall>(call.clone()) {
            Ok(tool) => Some(tool),
            Err(e) => {
                warn!("Skipping malformed tool call {call}: {e}");
                None
            }
        })
        .take(max_steps)
        .collect()
}

/// Tool descriptions embedded in the planner and answer prompts.
pub fn catalog() -> &'static str {
    "\
Available tools:
1. list_experiences(technology?, client?, sector?) - professional experiences, optionally filtered
2. list_skills(category?) - technical skills, optionally for one category
3. list_certifications() - all certifications
4. list_education() - educational background
5. search_portfolio(query) - free-text search across the whole portfolio
6. analyze_expertise_match(requirements) - how well the profile matches a list of requirements
7. recent_projects(limit?) - most recent experiences first"
}
