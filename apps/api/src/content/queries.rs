//! Read-only portfolio queries. Each returns a plain-text observation that is
//! handed to the model as grounding context.

use serde::Deserialize;

use crate::models::content::{ContentItem, Portfolio};

const DESCRIPTION_PREVIEW_CHARS: usize = 180;
const MAX_TECHNOLOGIES_SHOWN: usize = 5;
const SKILLS_PER_CATEGORY_PREVIEW: usize = 4;
const MAX_SEARCH_HITS_PER_COLLECTION: usize = 5;
pub const DEFAULT_RECENT_PROJECTS: usize = 3;

/// Optional, case-insensitive substring filters over experiences.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExperienceFilter {
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

impl ExperienceFilter {
    fn matches(&self, item: &ContentItem) -> bool {
        if let Some(technology) = non_blank(&self.technology) {
            if !item.tags.iter().any(|t| contains_ci(t, technology)) {
                return false;
            }
        }
        if let Some(client) = non_blank(&self.client) {
            if !item
                .metadata
                .client
                .as_deref()
                .is_some_and(|c| contains_ci(c, client))
            {
                return false;
            }
        }
        if let Some(sector) = non_blank(&self.sector) {
            if !item
                .metadata
                .sector
                .as_deref()
                .is_some_and(|s| contains_ci(s, sector))
            {
                return false;
            }
        }
        true
    }
}

pub fn list_experiences(portfolio: &Portfolio, filter: &ExperienceFilter) -> String {
    let results: Vec<&ContentItem> = portfolio
        .experiences
        .iter()
        .filter(|e| filter.matches(e))
        .collect();

    if results.is_empty() {
        return "No experiences found matching the criteria.".to_string();
    }

    let mut output = format!("Found {} experience(s):\n\n", results.len());
    for exp in results {
        output.push_str(&format!(
            "**{}** at {} ({})\n",
            exp.title,
            exp.metadata.client.as_deref().unwrap_or("n/a"),
            exp.metadata.duration.as_deref().unwrap_or(&exp.date),
        ));
        output.push_str(&format!(
            "Description: {}\n",
            preview(&exp.long_description, DESCRIPTION_PREVIEW_CHARS)
        ));
        output.push_str(&format!(
            "Technologies: {}\n",
            first_n(&exp.tags, MAX_TECHNOLOGIES_SHOWN)
        ));
        if let Some(impact) = &exp.metadata.impact {
            output.push_str(&format!("Impact: {impact}\n"));
        }
        output.push('\n');
    }
    output
}

/// Skills are stored one category per item: `title` is the category, `tags` its skills.
pub fn list_skills(portfolio: &Portfolio, category: Option<&str>) -> String {
    if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
        return match portfolio
            .skills
            .iter()
            .find(|s| contains_ci(&s.title, category))
        {
            Some(set) => format!("**{}**:\n• {}", set.title, set.tags.join("\n• ")),
            None => format!("No skill category found matching '{category}'"),
        };
    }

    if portfolio.skills.is_empty() {
        return "No skills listed.".to_string();
    }

    let mut output = String::from("Technical skills:\n\n");
    for set in &portfolio.skills {
        output.push_str(&format!("**{}**\n", set.title));
        let shown: Vec<&str> = set
            .tags
            .iter()
            .take(SKILLS_PER_CATEGORY_PREVIEW)
            .map(String::as_str)
            .collect();
        output.push_str(&format!("• {}\n\n", shown.join("\n• ")));
    }
    output
}

pub fn list_certifications(portfolio: &Portfolio) -> String {
    if portfolio.certifications.is_empty() {
        return "No certifications listed.".to_string();
    }

    let mut output = String::from("Certifications:\n\n");
    for cert in &portfolio.certifications {
        output.push_str(&format!(
            "• **{}** - {} ({})\n  {}\n\n",
            cert.title,
            cert.metadata.issuer.as_deref().unwrap_or("unknown issuer"),
            cert.date,
            cert.long_description,
        ));
    }
    output
}

pub fn list_education(portfolio: &Portfolio) -> String {
    if portfolio.education.is_empty() {
        return "No education listed.".to_string();
    }

    let mut output = String::from("Education:\n\n");
    for edu in &portfolio.education {
        output.push_str(&format!(
            "**{}** - {} ({})\n",
            edu.title, edu.short_description, edu.date
        ));
        if let Some(location) = &edu.metadata.location {
            output.push_str(&format!("  Location: {location}\n"));
        }
        if let Some(achievement) = &edu.metadata.impact {
            output.push_str(&format!("  Achievement: {achievement}\n"));
        }
        output.push_str(&format!("  {}\n\n", edu.long_description));
    }
    output
}

/// Free-text search over every collection.
pub fn search_portfolio(portfolio: &Portfolio, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return "Empty search query.".to_string();
    }

    let mut results = Vec::new();
    for (kind, items) in portfolio.collections() {
        results.extend(
            items
                .iter()
                .filter(|item| item_matches(item, query))
                .take(MAX_SEARCH_HITS_PER_COLLECTION)
                .map(|item| format!("{}: {} - {}", kind.label(), item.title, item.short_description)),
        );
    }

    if results.is_empty() {
        return format!("No results for '{query}'");
    }
    format!("Results for '{query}':\n\n• {}", results.join("\n• "))
}

/// Scores how well the portfolio covers a free-text list of requirements.
pub fn analyze_expertise_match(portfolio: &Portfolio, requirements: &str) -> String {
    let lowered = requirements.to_lowercase();
    let keywords: Vec<&str> = lowered.split_whitespace().collect();

    let any_keyword_in = |text: &str| {
        let text = text.to_lowercase();
        keywords.iter().any(|kw| text.contains(kw))
    };

    let experiences: Vec<&str> = portfolio
        .experiences
        .iter()
        .filter(|e| {
            any_keyword_in(&format!(
                "{} {} {}",
                e.title,
                e.long_description,
                e.tags.join(" ")
            ))
        })
        .map(|e| e.title.as_str())
        .collect();

    let skills: Vec<&str> = portfolio
        .skills
        .iter()
        .flat_map(|s| s.tags.iter())
        .filter(|skill| any_keyword_in(skill))
        .map(String::as_str)
        .collect();

    let certifications: Vec<&str> = portfolio
        .certifications
        .iter()
        .filter(|c| any_keyword_in(&c.title))
        .map(|c| c.title.as_str())
        .collect();

    let mut output = format!("Match analysis for: {requirements}\n\n");

    if !experiences.is_empty() {
        output.push_str(&format!(
            "**Relevant experiences ({}):**\n• {}\n\n",
            experiences.len(),
            experiences.iter().take(5).copied().collect::<Vec<_>>().join("\n• ")
        ));
    }
    if !skills.is_empty() {
        output.push_str(&format!(
            "**Matching skills ({}):**\n• {}\n\n",
            skills.len(),
            skills.iter().take(10).copied().collect::<Vec<_>>().join("\n• ")
        ));
    }
    if !certifications.is_empty() {
        output.push_str(&format!(
            "**Relevant certifications:**\n• {}\n\n",
            certifications.join("\n• ")
        ));
    }

    let verdict = match_verdict(experiences.len(), skills.len(), certifications.len());
    output.push_str(verdict.message());
    output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchVerdict {
    None,
    Partial,
    Good,
    Excellent,
}

impl MatchVerdict {
    fn message(&self) -> &'static str {
        match self {
            MatchVerdict::None => "No direct match found, but new skills can be picked up quickly.",
            MatchVerdict::Partial => "Partial match with room to grow quickly.",
            MatchVerdict::Good => "Good match: several relevant skills and experiences.",
            MatchVerdict::Excellent => "Excellent match: the profile fits the needs very well.",
        }
    }
}

/// Experiences weigh 3, skills and certifications 2 each.
pub fn match_verdict(experiences: usize, skills: usize, certifications: usize) -> MatchVerdict {
    if experiences + skills + certifications == 0 {
        return MatchVerdict::None;
    }
    let score = experiences * 3 + skills * 2 + certifications * 2;
    if score > 15 {
        MatchVerdict::Excellent
    } else if score > 8 {
        MatchVerdict::Good
    } else {
        MatchVerdict::Partial
    }
}

/// Most recent experiences first, by their `date` string.
pub fn recent_projects(portfolio: &Portfolio, limit: usize) -> String {
    let mut sorted: Vec<&ContentItem> = portfolio.experiences.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);

    if sorted.is_empty() {
        return "No recent projects found.".to_string();
    }

    let mut output = format!("{} most recent project(s):\n\n", sorted.len());
    for (i, exp) in sorted.iter().enumerate() {
        output.push_str(&format!("{}. **{}** ({})\n", i + 1, exp.title, exp.date));
        if let Some(client) = &exp.metadata.client {
            output.push_str(&format!("   Client: {client}\n"));
        }
        if let Some(impact) = &exp.metadata.impact {
            output.push_str(&format!("   Impact: {impact}\n"));
        }
        output.push_str(&format!(
            "   Tech stack: {}\n\n",
            first_n(&exp.tags, MAX_TECHNOLOGIES_SHOWN)
        ));
    }
    output
}

fn item_matches(item: &ContentItem, query: &str) -> bool {
    contains_ci(&item.title, query)
        || contains_ci(&item.short_description, query)
        || contains_ci(&item.long_description, query)
        || item.tags.iter().any(|t| contains_ci(t, query))
        || item
            .metadata
            .client
            .as_deref()
            .is_some_and(|c| contains_ci(c, query))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn first_n(items: &[String], n: usize) -> String {
    items
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Char-boundary safe truncation with an ellipsis when shortened.
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}
