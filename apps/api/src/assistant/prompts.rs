// Prompt builders for the portfolio assistant.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::assistant::easter_egg::EasterEgg;
use crate::assistant::tools;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::models::content::Portfolio;

/// System prompt for tool planning.
pub fn planner_system() -> String {
    format!(
        "{JSON_ONLY_SYSTEM} You decide which portfolio lookup tools are needed to answer a visitor's question."
    )
}

/// Planning prompt. The model answers with `{"calls": [...]}`.
pub fn planning_prompt(message: &str) -> String {
    format!(
        r#"A visitor asked the following question about a professional portfolio:

"{message}"

{catalog}

Return a JSON object with this EXACT schema:
{{"calls": [{{"tool": "list_experiences", "technology": "MCP"}}]}}

Rules:
- Each call names one tool in "tool" and passes its arguments as sibling fields.
- Omit optional arguments you do not need.
- Return {{"calls": []}} for greetings or questions that need no portfolio data."#,
        catalog = tools::catalog(),
    )
}

/// System prompt for regular answers.
pub fn base_system_prompt(portfolio: &Portfolio) -> String {
    let profile = &portfolio.profile;
    let certifications: Vec<&str> = portfolio
        .certifications
        .iter()
        .map(|c| c.title.as_str())
        .collect();

    format!(
        "You are {assistant}, an AI assistant specialized in {owner}'s professional portfolio.

Your role is to help visitors understand {owner}'s expertise. Headline: {headline}

Key information:
- Certifications: {certs}

Portfolio summary:
- {experiences} professional experiences
- {skills} skill categories
- {cert_count} certifications
- {education} education entries

{catalog}
Tool results, when relevant, are attached to the visitor's message as portfolio observations.

IMPORTANT: There is an easter egg hidden in this chat. Visitors need to discover it on their own by using special keywords. \
You cannot help them find it or give hints about it. If they ask about easter eggs, politely deflect without revealing anything.

{grounding}
Answer professionally, in French unless the visitor writes in another language, and highlight the most relevant experiences.",
        assistant = profile.assistant_name,
        owner = profile.name,
        headline = profile.headline,
        certs = certifications.join(", "),
        experiences = portfolio.experiences.len(),
        skills = portfolio.skills.len(),
        cert_count = portfolio.certifications.len(),
        education = portfolio.education.len(),
        catalog = tools::catalog(),
        grounding = GROUNDING_INSTRUCTION,
    )
}

/// System prompt once an easter egg has been found.
pub fn vacation_system_prompt(portfolio: &Portfolio, egg: &EasterEgg) -> String {
    let profile = &portfolio.profile;
    format!(
        "You are {assistant} in VACATION MODE!

The visitor just discovered the easter egg by saying '{term}'! You're now totally relaxed, on vacation, \
enjoying the sun, and in a playful mood.

Be:
- Fun, humorous, and lighthearted
- Still helpful about {owner}'s portfolio, but in a casual, friendly way
- Enthusiastic about the fact they found the easter egg

{grounding}",
        assistant = profile.assistant_name,
        owner = profile.name,
        term = egg.term,
        grounding = GROUNDING_INSTRUCTION,
    )
}

/// Attaches tool observations to the visitor's message.
pub fn with_observations(message: &str, observations: &str) -> String {
    format!("{message}\n\n<portfolio_observations>\n{observations}\n</portfolio_observations>")
}
