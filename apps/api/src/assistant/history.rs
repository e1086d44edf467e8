use crate::llm_client::LlmMessage;
use crate::models::chat::{ChatMessage, Role};

/// Most recent `limit` messages of the visitor's log, as model turns.
pub fn recent_turns(history: &[ChatMessage], limit: usize) -> Vec<LlmMessage> {
    let start = history.len().saturating_sub(limit);
    history[start..]
        .iter()
        .filter(|m| !m.content.trim().is_empty())
        .map(|m| LlmMessage {
            role: m.role,
            content: m.content.clone(),
        })
        .collect()
}

/// Makes a turn sequence acceptable to the Messages API: it must open with a user
/// turn and roles must alternate. Leading assistant turns (the UI greeting) are
/// dropped and consecutive same-role turns are merged.
pub fn normalize(turns: Vec<LlmMessage>) -> Vec<LlmMessage> {
    let mut out: Vec<LlmMessage> = Vec::with_capacity(turns.len());
    for turn in turns {
        if out.is_empty() && turn.role == Role::Assistant {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.role == turn.role => {
                last.content.push_str("\n\n");
                last.content.push_str(&turn.content);
            }
            _ => out.push(turn),
        }
    }
    out
}
