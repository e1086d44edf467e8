use portfolio_api::models::content::CollectionKind;

use crate::store::Action;

pub const HELP: &str = "\
Commandes:
  :next | :n          carte suivante
  :prev | :p          carte précédente
  :go <k>             aller à la carte k (1..N)
  :flip | :f          retourner la carte active
  :cat <nom>          experiences | skills | certifications | education
  :chat | :c          ouvrir / fermer l'assistant
  :ask <k>            poser la question suggérée k
  :clear              effacer la conversation
  :help               cette aide
  :quit | :q          quitter
Tout autre texte est envoyé à l'assistant.
Touches: ←/→ naviguer, Tab retourner, PgUp/PgDn défiler, Échap fermer, Ctrl-C quitter.";

/// Starter questions offered to visitors who do not know what to ask.
pub const SUGGESTIONS: [&str; 5] = [
    "Quels sont tes projets avec des agents IA ?",
    "Parle-moi de ton expérience avec MCP",
    "Quelles technologies maîtrises-tu pour la GenAI ?",
    "As-tu travaillé sur des projets multi-agents ?",
    "Quel est ton projet le plus impactant ?",
];

/// The command reference followed by the numbered suggestions.
pub fn help_text() -> String {
    let suggestions: Vec<String> = SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, question)| format!("  {}. {question}", i + 1))
        .collect();
    format!("{HELP}\n\nQuestions suggérées (:ask <k>):\n{}", suggestions.join("\n"))
}

#[derive(Debug)]
pub enum Command {
    Dispatch(Vec<Action>),
    Help,
    Quit,
    /// Explains why the line was not understood.
    Invalid(String),
}

/// Maps one line typed by the user to store actions.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        if line.is_empty() {
            return Command::Dispatch(Vec::new());
        }
        return ask(line);
    };

    let mut parts = rest.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (verb, arg) {
        ("next" | "n", None) => Command::Dispatch(vec![Action::Next]),
        ("prev" | "p", None) => Command::Dispatch(vec![Action::Previous]),
        ("flip" | "f", None) => Command::Dispatch(vec![Action::ToggleActiveFlip]),
        ("chat" | "c", None) => Command::Dispatch(vec![Action::ToggleChat]),
        ("clear", None) => Command::Dispatch(vec![Action::ClearChat]),
        ("help" | "h", None) => Command::Help,
        ("quit" | "q", None) => Command::Quit,
        ("go", Some(k)) => match k.parse::<usize>() {
            Ok(k) if k >= 1 => Command::Dispatch(vec![Action::SelectIndex(k - 1)]),
            _ => Command::Invalid(format!("Position invalide: {k}")),
        },
        ("ask", Some(k)) => match k.parse::<usize>().ok().and_then(|k| k.checked_sub(1)) {
            Some(i) if i < SUGGESTIONS.len() => ask(SUGGESTIONS[i]),
            _ => Command::Invalid(format!("Question inconnue: {k} (1..{})", SUGGESTIONS.len())),
        },
        ("cat", Some(name)) => match name.parse::<CollectionKind>() {
            Ok(kind) => Command::Dispatch(vec![Action::SelectCollection(kind)]),
            Err(e) => Command::Invalid(e.to_string()),
        },
        _ => Command::Invalid(format!("Commande inconnue: {line}")),
    }
}

/// The panel opens so the reply is visible.
fn ask(question: &str) -> Command {
    Command::Dispatch(vec![
        Action::OpenChat,
        Action::EditInput(question.to_string()),
        Action::Submit,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(line: &str) -> Vec<Action> {
        match parse_line(line) {
            Command::Dispatch(actions) => actions,
            other => panic!("expected actions for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_navigation_commands() {
        assert!(matches!(&actions(":n")[..], [Action::Next]));
        assert!(matches!(&actions(" :prev ")[..], [Action::Previous]));
        assert!(matches!(&actions(":go 3")[..], [Action::SelectIndex(2)]));
        assert!(matches!(
            &actions(":cat Skills")[..],
            [Action::SelectCollection(CollectionKind::Skills)]
        ));
    }

    #[test]
    fn test_free_text_submits_chat() {
        match &actions("Quelles sont tes certifications?")[..] {
            [Action::OpenChat, Action::EditInput(text), Action::Submit] => {
                assert_eq!(text, "Quelles sont tes certifications?")
            }
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn test_ask_submits_suggested_question() {
        match &actions(":ask 2")[..] {
            [Action::OpenChat, Action::EditInput(text), Action::Submit] => {
                assert_eq!(text, "Parle-moi de ton expérience avec MCP")
            }
            other => panic!("unexpected actions {other:?}"),
        }
        assert!(matches!(parse_line(":ask 0"), Command::Invalid(_)));
        assert!(matches!(parse_line(":ask 6"), Command::Invalid(_)));
    }

    #[test]
    fn test_help_lists_suggestions() {
        let help = help_text();
        assert!(help.contains(":ask <k>"));
        assert!(help.contains("  5. Quel est ton projet le plus impactant ?"));
    }

    #[test]
    fn test_blank_line_does_nothing() {
        assert!(actions("   ").is_empty());
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse_line(":go 0"), Command::Invalid(_)));
        assert!(matches!(parse_line(":go x"), Command::Invalid(_)));
        assert!(matches!(parse_line(":cat hobbies"), Command::Invalid(_)));
        assert!(matches!(parse_line(":dance"), Command::Invalid(_)));
    }

    #[test]
    fn test_quit_and_help() {
        assert!(matches!(parse_line(":q"), Command::Quit));
        assert!(matches!(parse_line(":help"), Command::Help));
    }
}
