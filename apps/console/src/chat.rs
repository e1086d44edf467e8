//! Chat controller: the conversation log, the pending input, and the
//! idle / awaiting-response state machine around one outstanding request.

use portfolio_api::models::chat::{ChatMessage, ChatRequest};

use crate::transport::{log_failure, TransportError};

/// Seeded as the first assistant message of every conversation.
pub const GREETING: &str = "Bonjour! Je suis votre assistant IA spécialisé dans le profil de Clément. \
    Posez-moi des questions sur ses expériences GenAI, ses compétences en agents, ou ses certifications!";

/// Shown in place of a reply when the exchange fails.
pub const APOLOGY: &str = "Désolé, j'ai rencontré une erreur. Veuillez réessayer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatController {
    log: Vec<ChatMessage>,
    status: ChatStatus,
    input: String,
    panel_open: bool,
}

impl Default for ChatController {
    fn default() -> Self {
        Self {
            log: vec![ChatMessage::assistant(GREETING)],
            status: ChatStatus::Idle,
            input: String::new(),
            panel_open: false,
        }
    }
}

impl ChatController {
    pub fn log(&self) -> &[ChatMessage] {
        &self.log
    }

    pub fn status(&self) -> ChatStatus {
        self.status
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Whether the submit affordance is enabled.
    pub fn can_submit(&self) -> bool {
        self.status == ChatStatus::Idle && !self.input.trim().is_empty()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Starts an exchange. Returns the request to send, or `None` when the input
    /// is blank or a request is already outstanding (no state change either way).
    ///
    /// The user message is appended before the round trip; the request carries
    /// the log as it stood before that append.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if !self.can_submit() {
            return None;
        }

        let message = self.input.trim().to_string();
        let request = ChatRequest {
            message: message.clone(),
            history: self.log.clone(),
        };

        self.log.push(ChatMessage::user(message));
        self.input.clear();
        self.status = ChatStatus::AwaitingResponse;
        Some(request)
    }

    /// Completes the outstanding exchange. Failures are logged and replaced by
    /// the fixed apology. Returns `false` if nothing was outstanding.
    pub fn resolve(&mut self, outcome: Result<String, TransportError>) -> bool {
        if self.status != ChatStatus::AwaitingResponse {
            return false;
        }

        let reply = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                log_failure(&err);
                APOLOGY.to_string()
            }
        };
        self.log.push(ChatMessage::assistant(reply));
        self.status = ChatStatus::Idle;
        true
    }

    pub fn open(&mut self) {
        self.panel_open = true;
    }

    pub fn close(&mut self) {
        self.panel_open = false;
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Restores the greeting-only log. Refused while a request is outstanding,
    /// since its reply would otherwise land in the fresh conversation.
    pub fn reset(&mut self) -> bool {
        if self.status == ChatStatus::AwaitingResponse {
            return false;
        }
        self.log = vec![ChatMessage::assistant(GREETING)];
        self.input.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_api::models::chat::Role;
    use reqwest::StatusCode;

    fn status_error() -> TransportError {
        TransportError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        }
    }

    #[test]
    fn test_seeded_with_greeting() {
        let chat = ChatController::default();
        assert_eq!(chat.log(), &[ChatMessage::assistant(GREETING)]);
        assert_eq!(chat.status(), ChatStatus::Idle);
    }

    #[test]
    fn test_successful_exchange() {
        let mut chat = ChatController::default();
        chat.set_input("Quelles sont tes certifications?");

        let request = chat.begin_submit().unwrap();
        assert_eq!(request.message, "Quelles sont tes certifications?");
        assert_eq!(request.history, vec![ChatMessage::assistant(GREETING)]);

        // Optimistic append, cleared input, affordance disabled.
        assert_eq!(chat.log().len(), 2);
        assert_eq!(chat.log()[1].role, Role::User);
        assert_eq!(chat.input(), "");
        assert_eq!(chat.status(), ChatStatus::AwaitingResponse);

        assert!(chat.resolve(Ok("Trois certifications.".into())));
        assert_eq!(chat.log().len(), 3);
        assert_eq!(
            chat.log()[2],
            ChatMessage::assistant("Trois certifications.")
        );
        assert_eq!(chat.status(), ChatStatus::Idle);
    }

    #[test]
    fn test_failure_appends_apology() {
        let mut chat = ChatController::default();
        chat.set_input("Salut");
        chat.begin_submit().unwrap();

        assert!(chat.resolve(Err(status_error())));
        assert_eq!(chat.log().len(), 3);
        assert_eq!(chat.log()[1], ChatMessage::user("Salut"));
        assert_eq!(chat.log()[2], ChatMessage::assistant(APOLOGY));
        assert_eq!(chat.status(), ChatStatus::Idle);

        // Usable again afterwards.
        chat.set_input("Encore");
        assert!(chat.begin_submit().is_some());
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut chat = ChatController::default();
        chat.set_input("   \n\t");
        let before = chat.clone();
        assert!(chat.begin_submit().is_none());
        assert_eq!(chat, before);
    }

    #[test]
    fn test_submit_while_awaiting_is_noop() {
        let mut chat = ChatController::default();
        chat.set_input("first");
        chat.begin_submit().unwrap();

        chat.set_input("second");
        assert!(!chat.can_submit());
        assert!(chat.begin_submit().is_none());
        assert_eq!(chat.log().len(), 2);
        // The typed text is kept for after the reply arrives.
        assert_eq!(chat.input(), "second");
    }

    #[test]
    fn test_input_is_trimmed() {
        let mut chat = ChatController::default();
        chat.set_input("  Bonjour  ");
        let request = chat.begin_submit().unwrap();
        assert_eq!(request.message, "Bonjour");
        assert_eq!(chat.log()[1].content, "Bonjour");
    }

    #[test]
    fn test_stray_resolve_is_ignored() {
        let mut chat = ChatController::default();
        assert!(!chat.resolve(Ok("late".into())));
        assert_eq!(chat.log().len(), 1);
    }

    #[test]
    fn test_reply_applied_while_panel_closed() {
        let mut chat = ChatController::default();
        chat.open();
        chat.set_input("question");
        chat.begin_submit().unwrap();
        chat.close();

        assert!(chat.resolve(Ok("réponse".into())));
        assert!(!chat.is_panel_open());
        assert_eq!(chat.log().len(), 3);

        // Reopening keeps the conversation.
        chat.toggle_panel();
        assert!(chat.is_panel_open());
        assert_eq!(chat.log().len(), 3);
    }

    #[test]
    fn test_reset_refused_while_awaiting() {
        let mut chat = ChatController::default();
        chat.set_input("question");
        chat.begin_submit().unwrap();
        assert!(!chat.reset());

        chat.resolve(Ok("réponse".into()));
        assert!(chat.reset());
        assert_eq!(chat.log(), &[ChatMessage::assistant(GREETING)]);
    }
}
