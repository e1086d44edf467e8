//! Terminal front end state: the store plus what only the terminal needs
//! (the command line being typed, the help overlay, chat scrollback).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use portfolio_api::models::chat::ChatRequest;

use crate::chat::ChatStatus;
use crate::commands::{parse_line, Command};
use crate::store::{Action, Effect, Store};
use crate::transport::TransportError;

pub const SEND_DISABLED: &str = "envoi désactivé pendant la réponse";

pub struct App {
    store: Store,
    prompt: String,
    message: Option<String>,
    show_help: bool,
    /// Lines scrolled back from the end of the chat log.
    chat_scroll: u16,
    quit: bool,
}

impl App {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            prompt: String::new(),
            message: None,
            show_help: false,
            chat_scroll: 0,
            quit: false,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn chat_scroll(&self) -> u16 {
        self.chat_scroll
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Dispatches one action and runs the effects that stay inside the
    /// terminal. Chat requests are handed back for the caller to send.
    pub fn apply(&mut self, action: Action) -> Vec<ChatRequest> {
        let mut requests = Vec::new();
        for effect in self.store.dispatch(action) {
            match effect {
                Effect::SendChat(request) => requests.push(request),
                Effect::ScrollChatToEnd => self.chat_scroll = 0,
                Effect::RecenterTimeline { index } => {
                    debug!("Timeline recentered on {index}");
                }
            }
        }
        requests
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Vec<ChatRequest> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Vec::new();
        }
        if self.show_help {
            // any key dismisses the overlay
            self.show_help = false;
            return Vec::new();
        }

        match key.code {
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Char(c) => {
                self.prompt.push(c);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.prompt.pop();
                Vec::new()
            }
            KeyCode::Esc if self.prompt.is_empty() => self.apply(Action::CloseChat),
            KeyCode::Esc => {
                self.prompt.clear();
                Vec::new()
            }
            KeyCode::Left if self.prompt.is_empty() => self.apply(Action::Previous),
            KeyCode::Right if self.prompt.is_empty() => self.apply(Action::Next),
            KeyCode::Tab => self.apply(Action::ToggleActiveFlip),
            KeyCode::PageUp => {
                self.chat_scroll = self.chat_scroll.saturating_add(5);
                Vec::new()
            }
            KeyCode::PageDown => {
                self.chat_scroll = self.chat_scroll.saturating_sub(5);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn submit_prompt(&mut self) -> Vec<ChatRequest> {
        let line = self.prompt.trim();
        let awaiting = self.store.chat().status() == ChatStatus::AwaitingResponse;
        if awaiting && !line.is_empty() && !line.starts_with(':') {
            // the question stays in the prompt until it can be sent
            self.message = Some(SEND_DISABLED.to_string());
            return Vec::new();
        }

        let command = parse_line(line);
        self.prompt.clear();
        self.message = None;
        match command {
            Command::Dispatch(actions) => actions
                .into_iter()
                .flat_map(|action| self.apply(action))
                .collect(),
            Command::Help => {
                self.show_help = true;
                Vec::new()
            }
            Command::Invalid(reason) => {
                self.message = Some(reason);
                Vec::new()
            }
            Command::Quit => {
                self.quit = true;
                Vec::new()
            }
        }
    }

    /// Applies chat outcomes until no request is outstanding. Used once input
    /// has ended so a reply already in flight still lands in the log.
    pub async fn settle(&mut self, outcomes: &mut UnboundedReceiver<Result<String, TransportError>>) {
        while self.store.chat().status() == ChatStatus::AwaitingResponse {
            let Some(outcome) = outcomes.recv().await else {
                break;
            };
            self.apply(Action::ChatResolved(outcome));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use portfolio_api::content::loader::parse_portfolio;
    use portfolio_api::models::chat::Role;
    use tokio::sync::mpsc;

    use super::*;
    use crate::chat::APOLOGY;

    fn app() -> App {
        let portfolio =
            parse_portfolio(include_str!("../../api/content/portfolio.yaml")).unwrap();
        App::new(Store::new(Arc::new(portfolio)))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(app: &mut App, line: &str) -> Vec<ChatRequest> {
        for c in line.chars() {
            app.on_key(press(KeyCode::Char(c)));
        }
        app.on_key(press(KeyCode::Enter))
    }

    #[test]
    fn test_arrows_navigate_and_tab_flips() {
        let mut app = app();
        app.on_key(press(KeyCode::Right));
        app.on_key(press(KeyCode::Right));
        assert_eq!(app.store().nav().index(), 2);
        app.on_key(press(KeyCode::Left));
        assert_eq!(app.store().nav().index(), 1);

        app.on_key(press(KeyCode::Tab));
        assert!(app.store().nav().is_flipped("exp2"));
    }

    #[test]
    fn test_typed_question_becomes_request() {
        let mut app = app();
        let requests = type_line(&mut app, "Quelles sont tes certifications?");

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "Quelles sont tes certifications?");
        assert_eq!(requests[0].history.len(), 1);
        assert!(app.prompt().is_empty());
        assert!(app.store().chat().is_panel_open());
    }

    #[test]
    fn test_question_is_held_while_awaiting() {
        let mut app = app();
        type_line(&mut app, "first");
        let requests = type_line(&mut app, "second");

        assert!(requests.is_empty());
        assert_eq!(app.prompt(), "second");
        assert_eq!(app.message(), Some(SEND_DISABLED));
        assert_eq!(app.store().chat().log().len(), 2);

        // commands still work while a reply is pending
        app.on_key(press(KeyCode::Esc));
        type_line(&mut app, ":n");
        assert_eq!(app.store().nav().index(), 1);
    }

    #[test]
    fn test_help_overlay_and_invalid_command() {
        let mut app = app();
        type_line(&mut app, ":help");
        assert!(app.show_help());
        app.on_key(press(KeyCode::Char('x')));
        assert!(!app.show_help());
        assert!(app.prompt().is_empty());

        type_line(&mut app, ":go 42x");
        assert_eq!(app.message(), Some("Position invalide: 42x"));
    }

    #[test]
    fn test_quit_command_and_ctrl_c() {
        let mut typed = app();
        type_line(&mut typed, ":q");
        assert!(typed.should_quit());

        let mut interrupted = app();
        interrupted.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(interrupted.should_quit());
    }

    #[test]
    fn test_new_message_scrolls_chat_to_end() {
        let mut app = app();
        app.on_key(press(KeyCode::PageUp));
        assert_eq!(app.chat_scroll(), 5);

        type_line(&mut app, "Salut");
        assert_eq!(app.chat_scroll(), 0);
    }

    #[tokio::test]
    async fn test_settle_applies_reply_that_arrives_after_input_ends() {
        let mut app = app();
        type_line(&mut app, "Quelles sont tes certifications?");
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = tx.send(Ok("AZ-900, Dataiku, Hugging Face".to_string()));
        });

        app.settle(&mut rx).await;

        let log = app.store().chat().log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2].role, Role::Assistant);
        assert_eq!(log[2].content, "AZ-900, Dataiku, Hugging Face");
        assert_eq!(app.store().chat().status(), ChatStatus::Idle);
    }

    #[tokio::test]
    async fn test_settle_applies_failure_as_apology() {
        let mut app = app();
        type_line(&mut app, "Salut");
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(Err(TransportError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }))
        .unwrap();

        app.settle(&mut rx).await;
        let log = app.store().chat().log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2].content, APOLOGY);
    }

    #[tokio::test]
    async fn test_settle_stops_when_sender_is_gone() {
        let mut app = app();
        type_line(&mut app, "Salut");
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(tx);
        app.settle(&mut rx).await;
        assert_eq!(app.store().chat().log().len(), 2);
    }

    #[tokio::test]
    async fn test_settle_returns_immediately_when_idle() {
        let mut app = app();
        let (_tx, mut rx) = mpsc::unbounded_channel();
        app.settle(&mut rx).await;
        assert_eq!(app.store().chat().log().len(), 1);
    }
}
