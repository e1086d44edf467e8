//! UI state container. `dispatch` applies one action and reports the side
//! effects the shell must run; rendering is a separate pure function of the store.

use std::sync::Arc;

use portfolio_api::models::chat::ChatRequest;
use portfolio_api::models::content::{CollectionKind, ContentItem, Portfolio};

use crate::chat::ChatController;
use crate::navigation::NavigationState;
use crate::transport::TransportError;

#[derive(Debug)]
pub enum Action {
    SelectCollection(CollectionKind),
    Next,
    Previous,
    SelectIndex(usize),
    ToggleFlip(String),
    /// Flips the card currently shown in the carousel.
    ToggleActiveFlip,
    EditInput(String),
    Submit,
    ChatResolved(Result<String, TransportError>),
    OpenChat,
    CloseChat,
    ToggleChat,
    ClearChat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SendChat(ChatRequest),
    ScrollChatToEnd,
    RecenterTimeline { index: usize },
}

pub struct Store {
    portfolio: Arc<Portfolio>,
    nav: NavigationState,
    chat: ChatController,
}

impl Store {
    pub fn new(portfolio: Arc<Portfolio>) -> Self {
        Self {
            portfolio,
            nav: NavigationState::default(),
            chat: ChatController::default(),
        }
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn chat(&self) -> &ChatController {
        &self.chat
    }

    pub fn active_items(&self) -> &[ContentItem] {
        self.portfolio.collection(self.nav.active())
    }

    pub fn active_item(&self) -> Option<&ContentItem> {
        self.active_items().get(self.nav.index())
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let index_before = self.nav.index();
        let collection_before = self.nav.active();
        let log_before = self.chat.log().len();
        let mut effects = Vec::new();

        let len = self.active_items().len();
        match action {
            Action::SelectCollection(kind) => self.nav.select_collection(kind),
            Action::Next => self.nav.next(len),
            Action::Previous => self.nav.previous(len),
            Action::SelectIndex(index) => {
                self.nav.select_index(index, len);
            }
            Action::ToggleFlip(id) => self.nav.toggle_flip(&id),
            Action::ToggleActiveFlip => {
                if let Some(id) = self.active_item().map(|item| item.id.clone()) {
                    self.nav.toggle_flip(&id);
                }
            }
            Action::EditInput(text) => self.chat.set_input(text),
            Action::Submit => {
                if let Some(request) = self.chat.begin_submit() {
                    effects.push(Effect::SendChat(request));
                }
            }
            Action::ChatResolved(outcome) => {
                self.chat.resolve(outcome);
            }
            Action::OpenChat => self.chat.open(),
            Action::CloseChat => self.chat.close(),
            Action::ToggleChat => self.chat.toggle_panel(),
            Action::ClearChat => {
                self.chat.reset();
            }
        }

        if self.nav.index() != index_before || self.nav.active() != collection_before {
            effects.push(Effect::RecenterTimeline {
                index: self.nav.index(),
            });
        }
        if self.chat.log().len() > log_before {
            effects.push(Effect::ScrollChatToEnd);
        }
        effects
    }
}
