//! # Application State
//!
//! Core business state for Hamsi. Domain logic only, no TUI types.
//! Presentation state (input buffer, scroll position) lives in `tui`.
//!
//! ```text
//! App
//! ├── conversation: ConversationStore  // message log + compose cycles
//! ├── attachments: AttachmentHolder    // file staged for the next send
//! ├── selected_mode: ModeId            // decides reply lead-ins
//! ├── responder: Responder             // simulated assistant
//! ├── status_message: String           // status bar text
//! ├── session_id: String               // renewed on "new chat"
//! └── started_at: DateTime<Utc>        // when this conversation began
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Utc};

use crate::core::attachment::{AttachmentHolder, FileRef};
use crate::core::config::ResolvedConfig;
use crate::core::conversation::{ConversationStore, Message};
use crate::core::mode::{Mode, ModeId};
use crate::core::responder::Responder;

pub struct App {
    pub conversation: ConversationStore,
    pub attachments: AttachmentHolder,
    pub selected_mode: ModeId,
    pub responder: Responder,
    pub status_message: String,
    pub session_id: String,
    pub started_at: DateTime<Utc>,
}

/// Read-only view handed to observers and the renderer.
#[derive(Debug, Clone, Copy)]
pub struct StateSnapshot<'a> {
    pub messages: &'a [Message],
    pub is_composing: bool,
    pub selected_mode: &'static Mode,
    pub staged_attachment: Option<&'a FileRef>,
}

impl App {
    pub fn new(responder: Responder, selected_mode: ModeId) -> Self {
        Self {
            conversation: ConversationStore::new(),
            attachments: AttachmentHolder::new(),
            selected_mode,
            responder,
            status_message: String::from("Hamsi AI'ya Hoş Geldiniz"),
            session_id: new_session_id(),
            started_at: Utc::now(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let responder = match config.rng_seed {
            Some(seed) => Responder::with_seed(seed),
            None => Responder::new(),
        };
        Self::new(responder, config.default_mode)
    }

    pub fn snapshot(&self) -> StateSnapshot<'_> {
        StateSnapshot {
            messages: self.conversation.messages(),
            is_composing: self.conversation.is_composing(),
            selected_mode: self.selected_mode.mode(),
            staged_attachment: self.attachments.current(),
        }
    }

    /// Starts a fresh conversation identity (id + start time).
    pub fn renew_session(&mut self) {
        self.session_id = new_session_id();
        self.started_at = Utc::now();
    }
}

/// Generate a new UUID v4 session ID.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Hamsi AI'ya Hoş Geldiniz");
        assert_eq!(app.selected_mode, ModeId::Casual);
        let snapshot = app.snapshot();
        assert!(snapshot.messages.is_empty());
        assert!(!snapshot.is_composing);
        assert!(snapshot.staged_attachment.is_none());
        assert_eq!(snapshot.selected_mode.display_name, "Günlük");
    }

    #[test]
    fn test_renew_session_changes_id() {
        let mut app = test_app();
        let before = app.session_id.clone();
        app.renew_session();
        assert_ne!(app.session_id, before);
    }

    #[test]
    fn test_from_config_uses_default_mode() {
        let config = ResolvedConfig {
            default_mode: ModeId::Formal,
            rng_seed: Some(3),
            ..ResolvedConfig::default()
        };
        let app = App::from_config(&config);
        assert_eq!(app.selected_mode, ModeId::Formal);
    }
}
