//! # Conversation Store
//!
//! The append-only message log plus the bookkeeping for compose cycles.
//!
//! ```text
//! append_user_message ──▶ Composing ──(reply delay)──▶ complete_cycle ──▶ Idle
//! ```
//!
//! Several cycles may be open at once (nothing locks the input while the
//! assistant "types"). `is_composing()` stays true until every open cycle of
//! the current conversation has its reply.
//!
//! Cycles are tracked by the id of the user message they answer, so a second
//! reply for the same message is refused. `clear()` keeps no transcript, but a
//! reply still in flight from before it is appended to the fresh log without
//! reopening the composing state.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::attachment::FileRef;
use crate::core::error::SessionError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry. Never mutated after it is appended.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub attachment: Option<FileRef>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: String, attachment: Option<FileRef>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            attachment,
            created_at: Utc::now(),
        }
    }
}

/// Everything the reply task needs to come back with an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeTicket {
    /// Id of the user message being answered.
    pub reply_to: String,
    /// The user's text, echoed in the reply.
    pub prompt: String,
}

impl ComposeTicket {
    pub fn new(message: &Message) -> Self {
        Self {
            reply_to: message.id.clone(),
            prompt: message.content.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    /// Unanswered user message ids of the current conversation, in send order.
    open: VecDeque<String>,
    /// Unanswered ids left behind by `clear()`.
    orphaned: VecDeque<String>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message and opens a compose cycle.
    ///
    /// Rejects the message when the text is blank and there is no attachment.
    pub fn append_user_message(
        &mut self,
        text: String,
        attachment: Option<FileRef>,
    ) -> Result<&Message, SessionError> {
        if text.trim().is_empty() && attachment.is_none() {
            return Err(SessionError::EmptyMessage);
        }
        let message = Message::new(Role::User, text, attachment);
        self.open.push_back(message.id.clone());
        Ok(self.push(message))
    }

    /// Ticket for the compose cycle opened by `message`.
    pub fn ticket_for(&self, message: &Message) -> ComposeTicket {
        ComposeTicket::new(message)
    }

    /// True while the message `ticket` answers is still waiting for its reply.
    pub fn accepts(&self, ticket: &ComposeTicket) -> bool {
        self.open.contains(&ticket.reply_to) || self.orphaned.contains(&ticket.reply_to)
    }

    /// Appends `reply` for `ticket`. Returns `None` if that message was
    /// already answered or never sent.
    ///
    /// A reply for a message sent before `clear()` still lands in the current
    /// log but does not close any of the current conversation's cycles.
    pub(crate) fn complete_cycle(&mut self, ticket: &ComposeTicket, reply: String) -> Option<&Message> {
        if let Some(pos) = self.open.iter().position(|id| *id == ticket.reply_to) {
            self.open.remove(pos);
        } else if let Some(pos) = self.orphaned.iter().position(|id| *id == ticket.reply_to) {
            self.orphaned.remove(pos);
        } else {
            return None;
        }
        Some(self.append_assistant_message(reply))
    }

    pub(crate) fn append_assistant_message(&mut self, text: String) -> &Message {
        self.push(Message::new(Role::Assistant, text, None))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Empties the log. Open cycles stop counting towards `is_composing`,
    /// but their replies are still accepted.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.orphaned.extend(self.open.drain(..));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_composing(&self) -> bool {
        !self.open.is_empty()
    }

    /// True while any reply, including one from before `clear()`, is outstanding.
    pub fn has_pending_replies(&self) -> bool {
        !self.open.is_empty() || !self.orphaned.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
