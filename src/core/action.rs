//! # Actions
//!
//! Everything that can happen in Hamsi becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The reply timer fires? That's `Action::ReplyDue(ticket)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns an `Effect` describing the follow-up work. No timers and
//! no I/O here; the session controller carries out the effect.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```

use log::{debug, info};

use crate::core::attachment::FileRef;
use crate::core::conversation::ComposeTicket;
use crate::core::error::SessionError;
use crate::core::mode::ModeId;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send the current input along with any staged file.
    Submit(String),
    /// The reply delay for `ticket` elapsed.
    ReplyDue(ComposeTicket),
    SelectMode(ModeId),
    NewChat,
    AttachFile(FileRef),
    DiscardAttachment,
    Quit,
}

/// Transient informational events for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NewSession,
    FileStaged(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// State changed, observers should re-render.
    Render,
    /// A user message was appended; its reply must be scheduled.
    ScheduleReply(ComposeTicket),
    /// State changed and the user should see a notice.
    Notify(Notice),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Result<Effect, SessionError> {
    match action {
        Action::Submit(text) => {
            let attachment = app.attachments.current().cloned();
            let message = app.conversation.append_user_message(text, attachment)?;
            let ticket = ComposeTicket::new(message);
            app.attachments.clear();
            app.status_message = String::from("Hamsi yazıyor...");
            Ok(Effect::ScheduleReply(ticket))
        }
        Action::ReplyDue(ticket) => {
            if !app.conversation.accepts(&ticket) {
                debug!("Ignoring reply for answered or unknown message {}", ticket.reply_to);
                return Ok(Effect::None);
            }
            // Mode is read now, not at send time: a switch mid-delay counts.
            let reply = app.responder.generate(&ticket.prompt, app.selected_mode);
            app.conversation.complete_cycle(&ticket, reply);
            if !app.conversation.is_composing() {
                app.status_message.clear();
            }
            Ok(Effect::Render)
        }
        Action::SelectMode(mode) => {
            app.selected_mode = mode;
            app.status_message = format!("Mod: {}", mode.mode().display_name);
            Ok(Effect::Render)
        }
        Action::NewChat => {
            app.conversation.clear();
            app.attachments.clear();
            app.renew_session();
            app.status_message = String::from("Yeni sohbet başlatıldı");
            info!("New session started: {}", app.session_id);
            Ok(Effect::Notify(Notice::NewSession))
        }
        Action::AttachFile(file) => {
            let name = app.attachments.stage(file).name.clone();
            app.status_message = format!("Dosya seçildi: {}", name);
            info!("File staged: {}", name);
            Ok(Effect::Notify(Notice::FileStaged(name)))
        }
        Action::DiscardAttachment => {
            app.attachments.clear();
            Ok(Effect::Render)
        }
        Action::Quit => Ok(Effect::Quit),
    }
}
