//! # Session Controller
//!
//! Owns the `App` and is the only place state changes. User intent arrives
//! as method calls; finished reply timers arrive as `Action::ReplyDue` on the
//! controller's own channel. Both go through `update()`.
//!
//! ```text
//!  send_current_input ──▶ update() ──Effect::ScheduleReply──▶ reply queue
//!                                                                 │
//!                                                   sleep_until(due_at)
//!                                                                 │
//!  pump() / process_next() ◀── Action::ReplyDue ◀─────────────────┘
//!          │
//!          └──▶ update() ──▶ observers
//! ```
//!
//! A single reply task drains the queue in order, so replies come back in
//! send order even if due times ever stop being monotonic. The task never
//! touches state; it only posts actions.
//!
//! Must be created inside a tokio runtime (the reply task is spawned on `new`).

use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;

use crate::core::action::{Action, Effect, Notice, update};
use crate::core::attachment::FileRef;
use crate::core::config::ResolvedConfig;
use crate::core::conversation::ComposeTicket;
use crate::core::error::SessionError;
use crate::core::mode::ModeId;
use crate::core::state::{App, StateSnapshot};

/// Receives state changes and notices from a [`SessionController`].
pub trait SessionObserver {
    /// Called after every operation that changed observable state.
    fn on_state_change(&mut self, _snapshot: &StateSnapshot<'_>) {}

    /// Called for transient user feedback (new chat, file staged).
    fn on_notice(&mut self, _notice: &Notice) {}
}

/// A compose ticket plus the instant its reply is due.
#[derive(Debug)]
struct ScheduledReply {
    ticket: ComposeTicket,
    due_at: Instant,
}

pub struct SessionController {
    app: App,
    reply_delay: Duration,
    schedule_tx: UnboundedSender<ScheduledReply>,
    action_rx: UnboundedReceiver<Action>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl SessionController {
    pub fn new(app: App, reply_delay: Duration) -> Self {
        let (schedule_tx, schedule_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_reply_queue(schedule_rx, action_tx));

        info!(
            "Session {} started (mode: {}, reply delay: {:?})",
            app.session_id, app.selected_mode, reply_delay
        );

        Self {
            app,
            reply_delay,
            schedule_tx,
            action_rx,
            observers: Vec::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(App::from_config(config), config.reply_delay)
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn snapshot(&self) -> StateSnapshot<'_> {
        self.app.snapshot()
    }

    /// Sends `text` with the staged file, if any. Returns before the reply exists.
    pub fn send_current_input(&mut self, text: &str) -> Result<(), SessionError> {
        self.dispatch(Action::Submit(text.to_string())).map(|_| ())
    }

    /// Selects a mode by string id; unknown ids leave the selection untouched.
    pub fn select_mode(&mut self, mode_id: &str) -> Result<(), SessionError> {
        let mode = mode_id.parse::<ModeId>()?;
        self.select_mode_id(mode);
        Ok(())
    }

    pub fn select_mode_id(&mut self, mode: ModeId) {
        self.apply(Action::SelectMode(mode));
    }

    pub fn cycle_mode(&mut self) {
        let next = self.app.selected_mode.next();
        self.select_mode_id(next);
    }

    pub fn start_new_chat(&mut self) {
        self.apply(Action::NewChat);
    }

    pub fn attach_file(&mut self, file: FileRef) {
        self.apply(Action::AttachFile(file));
    }

    pub fn discard_attachment(&mut self) {
        self.apply(Action::DiscardAttachment);
    }

    /// Returns true once the session agrees to shut down.
    pub fn quit(&mut self) -> bool {
        info!("Session {} ending", self.app.session_id);
        matches!(self.dispatch(Action::Quit), Ok(Effect::Quit))
    }

    /// Applies every reply that has already come due. Never blocks.
    /// Returns how many completion events were processed.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.apply(action);
            processed += 1;
        }
        processed
    }

    /// Waits until a reply comes due and changes the conversation.
    /// Returns `false` without waiting when no reply is outstanding.
    ///
    /// Deliveries that change nothing (a second reply for an answered
    /// message) are consumed and the wait goes on.
    pub async fn process_next(&mut self) -> bool {
        while self.app.conversation.has_pending_replies() {
            let Some(action) = self.action_rx.recv().await else {
                return false;
            };
            match self.dispatch(action) {
                Ok(Effect::None) => debug!("Reply delivery changed nothing, still waiting"),
                Ok(_) => return true,
                Err(e) => warn!("Action rejected: {}", e),
            }
        }
        false
    }

    /// Dispatch for infallible actions.
    fn apply(&mut self, action: Action) {
        if let Err(e) = self.dispatch(action) {
            warn!("Action rejected: {}", e);
        }
    }

    fn dispatch(&mut self, action: Action) -> Result<Effect, SessionError> {
        debug!("Session received: {:?}", action);
        let effect = update(&mut self.app, action)?;
        match &effect {
            Effect::None | Effect::Quit => {}
            Effect::Render => self.notify_state(),
            Effect::ScheduleReply(ticket) => {
                self.schedule_reply(ticket.clone());
                self.notify_state();
            }
            Effect::Notify(notice) => {
                self.notify_state();
                for observer in &mut self.observers {
                    observer.on_notice(notice);
                }
            }
        }
        Ok(effect)
    }

    fn schedule_reply(&self, ticket: ComposeTicket) {
        let scheduled = ScheduledReply {
            ticket,
            due_at: Instant::now() + self.reply_delay,
        };
        if let Err(e) = self.schedule_tx.send(scheduled) {
            warn!(
                "Reply queue closed, dropping reply for message {}",
                e.0.ticket.reply_to
            );
        }
    }

    fn notify_state(&mut self) {
        let snapshot = self.app.snapshot();
        for observer in &mut self.observers {
            observer.on_state_change(&snapshot);
        }
    }
}

/// Delivers each scheduled reply once its due time passes, strictly in queue order.
async fn run_reply_queue(
    mut queue: UnboundedReceiver<ScheduledReply>,
    tx: UnboundedSender<Action>,
) {
    while let Some(scheduled) = queue.recv().await {
        tokio::time::sleep_until(scheduled.due_at).await;
        debug!("Reply due for message {}", scheduled.ticket.reply_to);
        if tx.send(Action::ReplyDue(scheduled.ticket)).is_err() {
            warn!("Failed to deliver reply: session dropped");
            return;
        }
    }
}
