//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use rand::rngs::mock::StepRng;

use crate::core::action::Notice;
use crate::core::attachment::FileRef;
use crate::core::mode::ModeId;
use crate::core::responder::Responder;
use crate::core::session::SessionObserver;
use crate::core::state::{App, StateSnapshot};

/// Creates a test App whose responder always picks the first lead-in.
pub fn test_app() -> App {
    App::new(Responder::with_rng(StepRng::new(0, 0)), ModeId::Casual)
}

pub fn pdf() -> FileRef {
    FileRef::new("a.pdf", 2048, "application/pdf")
}

/// What a [`RecordingObserver`] saw, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    State {
        messages: usize,
        composing: bool,
        staged: bool,
    },
    Notice(Notice),
}

/// Observer that appends everything it sees to a shared log.
pub struct RecordingObserver {
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingObserver {
    pub fn new() -> (Self, Arc<Mutex<Vec<Recorded>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (Self { log: log.clone() }, log)
    }
}

impl SessionObserver for RecordingObserver {
    fn on_state_change(&mut self, snapshot: &StateSnapshot<'_>) {
        self.log.lock().unwrap().push(Recorded::State {
            messages: snapshot.messages.len(),
            composing: snapshot.is_composing,
            staged: snapshot.staged_attachment.is_some(),
        });
    }

    fn on_notice(&mut self, notice: &Notice) {
        self.log.lock().unwrap().push(Recorded::Notice(notice.clone()));
    }
}
