//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `SessionController` calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply pending, notice on screen): draws every ~80ms so the
//!   typing indicator moves and the reply shows up as soon as it is due.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

pub mod attach;
mod command;
mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::SessionError;
use crate::core::action::Notice;
use crate::core::config::ResolvedConfig;
use crate::core::session::{SessionController, SessionObserver};
use crate::tui::command::Command;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How long a notice stays in the title bar.
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Transient title bar text and when it was raised
    notice: Option<(String, Instant)>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            notice: None,
        }
    }

    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some((text.into(), Instant::now()));
    }

    /// The current notice, if it hasn't expired.
    pub fn live_notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|(_, raised)| raised.elapsed() < NOTICE_TTL)
            .map(|(text, _)| text.as_str())
    }
}

pub fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::NewSession => String::from("Yeni sohbet başlatıldı"),
        Notice::FileStaged(name) => format!("Dosya seçildi: {}", name),
    }
}

/// Forwards session notices to the event loop.
struct NoticeForwarder {
    tx: mpsc::Sender<Notice>,
}

impl SessionObserver for NoticeForwarder {
    fn on_notice(&mut self, notice: &Notice) {
        if self.tx.send(notice.clone()).is_err() {
            warn!("Failed to forward notice {:?}: receiver dropped", notice);
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The Kitty protocol is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Must be called from within a multi-threaded tokio runtime.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut session = SessionController::from_config(&config);
    let mut tui = TuiState::new();

    let (notice_tx, notice_rx) = mpsc::channel();
    session.subscribe(Box::new(NoticeForwarder { tx: notice_tx }));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = session.app().conversation.is_composing() || tui.live_notice().is_some();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, session.app(), &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            should_quit |= handle_event(&event, &mut session, &mut tui);
        }

        // Replies whose delay elapsed since the last pass
        if session.pump() > 0 {
            needs_redraw = true;
        }
        while let Ok(notice) = notice_rx.try_recv() {
            tui.show_notice(notice_text(&notice));
            needs_redraw = true;
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Routes one terminal event. Returns true when the app should exit.
fn handle_event(event: &TuiEvent, session: &mut SessionController, tui: &mut TuiState) -> bool {
    match event {
        TuiEvent::Resize => {}
        TuiEvent::Quit | TuiEvent::ForceQuit => return session.quit(),
        TuiEvent::CycleMode => session.cycle_mode(),
        TuiEvent::NewChat => start_new_chat(session, tui),
        TuiEvent::DiscardFile => session.discard_attachment(),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(event);
        }
        _ => {
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(event) {
                submit(&text, session, tui);
            }
        }
    }
    false
}

fn submit(text: &str, session: &mut SessionController, tui: &mut TuiState) {
    let Some(command) = command::parse(text) else {
        match session.send_current_input(text) {
            Ok(()) => {
                tui.input_box.clear();
                // Sending jumps back to the newest message
                tui.message_list.stick_to_bottom = true;
            }
            Err(SessionError::EmptyMessage) => debug!("Ignoring empty send"),
            Err(e) => tui.show_notice(e.to_string()),
        }
        return;
    };

    match command {
        Command::Attach(path) => attach(&path, session, tui),
        Command::Mode(id) => match session.select_mode(&id) {
            Ok(()) => tui.input_box.clear(),
            Err(e) => tui.show_notice(e.to_string()),
        },
        Command::NewChat => {
            start_new_chat(session, tui);
            tui.input_box.clear();
        }
        Command::Usage(usage) => tui.show_notice(format!("Kullanım: {}", usage)),
    }
}

fn attach(path: &Path, session: &mut SessionController, tui: &mut TuiState) {
    match attach::describe_file(&attach::expand_home(path)) {
        Ok(file) => {
            session.attach_file(file);
            tui.input_box.clear();
        }
        Err(e) => {
            warn!("Cannot attach {}: {}", path.display(), e);
            tui.show_notice(format!("Dosya okunamadı: {}", e));
        }
    }
}

fn start_new_chat(session: &mut SessionController, tui: &mut TuiState) {
    session.start_new_chat();
    tui.message_list = MessageListState::new();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn session() -> SessionController {
        SessionController::new(test_app(), Duration::from_millis(1000))
    }

    fn type_text(tui: &mut TuiState, session: &mut SessionController, text: &str) {
        for c in text.chars() {
            handle_event(&TuiEvent::InputChar(c), session, tui);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_sends_and_clears_input() {
        let mut session = session();
        let mut tui = TuiState::new();
        type_text(&mut tui, &mut session, "Merhaba");

        assert!(!handle_event(&TuiEvent::Submit, &mut session, &mut tui));
        assert!(tui.input_box.buffer.is_empty());
        assert_eq!(session.snapshot().messages.len(), 1);
        assert!(session.snapshot().is_composing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_enter_keeps_state() {
        let mut session = session();
        let mut tui = TuiState::new();
        type_text(&mut tui, &mut session, "   ");

        handle_event(&TuiEvent::Submit, &mut session, &mut tui);
        assert_eq!(tui.input_box.buffer, "   ");
        assert!(session.snapshot().messages.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_command_and_unknown_mode_notice() {
        let mut session = session();
        let mut tui = TuiState::new();

        type_text(&mut tui, &mut session, "/mode formal");
        handle_event(&TuiEvent::Submit, &mut session, &mut tui);
        assert_eq!(session.snapshot().selected_mode.display_name, "Resmi");
        assert!(tui.input_box.buffer.is_empty());

        type_text(&mut tui, &mut session, "/mode spanish");
        handle_event(&TuiEvent::Submit, &mut session, &mut tui);
        assert_eq!(session.snapshot().selected_mode.display_name, "Resmi");
        assert!(tui.live_notice().is_some_and(|n| n.contains("spanish")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_missing_file_shows_notice() {
        let mut session = session();
        let mut tui = TuiState::new();

        type_text(&mut tui, &mut session, "/attach /definitely/not/here.pdf");
        handle_event(&TuiEvent::Submit, &mut session, &mut tui);
        assert!(session.snapshot().staged_attachment.is_none());
        assert!(tui.live_notice().is_some_and(|n| n.starts_with("Dosya okunamadı")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_cycles_mode_and_quit_exits() {
        let mut session = session();
        let mut tui = TuiState::new();

        handle_event(&TuiEvent::CycleMode, &mut session, &mut tui);
        assert_eq!(session.snapshot().selected_mode.display_name, "Resmi");
        assert!(handle_event(&TuiEvent::Quit, &mut session, &mut tui));
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(notice_text(&Notice::NewSession), "Yeni sohbet başlatıldı");
        assert_eq!(
            notice_text(&Notice::FileStaged("a.pdf".into())),
            "Dosya seçildi: a.pdf"
        );
    }
}
