//! # TitleBar Component
//!
//! Top status bar showing application state and notifications.
//!
//! ## Responsibilities
//!
//! - Display the session start time
//! - Display the core status message ("Hamsi yazıyor...", "Dosya seçildi: ...")
//! - Display a transient notice, when one is live, in place of the status
//! - Show "↓ Yeni" when there's unseen content below the scroll position
//!
//! ## Conditional Formatting
//!
//! 1. **Notice**: `"Hamsi AI · 14:05 | Yeni sohbet başlatıldı"`
//! 2. **Status message**: `"Hamsi AI · 14:05 | Hamsi yazıyor..."`
//! 3. **Default**: `"Hamsi AI · 14:05"`
//!
//! `" | ↓ Yeni"` is appended in every case when content is hidden below.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// All fields are props. `notice` comes from the TUI's toast timer, the
/// rest from core state.
pub struct TitleBar {
    /// Session start, already formatted as local HH:MM
    pub started_at: String,
    pub status_message: String,
    /// Transient notice that overrides the status while it is live
    pub notice: Option<String>,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(
        started_at: String,
        status_message: String,
        notice: Option<String>,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            started_at,
            status_message,
            notice,
            has_unseen_content,
        }
    }

    fn title_text(&self) -> String {
        let mut text = format!("Hamsi AI · {}", self.started_at);
        let status = self.notice.as_deref().unwrap_or(&self.status_message);
        if !status.is_empty() {
            text.push_str(" | ");
            text.push_str(status);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ Yeni");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.notice.is_some() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        frame.render_widget(Line::from(Span::styled(self.title_text(), style)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar =
            TitleBar::new("14:05".into(), "Hamsi yazıyor...".into(), None, false);
        let text = render(&mut title_bar);

        assert!(text.contains("Hamsi AI"));
        assert!(text.contains("14:05"));
        assert!(text.contains("Hamsi yazıyor..."));
        assert!(!text.contains("↓ Yeni"));
    }

    #[test]
    fn test_notice_overrides_status() {
        let mut title_bar = TitleBar::new(
            "14:05".into(),
            "Hamsi yazıyor...".into(),
            Some("Yeni sohbet başlatıldı".into()),
            true,
        );
        let text = render(&mut title_bar);

        assert!(text.contains("Yeni sohbet başlatıldı"));
        assert!(!text.contains("yazıyor"));
        assert!(text.contains("↓ Yeni"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let title_bar = TitleBar::new("09:30".into(), String::new(), None, false);
        assert_eq!(title_bar.title_text(), "Hamsi AI · 09:30");
    }
}
