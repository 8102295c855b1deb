use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::conversation::{Message as ChatMessage, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat bubble.
///
/// `Message` is created fresh each frame by `MessageList`. The title shows who
/// spoke, the bottom-right corner the local send time (HH:MM), and a staged
/// file appears as its own line above the text.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options that match `Paragraph` wrapping, so the list can
/// lay out the scroll canvas before rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }

        let attachment_lines = u16::from(message.attachment.is_some());
        let content = message.content.trim();
        if content.is_empty() {
            return attachment_lines.max(1) + VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + attachment_lines + VERTICAL_OVERHEAD
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "sen",
        Role::Assistant => "hamsi",
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::Green),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let role = self.message.role;
        let style = role_style(role);
        let border_style = style.add_modifier(Modifier::DIM);
        let time = self
            .message
            .created_at
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();

        let block = Block::bordered()
            .title(role_label(role))
            .title_bottom(Line::from(time).right_aligned())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        if let Some(file) = &self.message.attachment {
            lines.push(Line::from(vec![
                Span::styled("[dosya] ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} ({})", file.name, file.display_size()),
                    Style::default().add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
        let content = self.message.content.trim();
        if !content.is_empty() {
            lines.push(Line::from(content));
        }

        Paragraph::new(lines)
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::ConversationStore;
    use crate::test_support::pdf;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn user_message(text: &str, with_file: bool) -> ChatMessage {
        let mut store = ConversationStore::new();
        store
            .append_user_message(text.to_string(), with_file.then(pdf))
            .unwrap()
            .clone()
    }

    #[test]
    fn calculate_height_single_line_fits() {
        let msg = user_message("Merhaba", false);
        assert_eq!(Message::calculate_height(&msg, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_attachment_only() {
        let msg = user_message("", true);
        assert_eq!(Message::calculate_height(&msg, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_attachment_adds_a_line() {
        let msg = user_message("Merhaba", true);
        assert_eq!(Message::calculate_height(&msg, 80), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let msg = user_message("Hello world", false);
        // width 9 → content_width = 5: "Hello" | "world"
        assert_eq!(Message::calculate_height(&msg, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let msg = user_message("Hello world", false);
        assert_eq!(Message::calculate_height(&msg, 0), 1);
    }

    #[test]
    fn render_shows_role_and_attachment_name() {
        let backend = TestBackend::new(40, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let msg = user_message("Merhaba", true);

        terminal
            .draw(|f| f.render_widget(Message::new(&msg), f.area()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("sen"));
        assert!(text.contains("a.pdf"));
        assert!(text.contains("Merhaba"));
    }

    #[test]
    fn role_styles_differ() {
        assert_eq!(role_style(Role::User).fg, Some(Color::Cyan));
        assert_eq!(role_style(Role::Assistant).fg, Some(Color::Green));
        assert_eq!(role_label(Role::Assistant), "hamsi");
    }
}
