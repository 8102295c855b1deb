use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::attachment::FileRef;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    INPUT_HEIGHT, MODE_TABS_HEIGHT, MessageList, ModeTabs, TitleBar,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let snapshot = app.snapshot();
    let chip_height = u16::from(snapshot.staged_attachment.is_some());
    let layout = Layout::vertical([
        Length(1),
        Length(MODE_TABS_HEIGHT),
        Min(0),
        Length(chip_height),
        Length(INPUT_HEIGHT),
    ]);
    let [title_area, tabs_area, main_area, chip_area, input_area] = layout.areas(frame.area());

    let mut message_list = MessageList::new(
        &mut tui.message_list,
        snapshot.messages,
        snapshot.is_composing,
        spinner_frame,
    );
    message_list.render(frame, main_area);

    let mut title_bar = TitleBar::new(
        app.started_at.with_timezone(&Local).format("%H:%M").to_string(),
        app.status_message.clone(),
        tui.live_notice().map(str::to_string),
        tui.message_list.has_unseen_content(),
    );
    title_bar.render(frame, title_area);

    ModeTabs::new(snapshot.selected_mode).render(frame, tabs_area);

    if let Some(file) = snapshot.staged_attachment {
        draw_attachment_chip(frame, chip_area, file);
    }

    tui.input_box.composing = snapshot.is_composing;
    tui.input_box.render(frame, input_area);
}

fn draw_attachment_chip(frame: &mut Frame, area: Rect, file: &FileRef) {
    let chip = Line::from(vec![
        Span::styled(" [dosya] ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{} ({}) ", file.name, file.display_size())),
        Span::styled(
            "Ctrl+D: kaldır",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(chip, area);
}
