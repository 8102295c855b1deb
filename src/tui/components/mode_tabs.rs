//! # ModeTabs Component
//!
//! One tab per response mode, with the selected mode's description
//! on the line below.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Tabs};

use crate::core::mode::{Mode, list_modes};
use crate::tui::component::Component;

pub const MODE_TABS_HEIGHT: u16 = 2;

pub struct ModeTabs {
    pub selected: &'static Mode,
}

impl ModeTabs {
    pub fn new(selected: &'static Mode) -> Self {
        Self { selected }
    }
}

impl Component for ModeTabs {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [tabs_area, description_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let titles = list_modes().iter().map(|m| Line::from(m.display_name));
        let tabs = Tabs::new(titles)
            .select(self.selected.id.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, tabs_area);

        let description = Paragraph::new(self.selected.description)
            .style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC));
        frame.render_widget(description, description_area);
    }
}
