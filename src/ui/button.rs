//! Bordered push button.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::theme::Theme;

pub struct Button<'a> {
    pub label: &'a str,
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::button_border_style());
        Paragraph::new(self.label)
            .style(Theme::button_style())
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
