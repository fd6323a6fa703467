use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::tui::theme;

/// Bordered title + description box shown on the landing page.
pub struct FeatureCard<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

impl<'a> FeatureCard<'a> {
    pub fn new(title: &'a str, description: &'a str) -> Self {
        Self { title, description }
    }
}

impl Widget for FeatureCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(self.title, theme::title())),
            Line::raw(""),
            Line::from(Span::styled(self.description, theme::muted())),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(theme::card_block(false))
            .render(area, buf);
    }
}
