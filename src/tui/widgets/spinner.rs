//! Loading indicator.

use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MS: u128 = 80;

/// Spinner glyph for a point in time given in milliseconds.
pub fn frame_at(millis: u128) -> &'static str {
    FRAMES[((millis / FRAME_MS) % FRAMES.len() as u128) as usize]
}

/// A one-line animated spinner with a label. Stateless: the frame is derived
/// from the wall clock, so redraws on tick animate it.
pub struct LoadingSpinner<'a> {
    label: &'a str,
    alignment: Alignment,
}

impl<'a> LoadingSpinner<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            alignment: Alignment::Left,
        }
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    /// The spinner as a text line, for embedding in larger paragraphs.
    pub fn line(&self) -> Line<'a> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        Line::from(vec![
            Span::styled(frame_at(millis), Style::default().fg(theme::PRIMARY)),
            Span::raw(" "),
            Span::styled(self.label, theme::muted()),
        ])
    }
}

impl Default for LoadingSpinner<'_> {
    fn default() -> Self {
        Self::new("Loading...")
    }
}

impl Widget for LoadingSpinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line())
            .alignment(self.alignment)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cycle() {
        assert_eq!(frame_at(0), FRAMES[0]);
        assert_eq!(frame_at(FRAME_MS), FRAMES[1]);
        assert_eq!(frame_at(FRAME_MS * FRAMES.len() as u128), FRAMES[0]);
    }

    #[test]
    fn test_renders_label() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        LoadingSpinner::default().render(area, &mut buf);
        let text: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(text.contains("Loading..."));
    }
}
