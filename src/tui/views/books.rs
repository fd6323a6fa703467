//! Catalog page: heading plus the book list.

use crossterm::event::Event;
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use super::book_list::BookListState;
use crate::tui::services::Services;
use crate::tui::theme;

pub const HEADING: &str = "Our Library Collection";
pub const SUBTITLE: &str = "Browse through our collection of books and discover new titles";

#[derive(Default)]
pub struct BooksPage {
    pub list: BookListState,
}

impl BooksPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, services: &Services) {
        self.list.mount(services);
    }

    pub fn unmount(&mut self) {
        self.list.unmount();
    }

    pub fn poll(&mut self) -> bool {
        self.list.poll()
    }

    pub fn is_capturing_input(&self) -> bool {
        self.list.is_capturing_input()
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        self.list.handle_input(event, services)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [heading, subtitle, _, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area.inner(Margin::new(1, 0)));

        frame.render_widget(Paragraph::new(Span::styled(HEADING, theme::title())), heading);
        frame.render_widget(Paragraph::new(Span::styled(SUBTITLE, theme::muted())), subtitle);
        self.list.render(frame, body);
    }
}
