//! Landing page.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::tui::events::{Action, Route};
use crate::tui::theme;
use crate::tui::widgets::feature_card::FeatureCard;

pub const HEADING: &str = "Library Management System";
const WELCOME: &str = "Welcome to our digital library. Browse our collection, search for books, \
                       and discover AI-powered insights about your favorite titles.";

const FEATURES: [(&str, &str); 2] = [
    (
        "Extensive Collection",
        "Browse through our carefully curated collection of books across various genres.",
    ),
    (
        "AI Insights",
        "Get unique, AI-generated insights about each book in our library.",
    ),
];

#[derive(Debug, Default)]
pub struct HomeView;

impl HomeView {
    pub fn new() -> Self {
        Self
    }

    /// Enter follows the "Browse Books" link.
    pub fn handle_input(&mut self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code: KeyCode::Enter,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        Some(Action::Navigate(Route::Books))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [content] = Layout::horizontal([Constraint::Max(96)])
            .flex(Flex::Center)
            .areas(area);

        let [_, heading, _, welcome, _, link, _, cards] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(7),
        ])
        .areas(content);

        frame.render_widget(
            Paragraph::new(Span::styled(HEADING, theme::heading())).alignment(Alignment::Center),
            heading,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(WELCOME, theme::muted()))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            welcome,
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Browse Books", theme::link()),
                Span::styled("  [Enter]", theme::key_hint()),
            ]))
            .alignment(Alignment::Center),
            link,
        );

        let columns = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .spacing(2)
            .split(cards);
        for ((title, description), cell) in FEATURES.iter().zip(columns.iter()) {
            frame.render_widget(FeatureCard::new(title, description), *cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_enter_routes_to_books() {
        let mut home = HomeView::new();
        let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(
            home.handle_input(&enter),
            Some(Action::Navigate(Route::Books))
        );
        let other = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(home.handle_input(&other), None);
    }

    #[test]
    fn test_renders_heading_link_and_features() {
        let home = HomeView::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| home.render(frame, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
        }
        assert!(out.contains(HEADING));
        assert!(out.contains("Browse Books"));
        assert!(out.contains("Extensive Collection"));
        assert!(out.contains("AI Insights"));
    }

    #[test]
    fn test_landing_copy() {
        assert_eq!(
            WELCOME,
            "Welcome to our digital library. Browse our collection, search for books, \
             and discover AI-powered insights about your favorite titles."
        );
        assert_eq!(
            FEATURES[1],
            (
                "AI Insights",
                "Get unique, AI-generated insights about each book in our library."
            )
        );
    }
}
