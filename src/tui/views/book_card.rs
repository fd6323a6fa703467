//! One catalog entry in the grid, plus its detail modal.
//!
//! The card owns two independent toggles: the detail modal and the inline
//! insight panel. Each open panel is its own [`InsightPanel`] with its own
//! fetch, so opening both fetches the insight twice.

use std::cell::Cell;
use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::insights::InsightPanel;
use crate::core::api::CatalogApi;
use crate::core::models::Book;
use crate::tui::layout::centered_rect;
use crate::tui::theme;

/// Card height with the insight panel hidden.
pub const CARD_HEIGHT: u16 = 9;
/// Description preview is clamped to this many rows.
const DESCRIPTION_ROWS: u16 = 3;

pub struct BookCard {
    book: Book,
    modal_open: bool,
    insights_open: bool,
    inline_panel: Option<InsightPanel>,
    modal_panel: Option<InsightPanel>,
    modal_scroll: u16,
    /// Furthest the modal can scroll, as of the last render.
    modal_max_scroll: Cell<u16>,
}

impl BookCard {
    pub fn new(book: Book) -> Self {
        Self {
            book,
            modal_open: false,
            insights_open: false,
            inline_panel: None,
            modal_panel: None,
            modal_scroll: 0,
            modal_max_scroll: Cell::new(0),
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn insights_shown(&self) -> bool {
        self.insights_open
    }

    pub fn inline_panel(&self) -> Option<&InsightPanel> {
        self.inline_panel.as_ref()
    }

    pub fn modal_panel(&self) -> Option<&InsightPanel> {
        self.modal_panel.as_ref()
    }

    /// Rows this card occupies in the grid at `width`. The card grows to fit
    /// the whole inline insight.
    pub fn height(&self, width: u16) -> u16 {
        match &self.inline_panel {
            Some(panel) => {
                // Borders take two columns, the gap above the panel one row.
                let rows = panel.height(width.saturating_sub(2));
                if rows == 0 {
                    CARD_HEIGHT
                } else {
                    CARD_HEIGHT.saturating_add(rows + 1)
                }
            }
            None => CARD_HEIGHT,
        }
    }

    /// Show or hide the inline insight panel. Showing mounts a fresh panel;
    /// entries without an id get the toggle but no panel.
    pub fn toggle_insights(&mut self, api: &Arc<dyn CatalogApi>) {
        self.insights_open = !self.insights_open;
        if self.insights_open {
            self.inline_panel = self.mount_panel(api);
        } else {
            drop_panel(&mut self.inline_panel);
        }
    }

    pub fn open_modal(&mut self, api: &Arc<dyn CatalogApi>) {
        if self.modal_open {
            return;
        }
        self.modal_open = true;
        self.modal_scroll = 0;
        self.modal_panel = self.mount_panel(api);
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
        drop_panel(&mut self.modal_panel);
    }

    /// Back to the initial closed state, unmounting any panels.
    pub fn reset(&mut self) {
        self.close_modal();
        self.insights_open = false;
        drop_panel(&mut self.inline_panel);
    }

    /// Apply finished insight fetches. Returns true when anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        if let Some(panel) = self.inline_panel.as_mut() {
            changed |= panel.poll();
        }
        if let Some(panel) = self.modal_panel.as_mut() {
            changed |= panel.poll();
        }
        changed
    }

    /// Keys while the detail modal is open. Returns true when consumed.
    pub fn handle_modal_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.close_modal();
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.modal_scroll = self.modal_scroll.saturating_add(1).min(self.modal_max_scroll.get());
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.modal_scroll = self.modal_scroll.saturating_sub(1);
                true
            }
            _ => true,
        }
    }

    /// Wait for both panels' fetches and apply them.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        if let Some(panel) = self.inline_panel.as_mut() {
            panel.settle().await;
        }
        if let Some(panel) = self.modal_panel.as_mut() {
            panel.settle().await;
        }
    }

    fn mount_panel(&self, api: &Arc<dyn CatalogApi>) -> Option<InsightPanel> {
        self.book
            .id
            .as_deref()
            .map(|id| InsightPanel::mount(id, Arc::clone(api)))
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render_card(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let block = theme::card_block(selected);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),                // Title
            Constraint::Length(1),                // Author
            Constraint::Length(1),                // Year
            Constraint::Length(DESCRIPTION_ROWS), // Description preview
            Constraint::Length(1),                // Actions
            Constraint::Min(0),                   // Inline insights
        ])
        .split(inner);

        let title_style = if selected {
            theme::title().fg(theme::PRIMARY)
        } else {
            theme::title()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(self.book.title.as_str(), title_style)),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(format!("By {}", self.book.author), theme::muted())),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Published in {}", self.book.publication_year),
                theme::dim(),
            )),
            rows[2],
        );
        frame.render_widget(
            Paragraph::new(self.book.description.as_str())
                .style(Style::default().fg(theme::TEXT))
                .wrap(Wrap { trim: true }),
            rows[3],
        );
        frame.render_widget(Paragraph::new(self.actions_line()), rows[4]);

        if let Some(panel) = &self.inline_panel {
            let mut panel_area = rows[5];
            // One row of breathing space above the panel.
            if panel_area.height > 1 {
                panel_area.y += 1;
                panel_area.height -= 1;
            }
            panel.render(frame, panel_area);
        }
    }

    fn actions_line(&self) -> Line<'static> {
        let toggle = if self.insights_open {
            "Hide AI Insights"
        } else {
            "Show AI Insights"
        };
        Line::from(vec![
            Span::styled("[Enter] ", theme::key_hint()),
            Span::styled("View Details", theme::link()),
            Span::raw("  "),
            Span::styled("[i] ", theme::key_hint()),
            Span::styled(toggle, Style::default().fg(theme::INSIGHT)),
        ])
    }

    /// Render the detail modal over `area` (usually the whole screen).
    pub fn render_modal(&self, frame: &mut Frame, area: Rect) {
        let modal_area = centered_rect(70, 80, area);
        frame.render_widget(Clear, modal_area);

        let block = theme::panel_block(&self.book.title, true);
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let [body, footer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(inner);

        let details = Paragraph::new(self.detail_text()).wrap(Wrap { trim: true });
        let max_scroll = details
            .line_count(body.width)
            .saturating_sub(usize::from(body.height));
        let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
        self.modal_max_scroll.set(max_scroll);
        let scroll = self.modal_scroll.min(max_scroll);
        frame.render_widget(details.scroll((scroll, 0)), body);

        let footer = Line::from(vec![
            Span::styled("[Esc] ", theme::key_hint()),
            Span::styled("Close", theme::muted()),
            Span::raw("  "),
            Span::styled("[j/k] ", theme::key_hint()),
            Span::styled("Scroll", theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(footer), footer_area);
    }

    /// Everything below the modal title, insight included, as one scrollable
    /// text.
    fn detail_text(&self) -> Text<'_> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("By {}", self.book.author),
                theme::muted().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Published in {}", self.book.publication_year),
                theme::dim(),
            )),
        ];
        if !self.book.isbn.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("ISBN: {}", self.book.isbn),
                theme::dim(),
            )));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Description", section_style())));
        lines.extend(Text::raw(self.book.description.as_str()).lines);

        if let Some(panel) = &self.modal_panel {
            let body = panel.body();
            if !body.lines.is_empty() {
                lines.push(Line::raw(""));
                lines.push(Line::from(Span::styled("AI Insights", section_style())));
                lines.extend(body.lines);
            }
        }
        Text::from(lines)
    }
}

fn section_style() -> Style {
    Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)
}

fn drop_panel(slot: &mut Option<InsightPanel>) {
    if let Some(mut panel) = slot.take() {
        panel.unmount();
    }
}
