//! AI insight panel: fetches and shows the commentary for one entry.
//!
//! Every mount or subject change starts from `Loading` and issues one request.
//! Results are routed through a [`FetchSlot`], so a response that lands after
//! the panel was unmounted or pointed at another entry is dropped without
//! touching the panel.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::api::CatalogApi;
use crate::core::error::CatalogError;
use crate::core::fetch::FetchSlot;
use crate::core::models::Insight;
use crate::tui::theme;
use crate::tui::widgets::spinner::LoadingSpinner;

/// Shown in place of any fetch failure. The underlying error is only logged.
pub const INSIGHT_ERROR_MESSAGE: &str = "Failed to load AI insights. Please try again later.";

type InsightFetch = Result<Option<Insight>, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightStatus {
    Loading,
    Ready(Insight),
    Error(String),
    /// Fetched fine but nothing to show. Renders nothing.
    Empty,
}

pub struct InsightPanel {
    book_id: String,
    status: InsightStatus,
    mounted: bool,
    api: Arc<dyn CatalogApi>,
    slot: FetchSlot<InsightFetch>,
}

impl InsightPanel {
    /// Create a panel for `book_id` and start its fetch.
    pub fn mount(book_id: impl Into<String>, api: Arc<dyn CatalogApi>) -> Self {
        let mut panel = Self {
            book_id: book_id.into(),
            status: InsightStatus::Loading,
            mounted: true,
            api,
            slot: FetchSlot::new(),
        };
        panel.start_fetch();
        panel
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn status(&self) -> &InsightStatus {
        &self.status
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Point the panel at another entry. Anything in flight for the previous
    /// entry is discarded and the panel goes back to `Loading`.
    pub fn set_book(&mut self, book_id: &str) {
        if self.mounted && self.book_id == book_id {
            return;
        }
        self.book_id = book_id.to_string();
        self.mounted = true;
        self.start_fetch();
    }

    /// Tear down. The panel state is frozen from here on.
    pub fn unmount(&mut self) {
        if self.mounted {
            log::debug!("Unmounting insight panel for {}", self.book_id);
        }
        self.mounted = false;
        self.slot.cancel();
    }

    /// Apply a finished fetch, if any. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        match self.slot.try_take() {
            Some(result) => {
                self.apply(result);
                true
            }
            None => false,
        }
    }

    fn start_fetch(&mut self) {
        self.status = InsightStatus::Loading;
        let api = Arc::clone(&self.api);
        let id = self.book_id.clone();
        self.slot
            .start(async move { api.fetch_insight(&id).await });
    }

    fn apply(&mut self, result: InsightFetch) {
        self.status = match result {
            Ok(Some(insight)) if insight.is_usable() => InsightStatus::Ready(insight),
            Ok(_) => InsightStatus::Empty,
            Err(e) => {
                log::warn!("Failed to load insights for {}: {e}", self.book_id);
                InsightStatus::Error(INSIGHT_ERROR_MESSAGE.to_string())
            }
        };
    }

    /// Body text for the current state, without the heading. Line breaks in
    /// the insight are kept.
    pub fn body(&self) -> Text<'_> {
        match &self.status {
            InsightStatus::Loading => Text::from(LoadingSpinner::default().line()),
            InsightStatus::Error(message) => styled_lines(message, theme::error()),
            InsightStatus::Empty => Text::default(),
            InsightStatus::Ready(insight) => styled_lines(
                &insight.content,
                Style::default().fg(theme::INSIGHT_TEXT),
            ),
        }
    }

    fn paragraph(&self) -> Paragraph<'_> {
        let mut text = self.body();
        if matches!(self.status, InsightStatus::Ready(_)) {
            text.lines.insert(
                0,
                Line::from(Span::styled(
                    "AI Insights",
                    Style::default()
                        .fg(theme::INSIGHT)
                        .add_modifier(Modifier::BOLD),
                )),
            );
        }
        Paragraph::new(text).wrap(Wrap { trim: true })
    }

    /// Rows needed to render the current state at `width`, after wrapping.
    pub fn height(&self, width: u16) -> u16 {
        match self.status {
            InsightStatus::Empty => 0,
            InsightStatus::Loading => 1,
            _ => u16::try_from(self.paragraph().line_count(width)).unwrap_or(u16::MAX),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        match self.status {
            InsightStatus::Loading => frame.render_widget(LoadingSpinner::default(), area),
            InsightStatus::Empty => {}
            _ => frame.render_widget(self.paragraph(), area),
        }
    }

    /// Wait for the in-flight fetch and apply it.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        if let Some(result) = self.slot.next().await {
            self.apply(result);
        }
    }
}

/// One styled line per source line, so the style survives when the lines
/// are spliced into another text.
fn styled_lines(content: &str, style: Style) -> Text<'_> {
    content.lines().map(|line| Line::styled(line, style)).collect()
}
