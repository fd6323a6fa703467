//! Catalog grid with a client-side search filter.
//!
//! The catalog is fetched once per mount. Filtering runs over the fetched
//! entries only and never goes back to the network. `/` focuses the search
//! bar, `h/j/k/l` or arrows move through the grid, Enter opens the detail
//! modal and `i` toggles the selected card's insight panel.

use std::cell::Cell;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::book_card::BookCard;
use crate::core::error::CatalogError;
use crate::core::fetch::FetchSlot;
use crate::core::filter;
use crate::core::models::Book;
use crate::tui::layout::{grid_cells, grid_columns};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::search_input::SearchInput;
use crate::tui::widgets::spinner::LoadingSpinner;

pub const EMPTY_CATALOG_MESSAGE: &str = "No books available. Add some books to get started.";
pub const NO_MATCHES_MESSAGE: &str = "No books match your search. Try different keywords.";
const SEARCH_PLACEHOLDER: &str = "Search in displayed books... (optional)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    /// Not mounted.
    Idle,
    Loading,
    Loaded,
    /// Fetch failed; holds the message shown in place of the grid.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusZone {
    Search,
    List,
}

pub struct BookListState {
    status: ListStatus,
    mounted: bool,
    /// One card per fetched entry, in catalog order.
    cards: Vec<BookCard>,
    /// Indices into `cards` passing the current filter.
    displayed: Vec<usize>,
    /// Position within `displayed`.
    selected: usize,
    search: SearchInput,
    focus: FocusZone,
    /// Grid columns at the last render; drives up/down movement.
    columns: Cell<usize>,
    slot: FetchSlot<Result<Vec<Book>, CatalogError>>,
}

impl BookListState {
    pub fn new() -> Self {
        Self {
            status: ListStatus::Idle,
            mounted: false,
            cards: Vec::new(),
            displayed: Vec::new(),
            selected: 0,
            search: SearchInput::new(),
            focus: FocusZone::List,
            columns: Cell::new(1),
            slot: FetchSlot::new(),
        }
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of fetched entries, before filtering.
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// Entries passing the filter, in catalog order.
    pub fn displayed_books(&self) -> Vec<&Book> {
        self.displayed.iter().map(|&i| self.cards[i].book()).collect()
    }

    pub fn query(&self) -> String {
        self.search.text()
    }

    /// Whether keystrokes should bypass global shortcuts.
    pub fn is_capturing_input(&self) -> bool {
        self.focus == FocusZone::Search || self.open_modal().is_some()
    }

    pub fn count_line(&self) -> String {
        filter::count_line(
            self.displayed.len(),
            self.total(),
            filter::is_active(&self.search.text()),
        )
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Start the one catalog fetch for this mount. No-op when already mounted.
    pub fn mount(&mut self, services: &Services) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.status = ListStatus::Loading;
        log::debug!("Book list mounted, fetching catalog");

        let api = services.api.clone();
        self.slot.start(async move { api.list().await });
    }

    /// Discard everything, including a fetch still in flight.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.slot.cancel();
        for card in &mut self.cards {
            card.reset();
        }
        self.cards.clear();
        self.displayed.clear();
        self.selected = 0;
        self.search.clear();
        self.focus = FocusZone::List;
        self.status = ListStatus::Idle;
        self.mounted = false;
    }

    /// Apply finished fetches. Call from on_tick.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        if let Some(result) = self.slot.try_take() {
            self.apply(result);
            changed = true;
        }
        for card in &mut self.cards {
            changed |= card.poll();
        }
        changed
    }

    fn apply(&mut self, result: Result<Vec<Book>, CatalogError>) {
        match result {
            Ok(books) => {
                log::info!("Loaded {} catalog entries", books.len());
                self.cards = books.into_iter().map(BookCard::new).collect();
                self.status = ListStatus::Loaded;
            }
            Err(e) => {
                log::warn!("Failed to load catalog: {e}");
                self.cards.clear();
                self.status = ListStatus::Failed(e.to_string());
            }
        }
        self.refilter();
    }

    /// Recompute the visible set. Cards leaving it are reset.
    /// Recompute the visible cards. The selection follows its entry while it
    /// stays visible.
    fn refilter(&mut self) {
        let selected_key = self
            .displayed
            .get(self.selected)
            .map(|&i| self.cards[i].book().key().to_string());

        let query = self.search.text();
        self.displayed.clear();
        for (i, card) in self.cards.iter_mut().enumerate() {
            if filter::matches(card.book(), &query) {
                self.displayed.push(i);
            } else {
                card.reset();
            }
        }

        let kept = selected_key.and_then(|key| {
            self.displayed
                .iter()
                .position(|&i| self.cards[i].book().key() == key)
        });
        self.selected = kept.unwrap_or(0);
    }

    fn selected_card_mut(&mut self) -> Option<&mut BookCard> {
        let idx = *self.displayed.get(self.selected)?;
        self.cards.get_mut(idx)
    }

    fn open_modal(&self) -> Option<usize> {
        self.cards.iter().position(BookCard::is_modal_open)
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        // Modal consumes all input when open
        if let Some(idx) = self.open_modal() {
            return self.cards[idx].handle_modal_key(*code);
        }

        match self.focus {
            FocusZone::Search => self.handle_search_input(*code),
            FocusZone::List => self.handle_list_input(*code, services),
        }
    }

    fn handle_search_input(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => {
                self.search.clear();
                self.focus = FocusZone::List;
                self.refilter();
            }
            KeyCode::Enter | KeyCode::Down => {
                self.focus = FocusZone::List;
            }
            other => {
                if self.search.handle_key(other) {
                    self.refilter();
                }
            }
        }
        true
    }

    fn handle_list_input(&mut self, code: KeyCode, services: &Services) -> bool {
        let columns = self.columns.get().max(1);
        match code {
            KeyCode::Char('/') => {
                self.focus = FocusZone::Search;
                true
            }
            KeyCode::Esc if !self.search.is_blank() => {
                self.search.clear();
                self.refilter();
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(columns as isize);
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected < columns {
                    self.focus = FocusZone::Search;
                } else {
                    self.move_selection(-(columns as isize));
                }
                true
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.move_selection(1);
                true
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.move_selection(-1);
                true
            }
            KeyCode::Enter => {
                let api = services.api.clone();
                if let Some(card) = self.selected_card_mut() {
                    card.open_modal(&api);
                }
                true
            }
            KeyCode::Char('i') => {
                let api = services.api.clone();
                if let Some(card) = self.selected_card_mut() {
                    card.toggle_insights(&api);
                }
                true
            }
            _ => false,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.displayed.is_empty() {
            return;
        }
        let last = self.displayed.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [search_area, _, count_area, grid_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        self.render_search_bar(frame, search_area);

        match &self.status {
            ListStatus::Idle | ListStatus::Loading => {
                frame.render_widget(LoadingSpinner::default().centered(), grid_area);
            }
            ListStatus::Failed(message) => {
                let error = Paragraph::new(Span::styled(message.as_str(), theme::error()))
                    .block(theme::panel_block("Error", false).border_style(theme::error()))
                    .wrap(Wrap { trim: true });
                let height = grid_area.height.min(3);
                frame.render_widget(error, Rect { height, ..grid_area });
            }
            ListStatus::Loaded => {
                frame.render_widget(
                    Paragraph::new(Span::styled(self.count_line(), theme::muted())),
                    count_area,
                );
                if self.displayed.is_empty() {
                    let message = if filter::is_active(&self.search.text()) {
                        NO_MATCHES_MESSAGE
                    } else {
                        EMPTY_CATALOG_MESSAGE
                    };
                    let empty = Paragraph::new(vec![
                        Line::raw(""),
                        Line::from(Span::styled(message, theme::muted())),
                    ])
                    .alignment(Alignment::Center);
                    frame.render_widget(empty, grid_area);
                } else {
                    self.render_grid(frame, grid_area);
                }
            }
        }

        if let Some(idx) = self.open_modal() {
            self.cards[idx].render_modal(frame, frame.area());
        }
    }

    fn render_search_bar(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusZone::Search;
        let text = self.search.text();

        let prefix = " [/] Search: ";
        let prefix_style = if focused {
            Style::default()
                .fg(theme::PRIMARY_LIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };
        let body = if text.is_empty() {
            Span::styled(SEARCH_PLACEHOLDER, theme::dim())
        } else {
            Span::styled(text, Style::default().fg(theme::TEXT))
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::styled(prefix, prefix_style), body])),
            area,
        );

        if focused {
            let x = area.x + prefix.chars().count() as u16 + self.search.cursor() as u16;
            if x < area.right() {
                frame.set_cursor_position(Position::new(x, area.y));
            }
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let columns = grid_columns(area.width);
        self.columns.set(columns);

        let rows: Vec<&[usize]> = self.displayed.chunks(columns).collect();
        let widths: Vec<u16> = grid_cells(area, columns).iter().map(|c| c.width).collect();
        let row_height = |row: &[usize]| -> u16 {
            row.iter()
                .zip(&widths)
                .map(|(&i, &width)| self.cards[i].height(width))
                .max()
                .unwrap_or(0)
        };

        // Scroll so the selected row is fully on screen.
        let selected_row = self.selected / columns;
        let mut first = selected_row;
        let mut used = row_height(rows[selected_row]);
        while first > 0 {
            let h = row_height(rows[first - 1]);
            if used + h > area.height {
                break;
            }
            used += h;
            first -= 1;
        }

        let mut y = area.y;
        for (r, &row) in rows.iter().enumerate().skip(first) {
            let h = row_height(row);
            if y >= area.bottom() {
                break;
            }
            let height = h.min(area.bottom() - y);
            let row_area = Rect::new(area.x, y, area.width, height);
            for (c, (cell, &card_idx)) in grid_cells(row_area, columns)
                .into_iter()
                .zip(row.iter())
                .enumerate()
            {
                let card = &self.cards[card_idx];
                let cell = Rect {
                    height: card.height(cell.width).min(cell.height),
                    ..cell
                };
                let selected = self.focus == FocusZone::List && r * columns + c == self.selected;
                card.render_card(frame, cell, selected);
            }
            y += height;
        }
    }

    /// Wait for the catalog fetch and apply it.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        if let Some(result) = self.slot.next().await {
            self.apply(result);
        }
    }
}

impl Default for BookListState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::core::api::MockCatalogApi;
    use crate::tests::common::{book, dune, foundation};
    use crate::tests::mocks::{GatedApi, StubApi};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut BookListState, services: &Services, text: &str) {
        state.handle_input(&key(KeyCode::Char('/')), services);
        for c in text.chars() {
            state.handle_input(&key(KeyCode::Char(c)), services);
        }
    }

    fn rendered(state: &BookListState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| state.render(frame, frame.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    async fn loaded(books: Vec<Book>) -> (BookListState, Services, StubApi) {
        let stub = StubApi::new(books);
        let services = Services::with_api(Arc::new(stub.clone()));
        let mut state = BookListState::new();
        state.mount(&services);
        state.settle().await;
        (state, services, stub)
    }

    #[tokio::test]
    async fn test_mount_fetches_exactly_once() {
        let mut mock = MockCatalogApi::new();
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![dune(), foundation()]));
        let services = Services::with_api(Arc::new(mock));

        let mut state = BookListState::new();
        state.mount(&services);
        state.mount(&services);
        state.settle().await;
        state.poll();
        let _ = rendered(&state, 100, 30);

        assert_eq!(state.status(), &ListStatus::Loaded);
        assert_eq!(state.total(), 2);
    }

    #[tokio::test]
    async fn test_loading_until_fetch_lands() {
        let api = GatedApi::with_books(vec![dune()]);
        let services = Services::with_api(Arc::new(api.clone()));
        let mut state = BookListState::new();
        state.mount(&services);

        assert_eq!(state.status(), &ListStatus::Loading);
        assert!(rendered(&state, 60, 10).contains("Loading..."));

        api.release();
        state.settle().await;
        assert_eq!(state.status(), &ListStatus::Loaded);
    }

    #[tokio::test]
    async fn test_failed_fetch_shows_error_and_no_cards() {
        let stub = StubApi::new(vec![dune()]).failing_list("Database unavailable");
        let services = Services::with_api(Arc::new(stub));
        let mut state = BookListState::new();
        state.mount(&services);
        state.settle().await;

        assert_eq!(
            state.status(),
            &ListStatus::Failed("Database unavailable".to_string())
        );
        assert_eq!(state.total(), 0);
        assert!(state.displayed_books().is_empty());
        let out = rendered(&state, 80, 10);
        assert!(out.contains("Database unavailable"));
        assert!(!out.contains("Showing"));
    }

    #[tokio::test]
    async fn test_empty_catalog_message() {
        let (state, _, _) = loaded(Vec::new()).await;
        assert_eq!(state.total(), 0);
        assert_eq!(state.count_line(), "Showing 0 books");
        assert!(rendered(&state, 80, 10).contains(EMPTY_CATALOG_MESSAGE));
    }

    #[tokio::test]
    async fn test_filter_narrows_without_refetch() {
        let (mut state, services, stub) = loaded(vec![dune(), foundation()]).await;
        assert_eq!(state.count_line(), "Showing 2 books");

        type_text(&mut state, &services, "asi");
        let titles: Vec<_> = state
            .displayed_books()
            .iter()
            .map(|b| b.title.clone())
            .collect();
        assert_eq!(titles, vec!["Foundation"]);
        assert_eq!(state.count_line(), "Showing 1 book (filtered from 2 total)");
        assert_eq!(stub.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_no_match_message_and_escape_clears() {
        let (mut state, services, _) = loaded(vec![dune(), foundation()]).await;
        type_text(&mut state, &services, "tolkien");
        assert!(state.displayed_books().is_empty());
        assert!(rendered(&state, 80, 12).contains(NO_MATCHES_MESSAGE));

        state.handle_input(&key(KeyCode::Esc), &services);
        assert!(state.query().is_empty());
        assert_eq!(state.displayed_books().len(), 2);
        assert!(!state.is_capturing_input());
    }

    #[tokio::test]
    async fn test_whitespace_query_shows_everything() {
        let (mut state, services, _) = loaded(vec![dune(), foundation()]).await;
        type_text(&mut state, &services, "   ");
        assert_eq!(state.displayed_books().len(), 2);
        assert_eq!(state.count_line(), "Showing 2 books");
    }

    #[tokio::test]
    async fn test_filtered_out_card_is_reset() {
        let (mut state, services, _) = loaded(vec![dune(), foundation()]).await;
        state.handle_input(&key(KeyCode::Char('i')), &services);
        assert!(state.cards[0].insights_shown());

        type_text(&mut state, &services, "asi");
        assert!(!state.cards[0].insights_shown());
        assert!(state.cards[0].inline_panel().is_none());

        state.handle_input(&key(KeyCode::Esc), &services);
        assert!(!state.cards[0].insights_shown());
    }

    #[tokio::test]
    async fn test_modal_captures_input() {
        let (mut state, services, _) = loaded(vec![dune(), foundation()]).await;
        state.handle_input(&key(KeyCode::Char('l')), &services);
        state.handle_input(&key(KeyCode::Enter), &services);
        assert!(state.cards[1].is_modal_open());
        assert!(state.is_capturing_input());

        // 'i' goes to the modal, not the card toggle.
        state.handle_input(&key(KeyCode::Char('i')), &services);
        assert!(!state.cards[1].insights_shown());

        state.handle_input(&key(KeyCode::Esc), &services);
        assert!(!state.cards[1].is_modal_open());
    }

    #[tokio::test]
    async fn test_selection_is_clamped() {
        let (mut state, services, _) = loaded(vec![dune(), foundation()]).await;
        for _ in 0..5 {
            state.handle_input(&key(KeyCode::Right), &services);
        }
        assert_eq!(state.selected, 1);
        state.handle_input(&key(KeyCode::Left), &services);
        state.handle_input(&key(KeyCode::Left), &services);
        assert_eq!(state.selected, 0);
    }

    #[tokio::test]
    async fn test_selection_follows_entry_across_filter() {
        let hyperion = book("3", "Hyperion", "Dan Simmons");
        let (mut state, services, _) = loaded(vec![dune(), foundation(), hyperion]).await;
        state.handle_input(&key(KeyCode::Right), &services);
        assert_eq!(state.displayed_books()[state.selected].title, "Foundation");

        type_text(&mut state, &services, "o");
        assert_eq!(state.displayed_books().len(), 2);
        assert_eq!(state.selected, 0);
        assert_eq!(state.displayed_books()[state.selected].title, "Foundation");

        state.handle_input(&key(KeyCode::Esc), &services);
        assert_eq!(state.displayed_books().len(), 3);
        assert_eq!(state.displayed_books()[state.selected].title, "Foundation");
    }

    #[tokio::test]
    async fn test_selection_resets_when_entry_filtered_out() {
        let (mut state, services, _) = loaded(vec![dune(), foundation()]).await;
        state.handle_input(&key(KeyCode::Right), &services);
        type_text(&mut state, &services, "herbert");
        assert_eq!(state.selected, 0);
        assert_eq!(state.displayed_books()[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_unmount_discards_late_result() {
        let api = GatedApi::with_books(vec![dune()]);
        let services = Services::with_api(Arc::new(api.clone()));
        let mut state = BookListState::new();
        state.mount(&services);
        state.unmount();

        api.release();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!state.poll());
        assert_eq!(state.status(), &ListStatus::Idle);
        assert_eq!(state.total(), 0);
    }

    #[tokio::test]
    async fn test_remount_fetches_again() {
        let (mut state, services, stub) = loaded(vec![dune()]).await;
        state.unmount();
        state.mount(&services);
        state.settle().await;
        assert_eq!(stub.list_calls(), 2);
        assert_eq!(state.total(), 1);
    }

    #[tokio::test]
    async fn test_grid_renders_cards() {
        let (state, _, _) = loaded(vec![dune(), foundation()]).await;
        let out = rendered(&state, 100, 20);
        assert!(out.contains("Showing 2 books"));
        assert!(out.contains("Dune"));
        assert!(out.contains("Foundation"));
        assert_eq!(state.columns.get(), 2);
    }
}
