use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Route};
use super::layout::{centered_rect, AppLayout};
use super::services::Services;
use super::theme;
use super::views::books::BooksPage;
use super::views::home::HomeView;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently shown page.
    pub route: Route,
    pub home: HomeView,
    pub books: BooksPage,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for events pushed from outside the input stream.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        Self {
            running: true,
            route: Route::Home,
            home: HomeView::new(),
            books: BooksPage::new(),
            show_help: false,
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        self.books.unmount();
        log::info!("Event loop finished");
        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Ctrl+C quits even while a text field has focus
                if is_force_quit(&crossterm_event) {
                    self.handle_action(Action::Quit);
                    return;
                }

                // Priority 2: Current page
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = map_input_to_action(&crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
        }
    }

    /// Dispatch input to the current page. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.route {
            Route::Home => match self.home.handle_input(event) {
                Some(action) => {
                    self.handle_action(action);
                    true
                }
                None => false,
            },
            Route::Books => self.books.handle_input(event, &self.services),
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(route) => self.navigate(route),
            Action::TabNext => self.navigate(self.route.next()),
            Action::TabPrev => self.navigate(self.route.prev()),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    /// Switch pages. Leaving the catalog tears its list down; entering it
    /// mounts a fresh one.
    fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        log::debug!("Navigating {} -> {}", self.route.path(), route.path());

        if self.route == Route::Books {
            self.books.unmount();
        }
        self.route = route;
        if route == Route::Books {
            self.books.mount(&self.services);
        }
    }

    /// Tick: apply finished fetches.
    fn on_tick(&mut self) {
        if self.route == Route::Books {
            self.books.poll();
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        match self.route {
            Route::Home => self.home.render(frame, layout.main),
            Route::Books => self.books.render(frame, layout.main),
        }

        self.render_status_bar(frame, layout.status);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" LIBRARY ", theme::brand_badge()),
            Span::raw(" "),
        ];
        for (i, route) in Route::ALL.iter().enumerate() {
            let style = if *route == self.route {
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim()
            };
            spans.push(Span::styled(format!("{}:{} ", i + 1, route.label()), style));
        }
        spans.push(Span::styled(self.route.path(), theme::muted()));
        spans.push(Span::raw(" │ "));
        // Global keys go to the search field or modal while either has focus.
        if self.route == Route::Books && self.books.is_capturing_input() {
            spans.extend([
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":back "),
                Span::styled("Ctrl+C", theme::key_hint()),
                Span::raw(":quit"),
            ]);
        } else {
            spans.extend([
                Span::styled("Tab", theme::key_hint()),
                Span::raw(":nav "),
                Span::styled("?", theme::key_hint()),
                Span::raw(":help "),
                Span::styled("q", theme::key_hint()),
                Span::raw(":quit"),
            ]);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit application"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous page"),
            ("1 / 2", "Home / Books"),
            ("", ""),
            ("Home:", ""),
            ("Enter", "Browse Books"),
            ("", ""),
            ("Books:", ""),
            ("/", "Search by title or author"),
            ("Esc", "Clear search"),
            ("h/j/k/l", "Move through the grid"),
            ("Enter", "View details"),
            ("i", "Show / hide AI insights"),
            ("", ""),
            ("Details:", ""),
            ("j/k", "Scroll"),
            ("Esc / Enter", "Close"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::heading())),
            Line::raw(""),
        ];

        for (key, desc) in keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::heading())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{key:<18}"), theme::key_hint()),
                    Span::raw(desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::key_hint()),
            Span::raw(" or "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(" to close"),
        ]));

        let block = theme::panel_block("Help", true).title_alignment(Alignment::Center);

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

// ── Input mapping ───────────────────────────────────────────────────────

fn is_force_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}

/// Map help modal input to action.
fn map_help_input(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    match code {
        KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
        _ => None,
    }
}

fn map_input_to_action(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    match (*modifiers, *code) {
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ShowHelp),
            KeyCode::Tab => Some(Action::TabNext),
            KeyCode::BackTab => Some(Action::TabPrev),
            KeyCode::Char('1') => Some(Action::Navigate(Route::Home)),
            KeyCode::Char('2') => Some(Action::Navigate(Route::Books)),
            _ => None,
        },
        _ => None,
    }
}
