/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick: applies finished fetches, advances the spinner.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
}

/// High-level actions dispatched by the input mapper or by views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Route),
    TabNext,
    TabPrev,
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Routable pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page with the link to the catalog.
    Home,
    /// Catalog listing.
    Books,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Home, Route::Books];

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Books => "Books",
        }
    }

    /// URL-style path, shown in the status bar.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Books => "/books",
        }
    }

    pub fn next(self) -> Route {
        let idx = Route::ALL.iter().position(|&r| r == self).unwrap_or(0);
        Route::ALL[(idx + 1) % Route::ALL.len()]
    }

    pub fn prev(self) -> Route {
        let idx = Route::ALL.iter().position(|&r| r == self).unwrap_or(0);
        Route::ALL[(idx + Route::ALL.len() - 1) % Route::ALL.len()]
    }
}
