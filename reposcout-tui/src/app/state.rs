//! Application state
//!
//! Immutable state structure. All state transitions happen through the
//! reducer (see `reducer.rs`). The `SearchPane` mirrors the search
//! view-model and is only ever updated from its events.

use libreposcout::{Repository, User};

use super::actions::{Focus, Screen};

/// How long a toast stays in the status bar
const TOAST_DURATION_MS: u64 = 3000;

/// Root application state
///
/// This is the single source of truth for the entire application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Current active screen
    pub current_screen: Screen,

    /// Focused widget on the list screen
    pub focus: Focus,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Search results, as published by the view-model
    pub search: SearchPane,

    /// Index of the highlighted repository
    pub selected: usize,

    /// Transient notice shown in the status bar
    pub toast: Option<Toast>,

    /// UI configuration
    pub config: UiConfig,
}

/// List screen content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPane {
    /// Search field content
    pub input: String,

    pub is_loading: bool,
    pub user: Option<User>,
    pub repositories: Vec<Repository>,
    pub show_profile: bool,
    pub show_list: bool,

    /// Key of the current entry animation; `None` before the first search
    pub animation_key: Option<String>,

    /// Ticks since the profile pane became visible
    pub profile_reveal: u16,

    /// Ticks since the repository list became visible
    pub list_reveal: u16,
}

/// Status bar notice with a tick countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub ticks_remaining: u16,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Use unicode symbols (false = ASCII fallback)
    pub unicode_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,

    /// Ticks a toast stays visible
    pub toast_ticks: u16,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            current_screen: Screen::List,
            focus: Focus::Search,
            help_visible: false,
            search: SearchPane::default(),
            selected: 0,
            toast: None,
            config: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("REPOSCOUT_TUI_NO_COLOR").is_err();

        let unicode_enabled = colors_enabled;

        let tick_rate_ms = std::env::var("REPOSCOUT_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(100);

        Self::with_tick_rate(colors_enabled, unicode_enabled, tick_rate_ms)
    }
}

impl UiConfig {
    /// Build a config, deriving the toast lifetime from the tick rate
    pub fn with_tick_rate(colors_enabled: bool, unicode_enabled: bool, tick_rate_ms: u64) -> Self {
        let toast_ticks = (TOAST_DURATION_MS / tick_rate_ms.max(1)).clamp(1, u16::MAX as u64) as u16;
        Self {
            colors_enabled,
            unicode_enabled,
            tick_rate_ms,
            toast_ticks,
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository under the list cursor, if the list is showing
    pub fn selected_repository(&self) -> Option<&Repository> {
        if !self.search.show_list {
            return None;
        }
        self.search.repositories.get(self.selected)
    }

    /// Number of repository rows revealed so far by the entry animation
    pub fn visible_rows(&self) -> usize {
        if !self.search.show_list {
            return 0;
        }
        (self.search.list_reveal as usize + 1).min(self.search.repositories.len())
    }

    /// Is the search field receiving text input?
    pub fn is_editing(&self) -> bool {
        self.current_screen == Screen::List && self.focus == Focus::Search && !self.help_visible
    }
}
