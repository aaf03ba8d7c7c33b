//! Pure reducer function for state transitions
//!
//! The reducer is a pure function: `(State, Action) -> State`.
//!
//! It has NO side effects and only computes new state values. Searching and
//! route resolution happen in the event loop, which watches for
//! `SearchSubmitted` and `OpenDetail`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::{Action, Focus, Screen};
use super::state::{AppState, SearchPane, Toast};

/// Reveal counters stop here; enough for any list that fits a screen
const MAX_REVEAL: u16 = 512;

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
///
/// # Purity Guarantees
///
/// - No network requests
/// - No file I/O
/// - No mutations (returns new state)
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => match map_key(&state, key) {
            Some(action) => reduce(state, action),
            None => state,
        },

        Action::Tick => tick(state),

        Action::Resize(_, _) => state,

        // === Navigation ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        Action::ToggleFocus => {
            let focus = match state.focus {
                Focus::Search => Focus::List,
                Focus::List => Focus::Search,
            };
            AppState { focus, ..state }
        }

        Action::SelectNext => {
            let last = state.search.repositories.len().saturating_sub(1);
            AppState {
                selected: (state.selected + 1).min(last),
                ..state
            }
        }

        Action::SelectPrevious => AppState {
            selected: state.selected.saturating_sub(1),
            ..state
        },

        // Resolved by the event loop
        Action::OpenDetail => state,

        Action::ShowDetail(repository) => AppState {
            current_screen: Screen::Detail(repository),
            help_visible: false,
            ..state
        },

        Action::Back => AppState {
            current_screen: Screen::List,
            ..state
        },

        // === Search ===
        Action::SearchInputChanged(input) => AppState {
            search: SearchPane {
                input,
                ..state.search
            },
            ..state
        },

        // Performed by the event loop
        Action::SearchSubmitted => state,

        // === View-model updates ===
        Action::LoadingChanged(is_loading) => AppState {
            search: SearchPane {
                is_loading,
                ..state.search
            },
            ..state
        },

        Action::AnimationsReset(animation_key) => AppState {
            search: SearchPane {
                show_profile: false,
                show_list: false,
                animation_key: Some(animation_key),
                profile_reveal: 0,
                list_reveal: 0,
                ..state.search
            },
            selected: 0,
            ..state
        },

        Action::UserLoaded(user) => AppState {
            search: SearchPane {
                user: Some(user),
                show_profile: true,
                profile_reveal: 0,
                ..state.search
            },
            ..state
        },

        Action::RepositoriesLoaded(repositories) => AppState {
            search: SearchPane {
                repositories,
                show_list: true,
                list_reveal: 0,
                ..state.search
            },
            selected: 0,
            ..state
        },

        // === Notices ===
        Action::ShowNotice(message) => {
            let ticks_remaining = state.config.toast_ticks;
            AppState {
                toast: Some(Toast {
                    message,
                    ticks_remaining,
                }),
                ..state
            }
        }

        Action::DismissNotice => AppState {
            toast: None,
            ..state
        },
    }
}

/// Advance the reveal animation and count down the toast
fn tick(state: AppState) -> AppState {
    let toast = state.toast.and_then(|toast| {
        let ticks_remaining = toast.ticks_remaining.saturating_sub(1);
        (ticks_remaining > 0).then_some(Toast {
            ticks_remaining,
            ..toast
        })
    });

    let profile_reveal = if state.search.show_profile {
        (state.search.profile_reveal + 1).min(MAX_REVEAL)
    } else {
        state.search.profile_reveal
    };
    let list_reveal = if state.search.show_list {
        (state.search.list_reveal + 1).min(MAX_REVEAL)
    } else {
        state.search.list_reveal
    };

    AppState {
        toast,
        search: SearchPane {
            profile_reveal,
            list_reveal,
            ..state.search
        },
        ..state
    }
}

/// Map a key press to an action
///
/// This is where keybindings are defined. `None` means the key is not bound
/// here; while the search field is focused the event loop hands such keys to
/// the text editor.
pub fn map_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Action::Quit),
        (KeyCode::F(1), _) => {
            return Some(if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            });
        }
        _ => {}
    }

    if state.help_visible {
        return match key.code {
            KeyCode::Esc => Some(Action::HideHelp),
            _ => None,
        };
    }

    match state.current_screen {
        Screen::Detail(_) => map_detail_key(key),
        Screen::List => match state.focus {
            Focus::Search => map_search_key(state, key),
            Focus::List => map_list_key(state, key),
        },
    }
}

fn map_search_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::SearchSubmitted),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),
        KeyCode::Esc if state.toast.is_some() => Some(Action::DismissNotice),
        _ => None,
    }
}

fn map_list_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Enter if state.selected_repository().is_some() => Some(Action::OpenDetail),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => Some(Action::ToggleFocus),
        KeyCode::Esc if state.toast.is_some() => Some(Action::DismissNotice),
        _ => None,
    }
}

fn map_detail_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => Some(Action::Back),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
