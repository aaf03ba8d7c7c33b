//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! all possible actions that can modify application state.

use crossterm::event::KeyEvent;
use libreposcout::service::events::Event;
use libreposcout::{Repository, User};

/// Actions that trigger state transitions
///
/// Actions are plain data describing what happened. The reducer
/// (see `reducer.rs`) applies them to state; the event loop performs the
/// side effects some of them request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick for the reveal animation and toast expiry
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    /// Move focus between the search field and the repository list
    ToggleFocus,

    /// Select the next repository in the list
    SelectNext,

    /// Select the previous repository in the list
    SelectPrevious,

    /// User asked to open the selected repository
    ///
    /// Resolved by the event loop, which answers with `ShowDetail`.
    OpenDetail,

    /// Show the detail screen for a resolved repository
    ShowDetail(Repository),

    /// Return from the detail screen to the list
    Back,

    // === Search ===
    /// Search field content changed
    SearchInputChanged(String),

    /// User submitted the search field (performed by the event loop)
    SearchSubmitted,

    // === View-model updates ===
    /// Loading flag changed
    LoadingChanged(bool),

    /// Profile and list panes were reset under a new animation key
    AnimationsReset(String),

    /// Profile fetched
    UserLoaded(User),

    /// Repository list fetched
    RepositoriesLoaded(Vec<Repository>),

    // === Notices ===
    /// Show a transient toast in the status bar
    ShowNotice(String),

    /// Dismiss the current toast
    DismissNotice,
}

impl From<Event> for Action {
    fn from(event: Event) -> Self {
        match event {
            Event::LoadingChanged { is_loading } => Action::LoadingChanged(is_loading),
            Event::AnimationsReset { animation_key } => Action::AnimationsReset(animation_key),
            Event::UserLoaded { user } => Action::UserLoaded(user),
            Event::RepositoriesLoaded { repositories } => Action::RepositoriesLoaded(repositories),
            Event::Notice { message } => Action::ShowNotice(message),
        }
    }
}

/// Screen/View identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Search field, profile and repository list
    List,

    /// Details of one repository
    Detail(Repository),
}

/// Which widget on the list screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_events_map_to_actions() {
        assert_eq!(
            Action::from(Event::LoadingChanged { is_loading: true }),
            Action::LoadingChanged(true)
        );
        assert_eq!(
            Action::from(Event::Notice {
                message: "Internet is not available!".to_string()
            }),
            Action::ShowNotice("Internet is not available!".to_string())
        );
        assert_eq!(
            Action::from(Event::AnimationsReset {
                animation_key: "k1".to_string()
            }),
            Action::AnimationsReset("k1".to_string())
        );
    }
}
