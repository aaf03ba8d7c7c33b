//! Application driver
//!
//! Owns the state, the search field and the service handle, and performs the
//! side effects the reducer leaves out: forwarding the query, starting
//! searches and resolving detail routes.

use crossterm::event::KeyEvent;
use libreposcout::Route;
use ratatui::Frame;

use crate::app::event::TuiEvent;
use crate::app::{map_key, reduce, Action, AppState};
use crate::services::ServiceHandle;
use crate::ui::{self, search_field::SearchField};

pub struct App<'a> {
    pub state: AppState,
    search_field: SearchField<'a>,
    services: ServiceHandle,
}

impl App<'_> {
    pub fn new(services: ServiceHandle, state: AppState) -> Self {
        Self {
            state,
            search_field: SearchField::default(),
            services,
        }
    }

    pub fn services(&self) -> &ServiceHandle {
        &self.services
    }

    /// Fill the search field with `user_id` and search for it
    pub fn start_search(&mut self, user_id: &str) {
        self.search_field = SearchField::new(user_id);
        self.dispatch(Action::SearchInputChanged(user_id.to_string()));
        self.dispatch(Action::SearchSubmitted);
    }

    pub fn handle_event(&mut self, event: TuiEvent) {
        let action = match event {
            TuiEvent::Key(key) => match self.key_action(key) {
                Some(action) => action,
                None => return,
            },
            other => other.into(),
        };
        self.dispatch(action);
    }

    /// Bound keys win; anything else goes to the search field while it has
    /// focus
    fn key_action(&mut self, key: KeyEvent) -> Option<Action> {
        if let Some(action) = map_key(&self.state, key) {
            return Some(action);
        }
        if self.state.is_editing() {
            return self.search_field.input(key).map(Action::SearchInputChanged);
        }
        None
    }

    /// Reduce an action and perform the side effects it requests
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(self.state.clone(), action.clone());

        match action {
            Action::SearchInputChanged(text) => self.services.set_query(&text),
            Action::SearchSubmitted => {
                if !self.services.search() {
                    tracing::debug!("Search for unchanged query ignored");
                }
            }
            Action::OpenDetail => {
                let resolved = self
                    .state
                    .selected_repository()
                    .map(Route::detail)
                    .and_then(|route| self.services.resolve(route));
                if let Some(repository) = resolved {
                    self.state = reduce(self.state.clone(), Action::ShowDetail(repository));
                }
            }
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        ui::render(frame, &self.state, &mut self.search_field);
    }
}
