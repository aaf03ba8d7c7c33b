//! Search view-model
//!
//! Owns everything the list screen renders: the query text, the fetched user
//! and repositories, the loading flag, the profile/list visibility flags and
//! the animation key. A search unit runs in a fixed order:
//!
//! 1. duplicate gate (same raw text as the last search is a no-op)
//! 2. connectivity gate
//! 3. blank-input gate (lowers a loading flag left behind by a superseded unit)
//! 4. reset animations, loading on, fetch user, stagger delay, fetch
//!    repositories, loading off
//!
//! Every state change is also published on the `EventBus`.
//!
//! `launch_search` spawns the unit on the runtime and aborts a previously
//! launched unit that is still running. Each unit carries a generation number
//! and its writes are dropped once a newer unit has started.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::{AbortHandle, JoinHandle};
use uuid::Uuid;

use crate::config::SearchConfig;
use crate::connectivity::ConnectivityCheck;
use crate::notifier::Notifier;
use crate::repository::GithubRepository;
use crate::service::events::{Event, EventBus, EventReceiver};
use crate::types::{Repository, User};

pub const OFFLINE_MESSAGE: &str = "Internet is not available!";

/// Tunables for a search unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Pause between the profile fetch and the repository fetch
    pub stagger_delay: Duration,
    /// Skip the connectivity gate (test configuration)
    pub skip_connectivity_check: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            stagger_delay: Duration::from_millis(400),
            skip_connectivity_check: false,
        }
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            stagger_delay: config.stagger_delay(),
            skip_connectivity_check: config.skip_connectivity_check,
        }
    }
}

/// Snapshot of everything the list screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query_text: String,
    pub last_searched_id: Option<String>,
    pub user: Option<User>,
    pub repositories: Vec<Repository>,
    pub is_loading: bool,
    pub show_profile: bool,
    pub show_list: bool,
    pub animation_key: String,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query_text: String::new(),
            last_searched_id: None,
            user: None,
            repositories: Vec::new(),
            is_loading: false,
            show_profile: false,
            show_list: false,
            animation_key: new_animation_key(),
        }
    }
}

/// How a `perform_search` call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Same text as the previous search; nothing happened
    Duplicate,
    /// Connectivity gate failed; the user was notified
    Offline,
    /// Blank query; nothing fetched
    Blank,
    /// A newer search took over before anything was fetched
    Superseded,
    /// Both fetches ran (each may have failed and notified)
    Completed,
}

struct Shared {
    state: SearchState,
    generation: u64,
}

struct Inner {
    repository: GithubRepository,
    connectivity: Arc<dyn ConnectivityCheck>,
    notifier: Arc<dyn Notifier>,
    events: EventBus,
    settings: SearchSettings,
    shared: Mutex<Shared>,
    in_flight: Mutex<Option<AbortHandle>>,
}

/// Search view-model
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SearchViewModel {
    inner: Arc<Inner>,
}

impl SearchViewModel {
    pub fn new(
        repository: GithubRepository,
        connectivity: Arc<dyn ConnectivityCheck>,
        notifier: Arc<dyn Notifier>,
        events: EventBus,
        settings: SearchSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                connectivity,
                notifier,
                events,
                settings,
                shared: Mutex::new(Shared {
                    state: SearchState::default(),
                    generation: 0,
                }),
                in_flight: Mutex::new(None),
            }),
        }
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        self.inner
            .shared
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current_generation(&self) -> u64 {
        self.shared().generation
    }

    /// Current state snapshot
    pub fn state(&self) -> SearchState {
        self.shared().state.clone()
    }

    pub fn settings(&self) -> SearchSettings {
        self.inner.settings
    }

    /// Subscribe to state-update events
    pub fn subscribe(&self) -> EventReceiver {
        self.inner.events.subscribe()
    }

    /// Update the search field text
    pub fn set_query(&self, text: impl Into<String>) {
        self.shared().state.query_text = text.into();
    }

    /// Run one search unit for the current query text and wait for it
    pub async fn perform_search(&self) -> SearchOutcome {
        match self.begin_search() {
            Some((query, generation)) => self.run_search_unit(query, generation).await,
            None => SearchOutcome::Duplicate,
        }
    }

    /// Start a search unit in the background
    ///
    /// Returns `None` when the duplicate gate rejects the query. Otherwise any
    /// unit still running from an earlier launch is aborted before the new
    /// unit is spawned. Must be called from within a tokio runtime.
    pub fn launch_search(&self) -> Option<JoinHandle<SearchOutcome>> {
        let (query, generation) = self.begin_search()?;

        let mut in_flight = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!("Aborting superseded search");
                previous.abort();
            }
        }

        let view_model = self.clone();
        let handle =
            tokio::spawn(async move { view_model.run_search_unit(query, generation).await });
        *in_flight = Some(handle.abort_handle());

        Some(handle)
    }

    /// Duplicate gate. On success records the query and opens a new generation.
    fn begin_search(&self) -> Option<(String, u64)> {
        let mut shared = self.shared();
        let query = shared.state.query_text.clone();

        if shared.state.last_searched_id.as_deref() == Some(query.as_str()) {
            tracing::debug!(query = %query, "Skipping duplicate search");
            return None;
        }

        shared.state.last_searched_id = Some(query.clone());
        shared.generation += 1;
        Some((query, shared.generation))
    }

    async fn run_search_unit(&self, query: String, generation: u64) -> SearchOutcome {
        if !self.inner.settings.skip_connectivity_check
            && !self.inner.connectivity.is_available().await
        {
            self.set_loading(generation, false);
            self.notify(generation, OFFLINE_MESSAGE);
            return SearchOutcome::Offline;
        }

        if query.trim().is_empty() {
            // An aborted or stale unit may have left the flag raised
            self.clear_loading(generation);
            return SearchOutcome::Blank;
        }

        tracing::info!(query = %query, "Searching");

        if !self.is_current(generation) {
            return SearchOutcome::Superseded;
        }
        self.reset_animations();
        self.set_loading(generation, true);

        self.fetch_user_for(&query, generation).await;

        if !self.inner.settings.stagger_delay.is_zero() {
            tokio::time::sleep(self.inner.settings.stagger_delay).await;
        }

        self.fetch_repositories_for(&query, generation).await;

        self.set_loading(generation, false);
        SearchOutcome::Completed
    }

    /// Fetch the profile for the current query text
    pub async fn fetch_user_data(&self) {
        let (query, generation) = {
            let shared = self.shared();
            (shared.state.query_text.clone(), shared.generation)
        };
        self.fetch_user_for(&query, generation).await;
    }

    /// Fetch the repositories for the current query text
    pub async fn fetch_user_repositories(&self) {
        let (query, generation) = {
            let shared = self.shared();
            (shared.state.query_text.clone(), shared.generation)
        };
        self.fetch_repositories_for(&query, generation).await;
    }

    async fn fetch_user_for(&self, query: &str, generation: u64) {
        match self.inner.repository.fetch_user(query).await {
            Ok(user) => {
                let mut shared = self.shared();
                if shared.generation != generation {
                    return;
                }
                shared.state.user = Some(user.clone());
                shared.state.show_profile = true;
                self.inner.events.emit(Event::UserLoaded { user });
            }
            Err(e) => {
                self.notify(generation, &format!("Failed to fetch user: {}", e.user_message()));
            }
        }
    }

    async fn fetch_repositories_for(&self, query: &str, generation: u64) {
        match self.inner.repository.fetch_repositories(query).await {
            Ok(repositories) => {
                let mut shared = self.shared();
                if shared.generation != generation {
                    return;
                }
                shared.state.repositories = repositories.clone();
                shared.state.show_list = true;
                self.inner
                    .events
                    .emit(Event::RepositoriesLoaded { repositories });
            }
            Err(e) => {
                self.notify(
                    generation,
                    &format!("Failed to fetch repositories: {}", e.user_message()),
                );
            }
        }
    }

    /// Look up a repository in the current result set
    pub fn get_repository_by_id(&self, id: i64) -> Option<Repository> {
        self.shared()
            .state
            .repositories
            .iter()
            .find(|repo| repo.id == id)
            .cloned()
    }

    /// Hide profile and list and rotate the animation key
    pub fn reset_animations(&self) {
        let mut shared = self.shared();
        shared.state.show_profile = false;
        shared.state.show_list = false;

        let mut key = new_animation_key();
        while key == shared.state.animation_key {
            key = new_animation_key();
        }
        shared.state.animation_key = key.clone();

        self.inner
            .events
            .emit(Event::AnimationsReset { animation_key: key });
    }

    fn is_current(&self, generation: u64) -> bool {
        self.current_generation() == generation
    }

    fn set_loading(&self, generation: u64, is_loading: bool) {
        let mut shared = self.shared();
        if shared.generation != generation {
            return;
        }
        shared.state.is_loading = is_loading;
        self.inner.events.emit(Event::LoadingChanged { is_loading });
    }

    fn clear_loading(&self, generation: u64) {
        let mut shared = self.shared();
        if shared.generation != generation || !shared.state.is_loading {
            return;
        }
        shared.state.is_loading = false;
        self.inner
            .events
            .emit(Event::LoadingChanged { is_loading: false });
    }

    fn notify(&self, generation: u64, message: &str) {
        if self.is_current(generation) {
            self.inner.notifier.notify(message);
        }
    }
}

fn new_animation_key() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockGithubApi;
    use crate::connectivity::{AlwaysOffline, AlwaysOnline};
    use crate::error::ApiError;
    use crate::notifier::CollectingNotifier;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::broadcast::error::TryRecvError;

    /// Connectivity that can be switched off mid-test and answers after a delay
    struct Switchable {
        online: AtomicBool,
        delay: Duration,
    }

    impl Switchable {
        fn online(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                online: AtomicBool::new(true),
                delay,
            })
        }

        fn go_offline(&self) {
            self.online.store(false, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ConnectivityCheck for Switchable {
        async fn is_available(&self) -> bool {
            let online = self.online.load(Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            online
        }
    }

    fn gated_view_model(
        api: MockGithubApi,
        connectivity: Arc<Switchable>,
    ) -> (SearchViewModel, CollectingNotifier) {
        let notifier = CollectingNotifier::new();
        let vm = SearchViewModel::new(
            GithubRepository::new(Arc::new(api)),
            connectivity,
            Arc::new(notifier.clone()),
            EventBus::new(32),
            SearchSettings {
                stagger_delay: Duration::ZERO,
                skip_connectivity_check: false,
            },
        );
        (vm, notifier)
    }

    fn drain(events: &mut EventReceiver) -> Vec<Event> {
        let mut seen = Vec::new();
        loop {
            match events.try_recv() {
                Ok(event) => seen.push(event),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => return seen,
            }
        }
    }

    fn test_repos() -> Vec<Repository> {
        vec![
            Repository {
                id: 1,
                name: "Repo1".to_string(),
                description: Some("repo description 1".to_string()),
                updated_at: "2024-11-03T10:00:00Z".to_string(),
                stargazers_count: 1,
                forks: 1,
            },
            Repository {
                id: 2,
                name: "Repo2".to_string(),
                description: Some("repo description 2".to_string()),
                updated_at: "2024-11-04T10:00:00Z".to_string(),
                stargazers_count: 2,
                forks: 2,
            },
        ]
    }

    fn test_user() -> User {
        User::new("test", Some("https://avatars.github.com/".to_string()))
    }

    fn test_settings() -> SearchSettings {
        SearchSettings {
            stagger_delay: Duration::ZERO,
            skip_connectivity_check: true,
        }
    }

    fn view_model(api: MockGithubApi) -> (SearchViewModel, CollectingNotifier) {
        let notifier = CollectingNotifier::new();
        let vm = SearchViewModel::new(
            GithubRepository::new(Arc::new(api)),
            Arc::new(AlwaysOnline),
            Arc::new(notifier.clone()),
            EventBus::new(32),
            test_settings(),
        );
        (vm, notifier)
    }

    #[tokio::test]
    async fn test_duplicate_query_does_not_fetch() {
        let api = MockGithubApi::success(test_user(), test_repos());
        let (vm, _) = view_model(api.clone());

        vm.set_query("test");
        assert_eq!(vm.perform_search().await, SearchOutcome::Completed);
        assert_eq!(vm.perform_search().await, SearchOutcome::Duplicate);

        assert_eq!(api.user_call_count(), 1);
        assert_eq!(api.repos_call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_user_data_sets_user_and_show_profile() {
        let (vm, _) = view_model(MockGithubApi::success(test_user(), test_repos()));

        vm.set_query("test");
        vm.fetch_user_data().await;

        let state = vm.state();
        assert_eq!(state.user, Some(test_user()));
        assert!(state.show_profile);
    }

    #[tokio::test]
    async fn test_fetch_user_failure_keeps_prior_user() {
        let (vm, notifier) = view_model(MockGithubApi::user_failure(ApiError::NotFound(
            "user ghost".to_string(),
        )));

        vm.set_query("ghost");
        vm.fetch_user_data().await;

        let state = vm.state();
        assert!(state.user.is_none());
        assert!(!state.show_profile);
        assert_eq!(
            notifier.messages(),
            vec!["Failed to fetch user: Not found: user ghost"]
        );
    }

    #[tokio::test]
    async fn test_fetch_repositories_failure_leaves_list_hidden() {
        let (vm, notifier) = view_model(MockGithubApi::repos_failure(
            test_user(),
            ApiError::Network("Error".to_string()),
        ));

        vm.set_query("test");
        vm.fetch_user_repositories().await;

        let state = vm.state();
        assert!(state.repositories.is_empty());
        assert!(!state.show_list);
        assert_eq!(notifier.messages().len(), 1);
        assert!(notifier.messages()[0].starts_with("Failed to fetch repositories:"));
    }

    #[tokio::test]
    async fn test_reset_animations_rotates_key() {
        let (vm, _) = view_model(MockGithubApi::success(test_user(), test_repos()));
        vm.set_query("test");
        vm.fetch_user_data().await;
        let old_key = vm.state().animation_key;

        vm.reset_animations();

        let state = vm.state();
        assert!(!state.show_profile);
        assert!(!state.show_list);
        assert_ne!(state.animation_key, old_key);
    }

    #[tokio::test]
    async fn test_get_repository_by_id() {
        let (vm, _) = view_model(MockGithubApi::success(test_user(), test_repos()));
        vm.set_query("test");
        vm.fetch_user_repositories().await;

        assert_eq!(vm.get_repository_by_id(1), Some(test_repos()[0].clone()));
        assert_eq!(vm.get_repository_by_id(3), None);
    }

    #[tokio::test]
    async fn test_perform_search_fetches_both() {
        let (vm, notifier) = view_model(MockGithubApi::success(test_user(), test_repos()));
        let initial_key = vm.state().animation_key;

        vm.set_query("test");
        vm.perform_search().await;

        let state = vm.state();
        assert_eq!(state.user, Some(test_user()));
        assert!(state.show_profile);
        assert_eq!(state.repositories, test_repos());
        assert!(state.show_list);
        assert!(!state.is_loading);
        assert_ne!(state.animation_key, initial_key);
        assert_eq!(state.last_searched_id.as_deref(), Some("test"));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_changes_nothing() {
        let api = MockGithubApi::success(test_user(), test_repos());
        let (vm, _) = view_model(api.clone());
        let before = vm.state();

        vm.set_query("   ");
        assert_eq!(vm.perform_search().await, SearchOutcome::Blank);

        let after = vm.state();
        assert_eq!(after.animation_key, before.animation_key);
        assert!(!after.is_loading);
        assert_eq!(api.user_call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_query_twice_is_duplicate() {
        let (vm, _) = view_model(MockGithubApi::success(test_user(), test_repos()));

        assert_eq!(vm.perform_search().await, SearchOutcome::Blank);
        assert_eq!(vm.perform_search().await, SearchOutcome::Duplicate);
    }

    #[tokio::test]
    async fn test_offline_notifies_and_skips_fetch() {
        let api = MockGithubApi::success(test_user(), test_repos());
        let notifier = CollectingNotifier::new();
        let vm = SearchViewModel::new(
            GithubRepository::new(Arc::new(api.clone())),
            Arc::new(AlwaysOffline),
            Arc::new(notifier.clone()),
            EventBus::new(8),
            SearchSettings {
                stagger_delay: Duration::ZERO,
                skip_connectivity_check: false,
            },
        );
        let key = vm.state().animation_key;

        vm.set_query("test");
        assert_eq!(vm.perform_search().await, SearchOutcome::Offline);

        assert_eq!(notifier.messages(), vec![OFFLINE_MESSAGE]);
        assert_eq!(api.user_call_count(), 0);
        assert_eq!(vm.state().animation_key, key);
        assert!(!vm.state().is_loading);
    }

    #[tokio::test]
    async fn test_duplicate_guard_is_case_sensitive() {
        let api = MockGithubApi::success(test_user(), test_repos());
        let (vm, _) = view_model(api.clone());

        vm.set_query("Octocat");
        vm.perform_search().await;
        vm.set_query("octocat");
        assert_eq!(vm.perform_search().await, SearchOutcome::Completed);

        assert_eq!(api.user_call_count(), 2);
    }

    #[tokio::test]
    async fn test_events_follow_search_order() {
        let (vm, _) = view_model(MockGithubApi::success(test_user(), test_repos()));
        let mut events = vm.subscribe();

        vm.set_query("test");
        vm.perform_search().await;

        assert!(matches!(events.recv().await.unwrap(), Event::AnimationsReset { .. }));
        assert_eq!(
            events.recv().await.unwrap(),
            Event::LoadingChanged { is_loading: true }
        );
        assert!(matches!(events.recv().await.unwrap(), Event::UserLoaded { .. }));
        assert!(matches!(
            events.recv().await.unwrap(),
            Event::RepositoriesLoaded { .. }
        ));
        assert_eq!(
            events.recv().await.unwrap(),
            Event::LoadingChanged { is_loading: false }
        );
    }

    #[tokio::test]
    async fn test_launch_search_supersedes_previous() {
        let api = MockGithubApi::success(test_user(), test_repos())
            .with_delay(Duration::from_millis(200));
        let (vm, _) = view_model(api.clone());

        vm.set_query("first");
        let first = vm.launch_search().unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        vm.set_query("second");
        let second = vm.launch_search().unwrap();

        assert!(first.await.unwrap_err().is_cancelled());
        assert_eq!(second.await.unwrap(), SearchOutcome::Completed);

        let state = vm.state();
        assert!(!state.is_loading);
        assert!(state.show_list);
        assert_eq!(api.requested_ids(), vec!["first", "second", "second"]);
    }

    #[tokio::test]
    async fn test_blank_launch_clears_loading_of_aborted_search() {
        let api = MockGithubApi::success(test_user(), test_repos())
            .with_delay(Duration::from_millis(200));
        let (vm, _) = view_model(api.clone());
        let mut events = vm.subscribe();

        vm.set_query("octocat");
        let first = vm.launch_search().unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(vm.state().is_loading);

        vm.set_query("");
        let second = vm.launch_search().unwrap();

        assert!(first.await.unwrap_err().is_cancelled());
        assert_eq!(second.await.unwrap(), SearchOutcome::Blank);
        tokio::time::sleep(Duration::from_millis(250)).await;

        let state = vm.state();
        assert!(!state.is_loading);
        assert!(!state.show_profile);
        assert!(!state.show_list);
        assert_eq!(
            drain(&mut events).last(),
            Some(&Event::LoadingChanged { is_loading: false })
        );
        assert_eq!(api.repos_call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_search_overlapping_running_search_clears_loading() {
        let api = MockGithubApi::success(test_user(), test_repos())
            .with_delay(Duration::from_millis(100));
        let (vm, _) = view_model(api);

        vm.set_query("octocat");
        let running = {
            let vm = vm.clone();
            tokio::spawn(async move { vm.perform_search().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        vm.set_query("  ");
        assert_eq!(vm.perform_search().await, SearchOutcome::Blank);
        assert!(!vm.state().is_loading);

        assert_eq!(running.await.unwrap(), SearchOutcome::Completed);

        // The older unit's writes are dropped, including its own loading-off
        let state = vm.state();
        assert!(!state.is_loading);
        assert!(!state.show_profile);
        assert!(!state.show_list);
        assert_eq!(state.user, None);
    }

    #[tokio::test]
    async fn test_offline_launch_clears_loading_of_aborted_search() {
        let connectivity = Switchable::online(Duration::ZERO);
        let api = MockGithubApi::success(test_user(), test_repos())
            .with_delay(Duration::from_millis(200));
        let (vm, notifier) = gated_view_model(api.clone(), connectivity.clone());

        vm.set_query("first");
        let first = vm.launch_search().unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(vm.state().is_loading);

        connectivity.go_offline();
        vm.set_query("second");
        let second = vm.launch_search().unwrap();

        assert!(first.await.unwrap_err().is_cancelled());
        assert_eq!(second.await.unwrap(), SearchOutcome::Offline);

        let state = vm.state();
        assert!(!state.is_loading);
        assert!(!state.show_profile);
        assert!(!state.show_list);
        assert_eq!(notifier.messages(), vec![OFFLINE_MESSAGE]);
        assert_eq!(api.requested_ids(), vec!["first"]);
    }

    #[tokio::test]
    async fn test_unit_superseded_during_connectivity_check() {
        let connectivity = Switchable::online(Duration::from_millis(100));
        let api = MockGithubApi::success(test_user(), test_repos());
        let (vm, _) = gated_view_model(api.clone(), connectivity);

        vm.set_query("first");
        let older = {
            let vm = vm.clone();
            tokio::spawn(async move { vm.perform_search().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        vm.set_query("second");
        assert_eq!(vm.perform_search().await, SearchOutcome::Completed);
        assert_eq!(older.await.unwrap(), SearchOutcome::Superseded);

        assert_eq!(api.requested_ids(), vec!["second", "second"]);
        assert!(vm.state().show_list);
        assert!(!vm.state().is_loading);
    }

    #[tokio::test]
    async fn test_launch_search_rejects_duplicate() {
        let (vm, _) = view_model(MockGithubApi::success(test_user(), test_repos()));

        vm.set_query("test");
        vm.launch_search().unwrap().await.unwrap();
        assert!(vm.launch_search().is_none());
    }
}
