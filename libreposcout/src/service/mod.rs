//! Service layer for Reposcout
//!
//! `ReposcoutService` wires the collaborators together from configuration and
//! hands out the search view-model. Nothing is global: every interface (the
//! TUI, tests) builds its own service and owns it.
//!
//! # Example
//!
//! ```no_run
//! use libreposcout::service::ReposcoutService;
//!
//! # async fn example() -> libreposcout::Result<()> {
//! let service = ReposcoutService::new()?;
//! let search = service.search();
//!
//! search.set_query("octocat");
//! search.perform_search().await;
//!
//! for repo in search.state().repositories {
//!     println!("{} ({} forks)", repo.name, repo.forks);
//! }
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod search;

use std::sync::Arc;

use self::events::EventBus;
use self::search::{SearchSettings, SearchViewModel};
use crate::api::github::HttpGithubApi;
use crate::api::GithubApi;
use crate::connectivity::{AlwaysOnline, ConnectivityCheck, TcpProbe};
use crate::notifier::EventNotifier;
use crate::repository::GithubRepository;
use crate::{Config, Result};

/// Buffered events per subscriber
const EVENT_CAPACITY: usize = 100;

/// Main service facade
pub struct ReposcoutService {
    search: SearchViewModel,
    event_bus: EventBus,
}

impl ReposcoutService {
    /// Create a service from the configuration at the default location
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(&config)
    }

    /// Create a service talking to the real GitHub API
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = HttpGithubApi::new(&config.api)?;
        tracing::debug!("Using GitHub API at {}", api.base_url());
        Ok(Self::with_api(Arc::new(api), config))
    }

    /// Create a service over any `GithubApi` implementation
    ///
    /// Notices are published on the event bus. The connectivity probe is
    /// skipped when the configuration asks for it.
    pub fn with_api(api: Arc<dyn GithubApi>, config: &Config) -> Self {
        let settings = SearchSettings::from(&config.search);
        let connectivity: Arc<dyn ConnectivityCheck> = if settings.skip_connectivity_check {
            Arc::new(AlwaysOnline)
        } else {
            Arc::new(TcpProbe::from_config(&config.connectivity))
        };
        Self::with_parts(api, connectivity, settings)
    }

    /// Create a service from explicit collaborators
    pub fn with_parts(
        api: Arc<dyn GithubApi>,
        connectivity: Arc<dyn ConnectivityCheck>,
        settings: SearchSettings,
    ) -> Self {
        let event_bus = EventBus::new(EVENT_CAPACITY);
        let notifier = Arc::new(EventNotifier::new(event_bus.clone()));
        let search = SearchViewModel::new(
            GithubRepository::new(api),
            connectivity,
            notifier,
            event_bus.clone(),
            settings,
        );

        Self { search, event_bus }
    }

    /// Access the search view-model
    pub fn search(&self) -> &SearchViewModel {
        &self.search
    }

    /// Subscribe to state-update events
    pub fn subscribe(&self) -> events::EventReceiver {
        self.event_bus.subscribe()
    }
}
