//! Service layer adapter for TUI
//!
//! Bridges the async `ReposcoutService` and the synchronous TUI event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle`: owns the service and the tokio runtime it runs on
//! - Searching: `launch_search` spawns the search unit on the runtime and
//!   returns immediately; a newer search aborts the older one
//! - Events: bridges the tokio broadcast bus to a crossbeam channel for the
//!   sync event loop
//!
//! # Example
//!
//! ```no_run
//! use libreposcout::Config;
//! use reposcout_tui::services::ServiceHandle;
//!
//! # fn example() -> reposcout_tui::error::Result<()> {
//! let config = Config::load()?;
//! let services = ServiceHandle::from_config(&config)?;
//! let events = services.subscribe();
//!
//! services.set_query("octocat");
//! services.search();
//!
//! // In the event loop, drain events
//! while let Ok(event) = events.try_recv() {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use libreposcout::api::mock::MockGithubApi;
use libreposcout::connectivity::AlwaysOnline;
use libreposcout::navigation::resolve_detail;
use libreposcout::service::events::Event;
use libreposcout::{Config, ReposcoutService, Repository, Route, SearchSettings, SearchViewModel};
use tokio::sync::broadcast::error::RecvError;

use crate::error::{Result, TuiError};

/// Service handle for TUI operations
pub struct ServiceHandle {
    service: ReposcoutService,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Wrap an already-built service
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(service: ReposcoutService) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("reposcout-worker")
            .build()
            .map_err(|e| TuiError::Application(format!("Failed to start runtime: {e}")))?;

        Ok(Self { service, runtime })
    }

    /// Talk to the GitHub API described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(ReposcoutService::from_config(config)?)
    }

    /// Serve built-in sample data instead of the network
    ///
    /// Only the `octocat` user exists; every other id is not found.
    pub fn offline_demo(config: &Config) -> Result<Self> {
        let settings = SearchSettings {
            skip_connectivity_check: true,
            ..SearchSettings::from(&config.search)
        };
        Self::new(ReposcoutService::with_parts(
            Arc::new(MockGithubApi::demo()),
            Arc::new(AlwaysOnline),
            settings,
        ))
    }

    /// Subscribe to view-model events
    ///
    /// Spawns a task forwarding the tokio broadcast channel into a crossbeam
    /// channel. The task ends when the returned receiver is dropped.
    pub fn subscribe(&self) -> Receiver<Event> {
        let (tx, rx) = unbounded();
        let mut event_rx = self.service.subscribe();

        self.runtime.spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event receiver lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        rx
    }

    /// Mirror the search field into the view-model
    pub fn set_query(&self, text: &str) {
        self.service.search().set_query(text);
    }

    /// Start a search for the current query
    ///
    /// Returns `false` when the query repeats the previous search and nothing
    /// was started.
    pub fn search(&self) -> bool {
        let _guard = self.runtime.enter();
        self.service.search().launch_search().is_some()
    }

    /// Repository to show for `route`, looked up in the current results
    pub fn resolve(&self, route: Route) -> Option<Repository> {
        resolve_detail(self.service.search(), route)
    }

    /// Access the search view-model
    pub fn view_model(&self) -> &SearchViewModel {
        self.service.search()
    }
}
