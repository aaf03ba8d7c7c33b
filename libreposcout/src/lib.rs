//! Reposcout - browse a GitHub user's profile and repositories
//!
//! This library provides the GitHub client, the repository access layer and
//! the search view-model that presentation layers (the terminal UI, tests)
//! drive.

pub mod api;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod format;
pub mod logging;
pub mod navigation;
pub mod notifier;
pub mod repository;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, ReposcoutError, Result};
pub use navigation::Route;
pub use service::search::{SearchOutcome, SearchSettings, SearchState, SearchViewModel};
pub use service::ReposcoutService;
pub use types::{Repository, User};
