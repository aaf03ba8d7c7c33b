//! reposcout-tui library
//!
//! Exports types and modules for testing and potential reuse.

pub mod app;
pub mod error;
pub mod runner;
pub mod services;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{map_key, reduce, Action, AppState, Focus, Screen};
pub use error::{Result, TuiError};
pub use runner::App;
