//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What can happen
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State
//!
//! Side effects (launching a search, resolving a detail route) are performed
//! by the event loop after an action has been reduced.

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::{Action, Focus, Screen};
pub use reducer::{map_key, reduce};
pub use state::{AppState, SearchPane, Toast, UiConfig};
