//! User-visible notices
//!
//! The view-model reports connectivity and fetch failures through a
//! `Notifier` instead of touching the UI directly.

use std::sync::{Arc, Mutex};

use crate::service::events::{Event, EventBus};

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _message: &str) {}
}

/// Keeps messages in memory, in the order they were raised
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

/// Publishes messages as `Event::Notice` so a UI can show them as toasts
#[derive(Clone)]
pub struct EventNotifier {
    events: EventBus,
}

impl EventNotifier {
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }
}

impl Notifier for EventNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("Notice: {}", message);
        self.events.emit(Event::Notice {
            message: message.to_string(),
        });
    }
}
