//! Event handling infrastructure
//!
//! Merges UI events (keyboard, resize, tick) with state-update events from the
//! search view-model into a unified action stream.

use std::time::Duration;

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use libreposcout::service::events::Event;

use crate::app::Action;

/// TUI events that can be dispatched
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick for animations and toast expiry
    Tick,

    /// View-model event bridged from the service layer
    Service(Event),
}

impl From<TuiEvent> for Action {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => Action::Key(key),
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
            TuiEvent::Service(event) => event.into(),
        }
    }
}

/// Event handler that polls for terminal and service events
pub struct EventHandler {
    tick_rate: Duration,
    service_events: Option<Receiver<Event>>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            service_events: None,
        }
    }

    /// Also deliver events from the service bridge
    pub fn with_service_events(mut self, receiver: Receiver<Event>) -> Self {
        self.service_events = Some(receiver);
        self
    }

    /// Next pending service event, without blocking
    pub fn next_service_event(&self) -> Option<TuiEvent> {
        self.service_events
            .as_ref()
            .and_then(|rx| rx.try_recv().ok())
            .map(TuiEvent::Service)
    }

    /// Next event, blocking up to the tick rate
    ///
    /// Queued service events are returned first. A timeout yields `Tick`.
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if let Some(event) = self.next_service_event() {
            return Ok(event);
        }

        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows reports releases too
                CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    Ok(TuiEvent::Key(key))
                }
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                _ => Ok(TuiEvent::Tick),
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}
