//! Pluggable event sinks.

use std::sync::{Arc, Mutex, PoisonError};

use crate::events::SimulationEvent;

/// Consumer of flushed events.
pub trait EventSink: Send {
    fn handle(&mut self, event: &SimulationEvent);

    /// Called once when the run ends.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// Clones share one buffer, so a caller can keep a handle after boxing the
/// sink into a bus and read the events back later.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to the `tracing` subscriber at a fixed level.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> tracing::Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::INFO)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        use tracing::Level;

        // `tracing` macros need the level at compile time.
        let (frame, kind, label) = (event.frame, &event.kind, event.label());
        if self.level == Level::ERROR {
            tracing::error!(frame, event = ?kind, "{label}");
        } else if self.level == Level::WARN {
            tracing::warn!(frame, event = ?kind, "{label}");
        } else if self.level == Level::INFO {
            tracing::info!(frame, event = ?kind, "{label}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(frame, event = ?kind, "{label}");
        } else {
            tracing::trace!(frame, event = ?kind, "{label}");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
