//! # bunting-telemetry
//!
//! Event bus for per-frame simulation telemetry. The frame runner emits
//! structured events (frame timing, per-flag motion, energy, wind) that
//! pluggable sinks consume after each flush.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
