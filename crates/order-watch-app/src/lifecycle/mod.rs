//! # Lifecycle
//!
//! Wiring and shutdown for the watcher process.
//!
//! [`MonitorSystem`] creates the [`MonitorActor`](order_watch::MonitorActor),
//! injects its dependencies through `run(context)` and drives the schedule:
//!
//! 1. **Start**: only when the token store yields a token. Without one nothing
//!    is spawned.
//! 2. **Poll**: once immediately, then every `poll_interval`.
//! 3. **Stop**: signal the ticker, drop the client so the actor's channel
//!    closes, then await both tasks.
//!
//! [`setup_tracing`] installs the compact `tracing` subscriber.

pub mod monitor_system;
pub mod tracing;

pub use self::monitor_system::*;
pub use self::tracing::*;
