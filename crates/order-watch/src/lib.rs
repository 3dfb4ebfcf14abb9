//! # Order Watch
//!
//! Background watcher for orders that wait on an admin. It polls the admin
//! backend's order listing, keeps one flag ("are there pending orders?") and
//! fires alert, sound and badge effects when that flag changes.
//!
//! ## Architecture Overview
//!
//! The crate follows the actor pattern on Tokio:
//!
//! 1. **State Layer** ([`MonitorState`]): the pending flag, the last check time
//!    and failure counters. Only the actor touches it.
//! 2. **Runtime Layer** ([`MonitorActor`]): processes [`MonitorRequest`]s one at
//!    a time, so two polls can never interleave.
//! 3. **Interface Layer** ([`MonitorClient`]): cloneable async handle.
//!
//! Inputs and outputs are traits injected at `run()` through [`MonitorContext`]:
//!
//! - [`OrderSource`] fetches the raw listing body (HTTP in production).
//! - [`TokenStore`] gates every poll on an admin token.
//! - [`Notifier`] receives alerts, sounds and badges.
//!
//! ## Transition Policy
//!
//! | Previous | New | Effect |
//! |----------|-----|--------|
//! | false | true | alert + sound + badge |
//! | true | true | badge refresh |
//! | true | false | badge cleared |
//! | false | false | nothing |
//!
//! A failed poll changes nothing but the last-check time and the failure counter.
//!
//! ## Quick Start
//!
//! ```rust
//! use order_watch::mock::{MockOrderSource, RecordingNotifier};
//! use order_watch::{MonitorActor, MonitorContext, MonitorSettings, PollReport, PollTrigger, StaticToken, Transition};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = MockOrderSource::new();
//!     source.expect_body(json!({
//!         "success": true,
//!         "data": { "orders": [{ "status": "active" }, { "status": "shipped" }, null] }
//!     }));
//!
//!     let notifier = RecordingNotifier::new();
//!     let (actor, client) = MonitorActor::new(MonitorSettings::default());
//!     tokio::spawn(actor.run(MonitorContext::new(source, notifier.clone(), StaticToken::new("token"))));
//!
//!     let report = client.poll_now(PollTrigger::Startup).await.unwrap();
//!     assert_eq!(report, PollReport::Completed { pending: 1, transition: Transition::Raised });
//!     assert_eq!(notifier.badge_label().as_deref(), Some("1"));
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for the in-memory source and notifier.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod model;
pub mod notifier;
pub mod settings;
pub mod source;
pub mod state;

// Re-export core types for convenience
pub use actor::{MonitorActor, MonitorContext};
pub use client::MonitorClient;
pub use error::WatchError;
pub use message::{MonitorRequest, Response};
pub use model::{extract_orders, EnvelopeShape, Order, OrderStatus};
pub use notifier::{AlertView, Badge, Notifier, OrderPreview};
pub use settings::{MonitorSettings, ORDERS_PAGE};
pub use source::{OrderSource, StaticToken, TokenStore};
pub use state::{MonitorSnapshot, MonitorState, PollReport, PollTrigger, Transition};
