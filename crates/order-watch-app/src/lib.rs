//! # Order Watch App
//!
//! The process around the [`order_watch`] monitor: environment config, the
//! HTTP order source, token stores, a terminal notifier and the lifecycle
//! that schedules polls. Exposed as a library for integration testing.

pub mod config;
pub mod http_source;
pub mod lifecycle;
pub mod terminal;
pub mod token;
