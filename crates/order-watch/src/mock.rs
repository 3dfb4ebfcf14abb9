//! # Mocks & Testing Guide
//!
//! In-memory stand-ins for the monitor's seams, so the real [`MonitorActor`]
//! can be tested without a backend or a screen.
//!
//! | Mock | Replaces | Use it to |
//! |------|----------|-----------|
//! | [`MockOrderSource`] | [`OrderSource`] | queue response bodies or failures, then `verify()` they were consumed |
//! | [`RecordingNotifier`] | [`Notifier`] | assert which alerts, sounds and badges the monitor produced |
//! | [`StaticToken`](crate::StaticToken) | [`TokenStore`](crate::TokenStore) | simulate logged-in / logged-out |
//!
//! ## Example
//!
//! ```rust
//! use order_watch::mock::{MockOrderSource, RecordingNotifier};
//! use order_watch::{MonitorActor, MonitorContext, MonitorSettings, PollTrigger, StaticToken, WatchError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = MockOrderSource::new();
//!     source.expect_failure(WatchError::UnexpectedStatus { status: 502, reason: "Bad Gateway".into() });
//!
//!     let notifier = RecordingNotifier::new();
//!     let (actor, client) = MonitorActor::new(MonitorSettings::default());
//!     tokio::spawn(actor.run(MonitorContext::new(source.clone(), notifier.clone(), StaticToken::new("t"))));
//!
//!     let report = client.poll_now(PollTrigger::Manual).await.unwrap();
//!     assert!(matches!(report, order_watch::PollReport::Failed { .. }));
//!     assert!(notifier.events().is_empty());
//!     source.verify();
//! }
//! ```
//!
//! [`MonitorActor`]: crate::MonitorActor

use crate::error::WatchError;
use crate::notifier::{AlertView, Badge, Notifier};
use crate::source::OrderSource;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// ORDER SOURCE
// =============================================================================

/// Queued response for one expected fetch.
enum Expectation {
    Body(Value),
    Failure(WatchError),
}

/// An [`OrderSource`] that replays queued responses in order.
///
/// Clones share the same queue, so a test keeps one clone and hands another
/// to the monitor. A fetch with nothing queued panics, like an unexpected call
/// on any strict mock.
#[derive(Clone, Default)]
pub struct MockOrderSource {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    tokens_seen: Arc<Mutex<Vec<String>>>,
}

impl MockOrderSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful fetch returning `body`.
    pub fn expect_body(&self, body: Value) -> &Self {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Body(body));
        self
    }

    /// Queues a failed fetch.
    pub fn expect_failure(&self, error: WatchError) -> &Self {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Failure(error));
        self
    }

    /// Number of fetches performed so far.
    pub fn calls(&self) -> usize {
        self.tokens_seen.lock().unwrap().len()
    }

    /// Bearer tokens received, in call order.
    pub fn tokens_seen(&self) -> Vec<String> {
        self.tokens_seen.lock().unwrap().clone()
    }

    /// Panics if queued responses were never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        assert_eq!(remaining, 0, "{} expected fetch(es) never happened", remaining);
    }
}

#[async_trait]
impl OrderSource for MockOrderSource {
    async fn fetch_active_orders(&self, token: &str) -> Result<Value, WatchError> {
        self.tokens_seen.lock().unwrap().push(token.to_string());
        let next = self.expectations.lock().unwrap().pop_front();
        match next {
            Some(Expectation::Body(body)) => Ok(body),
            Some(Expectation::Failure(error)) => Err(error),
            None => panic!("Unexpected fetch: no response queued"),
        }
    }
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// One call received by a [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq)]
pub enum NotifierEvent {
    AlertShown(AlertView),
    AlertRemoved(u64),
    Sound,
    BadgeSet(Badge),
    BadgeCleared,
    Navigated(String),
}

/// A [`Notifier`] that records every call for later assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<NotifierEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotifierEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<AlertView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                NotifierEvent::AlertShown(alert) => Some(alert),
                _ => None,
            })
            .collect()
    }

    pub fn sounds(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, NotifierEvent::Sound))
            .count()
    }

    /// Label of the badge as it currently stands, replaying set/clear calls.
    pub fn badge_label(&self) -> Option<String> {
        self.events()
            .into_iter()
            .fold(None, |current, event| match event {
                NotifierEvent::BadgeSet(badge) => Some(badge.label),
                NotifierEvent::BadgeCleared => None,
                _ => current,
            })
    }

    /// Id of the alert currently shown, replaying show/remove calls.
    pub fn visible_alert(&self) -> Option<u64> {
        self.events()
            .into_iter()
            .fold(None, |current, event| match event {
                NotifierEvent::AlertShown(alert) => Some(alert.alert_id),
                NotifierEvent::AlertRemoved(id) if current == Some(id) => None,
                _ => current,
            })
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: NotifierEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Notifier for RecordingNotifier {
    fn show_alert(&self, alert: &AlertView) {
        self.record(NotifierEvent::AlertShown(alert.clone()));
    }

    fn remove_alert(&self, alert_id: u64) {
        self.record(NotifierEvent::AlertRemoved(alert_id));
    }

    fn play_sound(&self) {
        self.record(NotifierEvent::Sound);
    }

    fn set_badge(&self, badge: &Badge) {
        self.record(NotifierEvent::BadgeSet(badge.clone()));
    }

    fn clear_badge(&self) {
        self.record(NotifierEvent::BadgeCleared);
    }

    fn open_orders_page(&self, target: &str) {
        self.record(NotifierEvent::Navigated(target.to_string()));
    }
}
