//! # Monitor Actor
//!
//! [`MonitorActor`] is the server side of the watcher. It owns the
//! [`MonitorState`] and the currently shown alert, and it processes
//! [`MonitorRequest`]s one at a time. Polls therefore never overlap, and the
//! pending flag needs no lock.
//!
//! Alert expiry is a branch of the same `select!` loop. It is keyed to the
//! alert on screen, so replacing an alert also replaces its deadline.

use crate::client::MonitorClient;
use crate::message::MonitorRequest;
use crate::model::{extract_orders, EnvelopeShape, Order};
use crate::notifier::{AlertView, Badge, Notifier};
use crate::settings::MonitorSettings;
use crate::source::{OrderSource, TokenStore};
use crate::state::{MonitorState, PollReport, PollTrigger, Transition};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Dependencies injected into the monitor when it starts running.
#[derive(Clone)]
pub struct MonitorContext {
    pub source: Arc<dyn OrderSource>,
    pub notifier: Arc<dyn Notifier>,
    pub tokens: Arc<dyn TokenStore>,
}

impl MonitorContext {
    pub fn new(
        source: impl OrderSource + 'static,
        notifier: impl Notifier + 'static,
        tokens: impl TokenStore + 'static,
    ) -> Self {
        Self {
            source: Arc::new(source),
            notifier: Arc::new(notifier),
            tokens: Arc::new(tokens),
        }
    }
}

struct ShownAlert {
    id: u64,
    /// `None` when the TTL reaches past what the clock can represent.
    expires_at: Option<Instant>,
}

/// The actor that polls for pending orders and drives the notifier.
///
/// # Usage Pattern
///
/// 1. **Create**: `MonitorActor::new(settings)` returns the actor and a [`MonitorClient`].
/// 2. **Wire & Run**: spawn `actor.run(context)` with the source, notifier and token store.
/// 3. **Use**: call the client. Dropping every client stops the actor.
///
/// ```rust
/// use order_watch::mock::{MockOrderSource, RecordingNotifier};
/// use order_watch::{MonitorActor, MonitorContext, MonitorSettings, PollTrigger, StaticToken};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() {
///     let source = MockOrderSource::new();
///     source.expect_body(json!([{ "status": "active" }]));
///
///     let notifier = RecordingNotifier::new();
///     let (actor, client) = MonitorActor::new(MonitorSettings::default());
///     tokio::spawn(actor.run(MonitorContext::new(
///         source.clone(),
///         notifier.clone(),
///         StaticToken::new("secret"),
///     )));
///
///     client.poll_now(PollTrigger::Manual).await.unwrap();
///     assert!(client.snapshot().await.unwrap().has_pending_orders);
///     assert_eq!(notifier.alerts().len(), 1);
/// }
/// ```
pub struct MonitorActor {
    receiver: mpsc::Receiver<MonitorRequest>,
    settings: MonitorSettings,
    state: MonitorState,
    alert: Option<ShownAlert>,
    next_alert_id: u64,
}

impl MonitorActor {
    pub fn new(settings: MonitorSettings) -> (Self, MonitorClient) {
        let (sender, receiver) = mpsc::channel(settings.channel_capacity.max(1));
        let actor = Self {
            receiver,
            settings,
            state: MonitorState::default(),
            alert: None,
            next_alert_id: 1,
        };
        (actor, MonitorClient::new(sender))
    }

    /// Runs the message loop until every [`MonitorClient`] is dropped.
    pub async fn run(mut self, ctx: MonitorContext) {
        info!(
            poll_interval_secs = self.settings.poll_interval.as_secs(),
            "Monitor started"
        );

        loop {
            let deadline = self.alert.as_ref().and_then(|a| a.expires_at);
            tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(id) = self.alert.as_ref().map(|a| a.id) {
                        info!(alert_id = id, "Auto-dismissing alert");
                    }
                    self.take_alert(&ctx);
                }
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg, &ctx).await,
                    None => break,
                },
            }
        }

        let snapshot = self.state.snapshot(None);
        info!(
            polls = snapshot.polls,
            has_pending_orders = snapshot.has_pending_orders,
            "Monitor stopped"
        );
    }

    async fn handle(&mut self, msg: MonitorRequest, ctx: &MonitorContext) {
        match msg {
            MonitorRequest::Poll { trigger, respond_to } => {
                let report = self.poll(trigger, ctx).await;
                let _ = respond_to.send(Ok(report));
            }
            MonitorRequest::Visibility { visible, respond_to } => {
                let report = if !visible {
                    None
                } else if self.state.is_stale(Instant::now(), self.settings.stale_after) {
                    info!("Visible again after stale window, polling");
                    Some(self.poll(PollTrigger::Visibility, ctx).await)
                } else {
                    debug!("Visible again, last check still fresh");
                    None
                };
                let _ = respond_to.send(Ok(report));
            }
            MonitorRequest::DismissAlert { respond_to } => {
                let dismissed = self.take_alert(ctx);
                debug!(dismissed, "Dismiss alert");
                let _ = respond_to.send(Ok(dismissed));
            }
            MonitorRequest::ViewAll { respond_to } => {
                ctx.notifier.open_orders_page(&self.settings.view_all_target);
                let _ = respond_to.send(Ok(()));
            }
            MonitorRequest::Snapshot { respond_to } => {
                let alert_id = self.alert.as_ref().map(|a| a.id);
                let _ = respond_to.send(Ok(self.state.snapshot(alert_id)));
            }
        }
    }

    async fn poll(&mut self, trigger: PollTrigger, ctx: &MonitorContext) -> PollReport {
        let Some(token) = ctx.tokens.admin_token() else {
            debug!(?trigger, "No admin token, skipping poll");
            return PollReport::Skipped;
        };

        debug!(?trigger, "Polling pending orders");
        let result = ctx.source.fetch_active_orders(&token).await;
        self.state.mark_checked(Instant::now());

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                self.state.record_failure();
                warn!(
                    ?trigger,
                    error = %e,
                    has_pending_orders = self.state.has_pending_orders(),
                    "Poll failed"
                );
                return PollReport::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let extracted = extract_orders(&body);
        if extracted.shape == EnvelopeShape::Unrecognized {
            debug!("No orders array found in response");
        }
        let pending = extracted.pending();
        let transition = self.state.apply_count(pending.len());
        info!(
            ?trigger,
            shape = ?extracted.shape,
            listed = extracted.raw_len,
            pending = pending.len(),
            ?transition,
            "Poll completed"
        );

        self.apply_transition(transition, &pending, ctx);
        PollReport::Completed {
            pending: pending.len(),
            transition,
        }
    }

    fn apply_transition(&mut self, transition: Transition, pending: &[Order], ctx: &MonitorContext) {
        match transition {
            Transition::Raised => {
                self.show_alert(pending, ctx);
                ctx.notifier.play_sound();
                ctx.notifier.set_badge(&self.badge(pending.len()));
            }
            Transition::Refreshed => ctx.notifier.set_badge(&self.badge(pending.len())),
            Transition::Cleared => ctx.notifier.clear_badge(),
            Transition::Quiet => {}
        }
    }

    fn show_alert(&mut self, orders: &[Order], ctx: &MonitorContext) {
        if let Some(previous) = self.alert.take() {
            debug!(alert_id = previous.id, "Replacing alert");
            ctx.notifier.remove_alert(previous.id);
        }

        let id = self.next_alert_id;
        self.next_alert_id += 1;
        let view = AlertView::new(
            id,
            orders,
            self.settings.preview_limit,
            &self.settings.view_all_target,
        );
        ctx.notifier.show_alert(&view);
        let expires_at = Instant::now().checked_add(self.settings.alert_ttl);
        if expires_at.is_none() {
            warn!(alert_id = id, "Alert TTL out of range, alert stays until dismissed");
        }
        self.alert = Some(ShownAlert { id, expires_at });
    }

    fn take_alert(&mut self, ctx: &MonitorContext) -> bool {
        match self.alert.take() {
            Some(alert) => {
                ctx.notifier.remove_alert(alert.id);
                true
            }
            None => false,
        }
    }

    fn badge(&self, count: usize) -> Badge {
        Badge::for_count(count, self.settings.badge_cap)
    }
}
