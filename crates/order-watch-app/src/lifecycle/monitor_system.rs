use order_watch::{
    MonitorActor, MonitorClient, MonitorContext, MonitorSettings, PollReport, PollTrigger,
    WatchError,
};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use std::time::Duration;
use tracing::{debug, error, info, warn};

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Runtime orchestrator for the order watcher.
///
/// `MonitorSystem` owns:
/// - the [`MonitorActor`] task,
/// - a ticker task that polls once at startup and then every `poll_interval`,
/// - the public [`MonitorClient`] used for visibility, dismiss and status calls.
///
/// # Example
///
/// ```ignore
/// let ctx = MonitorContext::new(source, TerminalNotifier::new(), tokens);
/// let Some(system) = MonitorSystem::start(MonitorSettings::default(), ctx) else {
///     return Ok(()); // no admin token, nothing to watch
/// };
/// system.visibility_changed(true).await?;
/// system.stop().await?;
/// ```
pub struct MonitorSystem {
    pub client: MonitorClient,
    handles: Vec<JoinHandle<()>>,
    stop: Option<oneshot::Sender<()>>,
}

impl MonitorSystem {
    /// Starts the monitor if an admin token is present, otherwise returns `None`
    /// and spawns nothing.
    pub fn start(settings: MonitorSettings, ctx: MonitorContext) -> Option<Self> {
        if ctx.tokens.admin_token().is_none() {
            info!("No admin token, order monitor not started");
            return None;
        }

        let period = settings.poll_interval.max(MIN_POLL_INTERVAL);
        if period != settings.poll_interval {
            warn!(
                configured_ms = settings.poll_interval.as_millis() as u64,
                "Poll interval below minimum, using {}s",
                MIN_POLL_INTERVAL.as_secs()
            );
        }
        let (actor, client) = MonitorActor::new(settings);
        let actor_handle = tokio::spawn(actor.run(ctx));

        let (stop, stopped) = oneshot::channel();
        let ticker_handle = tokio::spawn(run_ticker(client.clone(), period, stopped));

        info!(poll_interval_secs = period.as_secs(), "Order monitor started");
        Some(Self {
            client,
            handles: vec![ticker_handle, actor_handle],
            stop: Some(stop),
        })
    }

    /// Forwards a visibility change to the monitor.
    pub async fn visibility_changed(&self, visible: bool) -> Result<Option<PollReport>, WatchError> {
        self.client.visibility_changed(visible).await
    }

    /// Stops the ticker, closes the monitor's channel and waits for both tasks.
    pub async fn stop(mut self) -> Result<(), WatchError> {
        info!("Stopping order monitor...");

        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        drop(self.client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Monitor task failed: {:?}", e);
                return Err(WatchError::TaskFailed(e.to_string()));
            }
        }

        info!("Order monitor stopped.");
        Ok(())
    }
}

async fn run_ticker(client: MonitorClient, period: Duration, mut stopped: oneshot::Receiver<()>) {
    tokio::select! {
        biased;
        _ = &mut stopped => return,
        result = client.poll_now(PollTrigger::Startup) => log_poll(result),
    }

    let Some(first_tick) = Instant::now().checked_add(period) else {
        warn!(
            poll_interval_secs = period.as_secs(),
            "Poll interval out of range, only the startup poll runs"
        );
        let _ = stopped.await;
        return;
    };
    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut stopped => break,
            _ = ticker.tick() => log_poll(client.poll_now(PollTrigger::Interval).await),
        }
    }
    debug!("Poll ticker stopped");
}

fn log_poll(result: Result<PollReport, WatchError>) {
    match result {
        Ok(report) => debug!(?report, "Scheduled poll finished"),
        Err(e) => warn!(error = %e, "Scheduled poll not delivered"),
    }
}
