use std::time::Duration;

/// Page the alert's "view all" action and the badge point at.
pub const ORDERS_PAGE: &str = "trading-management.html";

/// Timing and presentation knobs for the monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSettings {
    /// Period of the scheduled poll.
    pub poll_interval: Duration,
    /// A regained-visibility event polls only if the last check is older than this.
    pub stale_after: Duration,
    /// How long an alert stays up unless dismissed.
    pub alert_ttl: Duration,
    /// Orders shown in an alert before collapsing into "+N more".
    pub preview_limit: usize,
    /// Largest count a badge shows verbatim.
    pub badge_cap: usize,
    pub view_all_target: String,
    /// Capacity of the monitor's request channel.
    pub channel_capacity: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30 * 60),
            stale_after: Duration::from_secs(30 * 60),
            alert_ttl: Duration::from_secs(5 * 60),
            preview_limit: 3,
            badge_cap: 99,
            view_all_target: ORDERS_PAGE.to_string(),
            channel_capacity: 32,
        }
    }
}
