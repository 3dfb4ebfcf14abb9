//! # Notifier
//!
//! The monitor never draws anything itself. Every visible effect goes through
//! the [`Notifier`] trait: alerts, the alert sound, the navigation badge and
//! the "view all" navigation. The app crate renders to a terminal. Tests
//! record the calls with [`RecordingNotifier`](crate::mock::RecordingNotifier).

use crate::model::Order;
use serde::Serialize;
use std::fmt::Display;

/// Sink for the monitor's side effects.
///
/// Methods are synchronous and must not block for long: they run inside the
/// monitor's message loop.
pub trait Notifier: Send + Sync {
    /// Shows `alert`. The monitor removes any previous alert first.
    fn show_alert(&self, alert: &AlertView);

    /// Removes the alert with `alert_id` if it is still shown.
    fn remove_alert(&self, alert_id: u64);

    fn play_sound(&self);

    /// Attaches or replaces the pending-orders badge.
    fn set_badge(&self, badge: &Badge);

    fn clear_badge(&self);

    /// Navigates to the full order list.
    fn open_orders_page(&self, target: &str);
}

/// Count indicator attached to the orders navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub count: usize,
    pub label: String,
    pub title: String,
}

impl Badge {
    /// Builds the badge for `count`, capping the label at `cap` (shown as `"{cap}+"`).
    pub fn for_count(count: usize, cap: usize) -> Self {
        let label = if count > cap {
            format!("{}+", cap)
        } else {
            count.to_string()
        };
        Self {
            count,
            label,
            title: format!("{} pending order(s)", count),
        }
    }
}

/// One summary line of an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPreview {
    pub user: String,
    pub symbol: String,
    pub amount: String,
}

impl From<&Order> for OrderPreview {
    fn from(order: &Order) -> Self {
        Self {
            user: order.email().unwrap_or("Unknown User").to_string(),
            symbol: order.ticker().unwrap_or("N/A").to_string(),
            amount: match order.entry_price() {
                Some(price) => format!("${}", price),
                None => "$N/A".to_string(),
            },
        }
    }
}

/// Rendered content of a pending-orders alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub alert_id: u64,
    pub total: usize,
    pub previews: Vec<OrderPreview>,
    /// Orders beyond the preview limit.
    pub hidden: usize,
    pub view_all_target: String,
}

impl AlertView {
    pub fn new(alert_id: u64, orders: &[Order], preview_limit: usize, view_all_target: &str) -> Self {
        let previews: Vec<OrderPreview> = orders
            .iter()
            .take(preview_limit)
            .map(OrderPreview::from)
            .collect();
        Self {
            alert_id,
            total: orders.len(),
            hidden: orders.len() - previews.len(),
            previews,
            view_all_target: view_all_target.to_string(),
        }
    }

    pub fn headline(&self) -> &'static str {
        "Pending Orders Alert"
    }

    pub fn summary(&self) -> String {
        format!("{} pending order(s) require attention", self.total)
    }
}

impl Display for AlertView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.headline())?;
        writeln!(f, "{}", self.summary())?;
        for preview in &self.previews {
            writeln!(f, "  {}  {}  {}", preview.user, preview.symbol, preview.amount)?;
        }
        if self.hidden > 0 {
            writeln!(f, "+{} more orders...", self.hidden)?;
        }
        write!(f, "View all: {}", self.view_all_target)
    }
}
