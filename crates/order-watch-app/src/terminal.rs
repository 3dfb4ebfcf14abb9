//! A [`Notifier`] that renders alerts and the badge on the terminal.

use order_watch::{AlertView, Badge, Notifier};
use std::io::{self, Write};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl Notifier for TerminalNotifier {
    fn show_alert(&self, alert: &AlertView) {
        info!(alert_id = alert.alert_id, total = alert.total, "Showing alert");
        self.emit(&format!("\n{alert}\n"));
    }

    fn remove_alert(&self, alert_id: u64) {
        info!(alert_id, "Alert closed");
    }

    fn play_sound(&self) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }

    fn set_badge(&self, badge: &Badge) {
        self.emit(&format!("[badge {}] {}", badge.label, badge.title));
    }

    fn clear_badge(&self) {
        self.emit("[badge cleared]");
    }

    fn open_orders_page(&self, target: &str) {
        info!(page = target, "Opening orders page");
        self.emit(&format!("Open {target} to review pending orders"));
    }
}
