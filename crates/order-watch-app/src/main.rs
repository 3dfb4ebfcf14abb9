//! # Order Watch
//!
//! Watches the admin backend for orders waiting on an admin and raises a
//! terminal alert when some appear.
//!
//! Commands on stdin, one per line:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `focus` | window regained visibility (polls if the last check is stale) |
//! | `blur` | window hidden |
//! | `poll` | poll now |
//! | `dismiss` | close the current alert |
//! | `view` | open the orders page |
//! | `status` | print the monitor snapshot as JSON |
//!
//! Ctrl-C or end of input stops the watcher.

use anyhow::Context;
use order_watch::{MonitorClient, MonitorContext, PollTrigger};
use order_watch_app::config::AppConfig;
use order_watch_app::http_source::HttpOrderSource;
use order_watch_app::lifecycle::{setup_tracing, MonitorSystem};
use order_watch_app::terminal::TerminalNotifier;
use order_watch_app::token::token_store;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = AppConfig::load().context("loading configuration")?;
    let source = HttpOrderSource::new(&config.server_url, config.request_timeout)
        .context("building HTTP client")?;
    info!(endpoint = source.endpoint(), "Order source configured");

    let ctx = MonitorContext {
        source: Arc::new(source),
        notifier: Arc::new(TerminalNotifier::new()),
        tokens: token_store(&config.token_source),
    };

    let Some(system) = MonitorSystem::start(config.settings, ctx) else {
        return Ok(());
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            line = lines.next_line() => match line.context("reading stdin")? {
                Some(line) => run_command(&system, line.trim()).await,
                None => break,
            },
        }
    }

    system.stop().await?;
    Ok(())
}

async fn run_command(system: &MonitorSystem, command: &str) {
    let client: &MonitorClient = &system.client;
    let result = match command {
        "" => Ok(()),
        "focus" => system.visibility_changed(true).await.map(|report| {
            if report.is_none() {
                info!("Last check still fresh, not polling");
            }
        }),
        "blur" => system.visibility_changed(false).await.map(|_| ()),
        "poll" => client
            .poll_now(PollTrigger::Manual)
            .await
            .map(|report| info!(?report, "Manual poll finished")),
        "dismiss" => client.dismiss_alert().await.map(|dismissed| {
            if !dismissed {
                info!("No alert to dismiss");
            }
        }),
        "view" => client.view_all().await,
        "status" => client.snapshot().await.map(|snapshot| {
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(e) => warn!(error = %e, "Could not render snapshot"),
            }
        }),
        other => {
            warn!(command = other, "Unknown command (focus, blur, poll, dismiss, view, status)");
            Ok(())
        }
    };

    if let Err(e) = result {
        warn!(error = %e, command, "Command failed");
    }
}
