//! # Logging Setup
//!
//! The watcher logs through `tracing`. Poll outcomes carry structured fields
//! (`trigger`, `shape`, `pending`, `transition`) so a compact line says what
//! happened:
//!
//! ```text
//! 2026-10-17T09:30:00.000000Z  INFO Poll completed trigger=Interval shape=NestedOrders listed=4 pending=2 transition=Raised
//! ```
//!
//! Poll events come from the monitor task, so they carry no client span prefix.
//! `RUST_LOG` overrides the default `info` level, e.g. `RUST_LOG=debug`.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    compact_subscriber(filter, std::io::stdout, true).init();
}

/// The compact, target-less format used by the binary, writing to `writer`.
pub fn compact_subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .compact()
        .finish()
}
