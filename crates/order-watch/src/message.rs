//! # Monitor Messages
//!
//! Requests sent from [`MonitorClient`](crate::MonitorClient) to
//! [`MonitorActor`](crate::MonitorActor). Each carries a oneshot sender for
//! the reply.

use crate::error::WatchError;
use crate::state::{MonitorSnapshot, PollReport, PollTrigger};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the monitor.
pub type Response<T> = oneshot::Sender<Result<T, WatchError>>;

#[derive(Debug)]
pub enum MonitorRequest {
    Poll {
        trigger: PollTrigger,
        respond_to: Response<PollReport>,
    },
    /// Page/tab visibility changed. Replies with the report of the poll it
    /// triggered, if any.
    Visibility {
        visible: bool,
        respond_to: Response<Option<PollReport>>,
    },
    DismissAlert {
        respond_to: Response<bool>,
    },
    ViewAll {
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<MonitorSnapshot>,
    },
}
