//! # Monitor Client
//!
//! The handle for talking to a running [`MonitorActor`](crate::MonitorActor).

use crate::error::WatchError;
use crate::message::{MonitorRequest, Response};
use crate::state::{MonitorSnapshot, PollReport, PollTrigger};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// A cloneable, async handle to the monitor.
///
/// It only holds a channel sender, so cloning is cheap. The monitor stops once
/// the last clone is dropped.
#[derive(Clone)]
pub struct MonitorClient {
    sender: mpsc::Sender<MonitorRequest>,
}

impl MonitorClient {
    pub fn new(sender: mpsc::Sender<MonitorRequest>) -> Self {
        Self { sender }
    }

    /// Runs one poll and waits for its report.
    #[instrument(skip(self))]
    pub async fn poll_now(&self, trigger: PollTrigger) -> Result<PollReport, WatchError> {
        debug!("Sending request");
        self.request(|respond_to| MonitorRequest::Poll {
            trigger,
            respond_to,
        })
        .await
    }

    /// Reports a visibility change. Returns the report of the poll it
    /// triggered, or `None` when the last check is still fresh.
    #[instrument(skip(self))]
    pub async fn visibility_changed(&self, visible: bool) -> Result<Option<PollReport>, WatchError> {
        debug!("Sending request");
        self.request(|respond_to| MonitorRequest::Visibility {
            visible,
            respond_to,
        })
        .await
    }

    /// Closes the visible alert. Returns `false` if none was shown.
    #[instrument(skip(self))]
    pub async fn dismiss_alert(&self) -> Result<bool, WatchError> {
        self.request(|respond_to| MonitorRequest::DismissAlert { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn view_all(&self) -> Result<(), WatchError> {
        self.request(|respond_to| MonitorRequest::ViewAll { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<MonitorSnapshot, WatchError> {
        self.request(|respond_to| MonitorRequest::Snapshot { respond_to })
            .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> MonitorRequest,
    ) -> Result<T, WatchError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| WatchError::ActorClosed)?;
        response.await.map_err(|_| WatchError::ActorDropped)?
    }
}
