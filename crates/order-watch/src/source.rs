//! # Order Source & Token Store
//!
//! The two seams the monitor depends on for input. They are injected into the
//! actor at `run()` through [`MonitorContext`](crate::MonitorContext):
//!
//! - [`OrderSource`] performs the authenticated listing request and hands back
//!   the raw JSON body. Envelope handling stays in the monitor.
//! - [`TokenStore`] yields the admin token. It is consulted on *every* poll,
//!   so removing the token stops polling without restarting anything.

use crate::error::WatchError;
use async_trait::async_trait;
use serde_json::Value;

/// Fetches the active-order listing from the admin backend.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use order_watch::{OrderSource, WatchError};
/// use serde_json::{json, Value};
///
/// struct Canned;
///
/// #[async_trait]
/// impl OrderSource for Canned {
///     async fn fetch_active_orders(&self, _token: &str) -> Result<Value, WatchError> {
///         Ok(json!({ "success": true, "data": { "orders": [] } }))
///     }
/// }
/// ```
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Issues one `GET /api/admin/orders?status=active` with `token` as bearer.
    ///
    /// Non-2xx responses must come back as [`WatchError::UnexpectedStatus`].
    /// Bodies that are not JSON come back as [`WatchError::Source`].
    async fn fetch_active_orders(&self, token: &str) -> Result<Value, WatchError>;
}

/// Source of the admin credential that gates polling.
pub trait TokenStore: Send + Sync {
    fn admin_token(&self) -> Option<String>;
}

/// A token fixed at construction. `StaticToken(None)` means logged out.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl TokenStore for StaticToken {
    fn admin_token(&self) -> Option<String> {
        self.0.clone().filter(|t| !t.is_empty())
    }
}
