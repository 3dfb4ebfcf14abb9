//! HTTP implementation of [`OrderSource`] against the admin backend.

use async_trait::async_trait;
use order_watch::{OrderSource, WatchError};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const ORDERS_PATH: &str = "/api/admin/orders";

/// Fetches `GET {base}/api/admin/orders?status=active` with a bearer token.
#[derive(Clone)]
pub struct HttpOrderSource {
    http: Client,
    endpoint: String,
}

impl HttpOrderSource {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, WatchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WatchError::source_error)?;
        Ok(Self {
            http,
            endpoint: orders_endpoint(server_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn orders_endpoint(server_url: &str) -> String {
    format!("{}{ORDERS_PATH}", server_url.trim_end_matches('/'))
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    #[instrument(skip(self, token), fields(endpoint = %self.endpoint))]
    async fn fetch_active_orders(&self, token: &str) -> Result<Value, WatchError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("status", "active")])
            .bearer_auth(token)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(WatchError::source_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::UnexpectedStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(WatchError::source_error)?;
        debug!(%status, "Order listing received");
        Ok(body)
    }
}
