//! Extraction of order lists from the admin API's response envelopes.
//!
//! The backend has answered `GET /api/admin/orders` with three layouts over
//! time, all of which are accepted:
//!
//! 1. `{ "success": true, "data": { "orders": [...] } }`
//! 2. `{ "success": true, "data": [...] }`
//! 3. `[...]`
//!
//! Anything else yields no orders. It is logged, never raised.

use crate::model::Order;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Which envelope layout a response body matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnvelopeShape {
    NestedOrders,
    DataArray,
    BareArray,
    Unrecognized,
}

/// Orders found in a response body, after null and malformed entries are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedOrders {
    pub shape: EnvelopeShape,
    /// Number of raw entries in the matched array, including the dropped ones.
    pub raw_len: usize,
    pub orders: Vec<Order>,
}

impl ExtractedOrders {
    /// Orders whose status counts towards the pending flag.
    pub fn pending(&self) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|order| order.needs_attention())
            .cloned()
            .collect()
    }
}

/// Finds the order array in `body` and parses its entries.
pub fn extract_orders(body: &Value) -> ExtractedOrders {
    let (shape, entries) = locate(body);
    let raw_len = entries.map_or(0, Vec::len);
    let orders = entries
        .into_iter()
        .flatten()
        .filter_map(parse_entry)
        .collect();

    ExtractedOrders {
        shape,
        raw_len,
        orders,
    }
}

fn locate(body: &Value) -> (EnvelopeShape, Option<&Vec<Value>>) {
    if let Value::Array(entries) = body {
        return (EnvelopeShape::BareArray, Some(entries));
    }

    if !body.get("success").is_some_and(is_truthy) {
        return (EnvelopeShape::Unrecognized, None);
    }

    match body.get("data") {
        Some(Value::Array(entries)) => (EnvelopeShape::DataArray, Some(entries)),
        Some(data) => match data.get("orders") {
            Some(Value::Array(entries)) => (EnvelopeShape::NestedOrders, Some(entries)),
            _ => (EnvelopeShape::Unrecognized, None),
        },
        None => (EnvelopeShape::Unrecognized, None),
    }
}

fn parse_entry(entry: &Value) -> Option<Order> {
    if !entry.is_object() {
        debug!(?entry, "Skipping non-object order entry");
        return None;
    }
    match serde_json::from_value::<Order>(entry.clone()) {
        Ok(order) if order.status.is_some() => Some(order),
        Ok(_) => {
            debug!("Skipping order without status");
            None
        }
        Err(e) => {
            debug!(error = %e, "Skipping malformed order");
            None
        }
    }
}

/// JavaScript-style truthiness, which is how the backend's `success` flag has been read.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
