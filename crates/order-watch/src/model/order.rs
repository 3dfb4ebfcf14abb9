use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Lifecycle status reported by the admin backend.
///
/// Only the first three variants mean an admin has to look at the order.
/// Anything else the backend sends (`shipped`, `closed`, ...) lands in
/// [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Active,
    Pending,
    PendingProfit,
    Other(String),
}

impl OrderStatus {
    /// Whether an order in this status counts towards the pending flag.
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            OrderStatus::Active | OrderStatus::Pending | OrderStatus::PendingProfit
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Active => "active",
            OrderStatus::Pending => "pending",
            OrderStatus::PendingProfit => "pending_profit",
            OrderStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "active" => OrderStatus::Active,
            "pending" => OrderStatus::Pending,
            "pending_profit" => OrderStatus::PendingProfit,
            other => OrderStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        OrderStatus::from(raw.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The account that placed an order. Only the email is shown to admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderUser {
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
}

/// Entry price as the backend sends it: sometimes a number, sometimes a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryPrice {
    Number(f64),
    Text(String),
}

impl EntryPrice {
    /// Zero and the empty string are treated as "no price".
    pub fn is_blank(&self) -> bool {
        match self {
            EntryPrice::Number(n) => *n == 0.0 || n.is_nan(),
            EntryPrice::Text(s) => s.is_empty(),
        }
    }
}

impl Display for EntryPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryPrice::Number(n) => write!(f, "{}", n),
            EntryPrice::Text(s) => f.write_str(s),
        }
    }
}

/// An order as listed by `GET /api/admin/orders`.
///
/// `status` decides whether the order is pending. The other fields only feed
/// the alert preview, so they are parsed leniently: a field of the wrong
/// type becomes `None` instead of rejecting the whole order. A number or
/// boolean in a text field is kept as its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<OrderUser>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ticker: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub entry_price: Option<EntryPrice>,
}

impl Order {
    pub fn new(status: impl Into<OrderStatus>) -> Self {
        Self {
            status: Some(status.into()),
            user: None,
            ticker: None,
            entry_price: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user = Some(OrderUser {
            email: Some(email.into()),
        });
        self
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    pub fn with_entry_price(mut self, price: EntryPrice) -> Self {
        self.entry_price = Some(price);
        self
    }

    pub fn needs_attention(&self) -> bool {
        self.status.as_ref().is_some_and(OrderStatus::needs_attention)
    }

    pub fn email(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .filter(|e| !e.is_empty())
    }

    pub fn ticker(&self) -> Option<&str> {
        self.ticker.as_deref().filter(|t| !t.is_empty())
    }

    pub fn entry_price(&self) -> Option<&EntryPrice> {
        self.entry_price.as_ref().filter(|p| !p.is_blank())
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but numbers and booleans are kept as their text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
