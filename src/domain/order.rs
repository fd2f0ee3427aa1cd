use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of an order.
///
/// The two `New*` variants beyond [`OrderStatus::New`] mark orders accepted
/// while the primary store was unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "new (local)")]
    NewLocal,
    #[serde(rename = "new (emergency)")]
    NewEmergency,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::NewLocal => "new (local)",
            OrderStatus::NewEmergency => "new (emergency)",
        }
    }

    /// Statuses an operator may move a stored order into.
    pub fn is_admin_settable(&self) -> bool {
        matches!(
            self,
            OrderStatus::New | OrderStatus::InProgress | OrderStatus::Completed | OrderStatus::Cancelled
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Wallet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Which persistence tier accepted an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderOrigin {
    Primary,
    Local,
    Emergency,
}

impl OrderOrigin {
    pub fn id_prefix(&self) -> &'static str {
        match self {
            OrderOrigin::Primary => "ord_",
            OrderOrigin::Local => "local_",
            OrderOrigin::Emergency => "emergency_",
        }
    }

    pub fn initial_status(&self) -> OrderStatus {
        match self {
            OrderOrigin::Primary => OrderStatus::New,
            OrderOrigin::Local => OrderStatus::NewLocal,
            OrderOrigin::Emergency => OrderStatus::NewEmergency,
        }
    }

    /// Issues a fresh identifier carrying this origin's prefix.
    ///
    /// Local identifiers keep the millisecond timestamp so the fallback file
    /// stays readable by hand; the uuid suffix keeps them unique.
    pub fn issue_id(&self) -> String {
        let uuid = Uuid::new_v4().simple().to_string();
        match self {
            OrderOrigin::Primary => format!("{}{}", self.id_prefix(), uuid),
            OrderOrigin::Local | OrderOrigin::Emergency => format!(
                "{}{}_{}",
                self.id_prefix(),
                Utc::now().timestamp_millis(),
                &uuid[..8]
            ),
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        [OrderOrigin::Primary, OrderOrigin::Local, OrderOrigin::Emergency]
            .into_iter()
            .find(|origin| id.starts_with(origin.id_prefix()))
    }
}

impl fmt::Display for OrderOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderOrigin::Primary => "primary",
            OrderOrigin::Local => "local",
            OrderOrigin::Emergency => "emergency",
        };
        f.write_str(label)
    }
}

/// A booking as returned to callers, whichever tier stored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_name: String,
    pub user_phone: String,
    pub user_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(rename = "serviceId")]
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub origin: OrderOrigin,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated order content, ready to be stored by any tier.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub user_name: String,
    pub user_phone: String,
    pub user_address: String,
    pub user_email: Option<String>,
    pub service_ids: Vec<String>,
    pub payment_method: PaymentMethod,
    pub total_amount: f64,
    pub order_date: DateTime<Utc>,
}

impl Order {
    pub fn from_draft(id: impl Into<String>, draft: OrderDraft, origin: OrderOrigin) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_name: draft.user_name,
            user_phone: draft.user_phone,
            user_address: draft.user_address,
            user_email: draft.user_email,
            service_ids: draft.service_ids,
            payment_method: draft.payment_method,
            payment_status: PaymentStatus::Pending,
            transaction_id: None,
            total_amount: draft.total_amount,
            status: origin.initial_status(),
            origin,
            order_date: draft.order_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record that only lives in memory; nothing durable backs it.
    pub fn emergency(draft: OrderDraft) -> Self {
        let origin = OrderOrigin::Emergency;
        Self::from_draft(origin.issue_id(), draft, origin)
    }
}

/// Raw booking request as posted by the storefront.
///
/// Every field is optional here so that missing input surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderSubmission {
    #[serde(default, alias = "name")]
    pub user_name: Option<String>,
    #[serde(default, alias = "phone")]
    pub user_phone: Option<String>,
    #[serde(default, alias = "address")]
    pub user_address: Option<String>,
    #[serde(default, alias = "email")]
    pub user_email: Option<String>,
    #[serde(default, rename = "serviceId", alias = "service_id", deserialize_with = "one_or_many")]
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// Accepts `"svc1"`, `["svc1", "svc2"]` or `null`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(id)) => vec![id],
        Some(OneOrMany::Many(ids)) => ids,
        None => Vec::new(),
    })
}
