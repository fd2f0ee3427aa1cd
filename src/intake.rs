//! Order intake: validation, the primary → durable → in-memory persistence
//! cascade, and best-effort notifications.

use crate::catalog::substitute_price;
use crate::domain::{Order, OrderDraft, OrderOrigin, OrderSubmission};
use crate::error::{OrderError, StoreError};
use crate::notify::{Notification, Notifier};
use crate::store::{FallbackStore, PrimaryStore};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Total used when service prices cannot be resolved.
pub const PLACEHOLDER_TOTAL: f64 = 100.0;

const MIN_NAME_CHARS: usize = 2;
const MIN_ADDRESS_CHARS: usize = 10;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(010|011|012|015)[0-9]{8}$").expect("phone pattern compiles"));
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$")
        .expect("email pattern compiles")
});

/// Orders from every tier, newest first.
#[derive(Debug, Clone)]
pub struct OrderListing {
    pub orders: Vec<Order>,
    /// Set when the primary store could not be read; only local records are
    /// included then.
    pub degraded: bool,
}

#[derive(Clone)]
pub struct OrderIntake {
    store: Arc<dyn PrimaryStore>,
    fallback: Arc<dyn FallbackStore>,
    notifier: Arc<dyn Notifier>,
    operator_email: String,
}

impl OrderIntake {
    pub fn new(
        store: Arc<dyn PrimaryStore>,
        fallback: Arc<dyn FallbackStore>,
        notifier: Arc<dyn Notifier>,
        operator_email: impl Into<String>,
    ) -> Self {
        Self {
            store,
            fallback,
            notifier,
            operator_email: operator_email.into(),
        }
    }

    /// Accepts a booking. Only invalid input is reported as an error; storage
    /// failures are absorbed and visible solely through the order's origin
    /// and status.
    #[instrument(skip(self, submission))]
    pub async fn submit_order(&self, submission: OrderSubmission) -> Result<Order, OrderError> {
        let draft = validate(submission)?;
        let order = self.persist(draft).await;
        info!(order_id = %order.id, origin = %order.origin, status = %order.status, "Order accepted");
        self.notify(&order).await;
        Ok(order)
    }

    /// Tries each tier once, in order.
    async fn persist(&self, draft: OrderDraft) -> Order {
        let primary_error = match self.try_primary(draft.clone()).await {
            Ok(order) => return order,
            Err(e) => e,
        };
        warn!(error = %primary_error, "Primary store unavailable for order, using durable fallback");

        let draft = OrderDraft {
            total_amount: fallback_total(&draft.service_ids),
            ..draft
        };
        let fallback_error = match self.fallback.append(draft.clone()).await {
            Ok(order) => return order,
            Err(e) => e,
        };
        error!(error = %fallback_error, "Durable fallback failed, order exists in memory only");

        Order::emergency(draft)
    }

    async fn try_primary(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        if !self.store.is_connected() {
            return Err(StoreError::Unavailable("not connected".to_string()));
        }
        let total_amount = self.primary_total(&draft.service_ids).await;
        self.store
            .create_order(OrderDraft { total_amount, ..draft })
            .await
    }

    async fn primary_total(&self, service_ids: &[String]) -> f64 {
        let mut total = 0.0;
        let mut resolved = 0;
        for id in service_ids {
            match self.store.find_service(id).await {
                Ok(Some(service)) => {
                    total += service.price;
                    resolved += 1;
                }
                Ok(None) => debug!(service_id = %id, "Ordered service not in catalog"),
                Err(e) => {
                    warn!(error = %e, "Service price lookup failed, using placeholder total");
                    return PLACEHOLDER_TOTAL;
                }
            }
        }
        if resolved == 0 {
            PLACEHOLDER_TOTAL
        } else {
            total
        }
    }

    async fn notify(&self, order: &Order) {
        for notification in order_notifications(order, &self.operator_email) {
            if let Err(e) = self.notifier.send(&notification).await {
                warn!(error = %e, to = %notification.to, "Order notification failed");
            }
        }
    }

    /// Primary orders (when readable) merged with durable fallback records.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> OrderListing {
        let (mut orders, degraded) = match self.store.find_orders().await {
            Ok(orders) => (orders, false),
            Err(e) => {
                warn!(error = %e, "Order listing from primary store failed");
                (Vec::new(), true)
            }
        };
        orders.extend(self.fallback.list_all().await);
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        debug!(order_count = orders.len(), degraded, "Listed orders");
        OrderListing { orders, degraded }
    }
}

/// Checks every field and reports all problems at once.
pub fn validate(submission: OrderSubmission) -> Result<OrderDraft, OrderError> {
    let mut problems = Vec::new();

    let user_name = required(submission.user_name, "user_name", &mut problems);
    if !user_name.is_empty() && user_name.chars().count() < MIN_NAME_CHARS {
        problems.push(format!("user_name must be at least {} characters", MIN_NAME_CHARS));
    }

    let user_phone = required(submission.user_phone, "user_phone", &mut problems);
    if !user_phone.is_empty() && !PHONE_PATTERN.is_match(&user_phone) {
        problems.push("user_phone must be 010/011/012/015 followed by 8 digits".to_string());
    }

    let user_address = required(submission.user_address, "user_address", &mut problems);
    if !user_address.is_empty() && user_address.chars().count() < MIN_ADDRESS_CHARS {
        problems.push(format!("user_address must be at least {} characters", MIN_ADDRESS_CHARS));
    }

    let user_email = submission
        .user_email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty());
    if let Some(email) = &user_email {
        if !EMAIL_PATTERN.is_match(email) {
            problems.push("user_email is not a valid address".to_string());
        }
    }

    let service_ids: Vec<String> = submission
        .service_ids
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    if service_ids.is_empty() {
        problems.push("at least one service is required".to_string());
    }

    if !problems.is_empty() {
        return Err(OrderError::ValidationError(problems.join("; ")));
    }

    Ok(OrderDraft {
        user_name,
        user_phone,
        user_address,
        user_email,
        service_ids,
        payment_method: submission.payment_method.unwrap_or_default(),
        total_amount: PLACEHOLDER_TOTAL,
        order_date: Utc::now(),
    })
}

fn required(value: Option<String>, field: &str, problems: &mut Vec<String>) -> String {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        problems.push(format!("{} is required", field));
    }
    value
}

/// Prices from the substitute catalog, which is what offline storefronts show.
fn fallback_total(service_ids: &[String]) -> f64 {
    let prices: Vec<f64> = service_ids.iter().filter_map(|id| substitute_price(id)).collect();
    if prices.is_empty() {
        PLACEHOLDER_TOTAL
    } else {
        prices.iter().sum()
    }
}

fn order_notifications(order: &Order, operator_email: &str) -> Vec<Notification> {
    let mut notifications = Vec::with_capacity(2);

    if let Some(email) = &order.user_email {
        notifications.push(Notification {
            to: email.clone(),
            subject: format!("Booking {} received", order.id),
            body: format!(
                "Hello {}, we received your booking for {} service(s). Total: {:.2}. We will call you on {} shortly.",
                order.user_name,
                order.service_ids.len(),
                order.total_amount,
                order.user_phone
            ),
        });
    }

    // Emergency orders are not stored anywhere; the operator must act on the
    // message itself.
    let tag = match order.origin {
        OrderOrigin::Primary => "",
        OrderOrigin::Local => "[LOCAL] ",
        OrderOrigin::Emergency => "[UNSAVED] ",
    };
    notifications.push(Notification {
        to: operator_email.to_string(),
        subject: format!("{}New order {}", tag, order.id),
        body: format!(
            "Customer: {}\nPhone: {}\nAddress: {}\nServices: {}\nTotal: {:.2}\nPayment: {:?}\nStatus: {}",
            order.user_name,
            order.user_phone,
            order.user_address,
            order.service_ids.join(", "),
            order.total_amount,
            order.payment_method,
            order.status
        ),
    });

    notifications
}
