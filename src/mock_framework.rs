//! # Mock Framework
//!
//! Utilities for testing in isolation.
//!
//! - [`create_mock_client`] returns a resource client plus the receiver that
//!   stands in for its actor; helpers like [`expect_get`] or [`expect_create`]
//!   pull the next request so a test can answer it (or drop it).
//! - [`FakePrimaryStore`], [`FakeFallbackStore`] and [`RecordingNotifier`]
//!   replace whole tiers and count the calls they receive.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::domain::{
    Order, OrderDraft, OrderOrigin, OrderStatus, PaymentStatus, Rating, Review, ReviewCreate,
    Service, ServiceCreate, ServicePatch,
};
use crate::error::{FallbackError, NotificationError, StoreError};
use crate::notify::{Notification, Notifier};
use crate::store::{FallbackStore, PrimaryStore};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};

type Reply<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Reply<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Reply<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Reply<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

// =============================================================================
// Tier fakes
// =============================================================================

/// In-memory primary store with switchable failures.
#[derive(Default)]
pub struct FakePrimaryStore {
    pub connected: AtomicBool,
    /// `create_order` fails even while connected.
    pub fail_writes: AtomicBool,
    /// `find_service` fails even while connected.
    pub fail_lookups: AtomicBool,
    /// `record_rating` fails even while connected.
    pub fail_ratings: AtomicBool,
    pub create_order_calls: AtomicUsize,
    services: Mutex<Vec<Service>>,
    orders: Mutex<Vec<Order>>,
    reviews: Mutex<Vec<Review>>,
}

impl FakePrimaryStore {
    pub fn connected() -> Self {
        let store = Self::default();
        store.connected.store(true, Ordering::SeqCst);
        store
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn insert_service(&self, service: Service) {
        self.services.lock().unwrap().push(service);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("fake store offline".into()))
        }
    }

    fn with_order(&self, id: &str, apply: impl FnOnce(&mut Order)) -> Result<Order, StoreError> {
        self.check()?;
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        apply(order);
        Ok(order.clone())
    }
}

#[async_trait]
impl PrimaryStore for FakePrimaryStore {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn find_services(&self) -> Result<Vec<Service>, StoreError> {
        self.check()?;
        Ok(self.services.lock().unwrap().clone())
    }

    async fn find_service(&self, id: &str) -> Result<Option<Service>, StoreError> {
        self.check()?;
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("lookup timed out".into()));
        }
        Ok(self.services.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn create_service(&self, params: ServiceCreate) -> Result<Service, StoreError> {
        self.check()?;
        let mut services = self.services.lock().unwrap();
        let mut service = Service::new(
            format!("svc_{}", services.len() + 1),
            params.name,
            params.description,
            params.price,
        );
        service.department_id = params.department_id;
        services.push(service.clone());
        Ok(service)
    }

    async fn update_service(&self, id: &str, patch: ServicePatch) -> Result<Service, StoreError> {
        self.check()?;
        let mut services = self.services.lock().unwrap();
        let service = services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(name) = patch.name {
            service.name = name;
        }
        if let Some(price) = patch.price {
            service.price = price;
        }
        Ok(service.clone())
    }

    async fn delete_service(&self, id: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut services = self.services.lock().unwrap();
        let before = services.len();
        services.retain(|s| s.id != id);
        if services.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn record_rating(&self, id: &str, average: f64, count: u32) -> Result<Service, StoreError> {
        self.check()?;
        if self.fail_ratings.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("rating update timed out".into()));
        }
        let mut services = self.services.lock().unwrap();
        let service = services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        service.rating = Some(Rating { average, count });
        Ok(service.clone())
    }

    async fn find_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.check()?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        self.create_order_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write timed out".into()));
        }
        let origin = OrderOrigin::Primary;
        let order = Order::from_draft(origin.issue_id(), draft, origin);
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, StoreError> {
        self.with_order(id, |order| order.status = status)
    }

    async fn confirm_payment(
        &self,
        id: &str,
        payment_status: PaymentStatus,
        transaction_id: String,
    ) -> Result<Order, StoreError> {
        self.with_order(id, |order| {
            order.payment_status = payment_status;
            order.transaction_id = Some(transaction_id);
        })
    }

    async fn delete_order(&self, id: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| o.id != id);
        if orders.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn find_reviews(&self, service_id: &str) -> Result<Vec<Review>, StoreError> {
        self.check()?;
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews.iter().filter(|r| r.service_id == service_id).cloned().collect())
    }

    async fn create_review(&self, params: ReviewCreate) -> Result<Review, StoreError> {
        self.check()?;
        let mut reviews = self.reviews.lock().unwrap();
        if reviews
            .iter()
            .any(|r| r.service_id == params.service_id && r.user_name == params.user_name)
        {
            return Err(StoreError::Duplicate(params.user_name));
        }
        let review = Review {
            id: format!("rev_{}", reviews.len() + 1),
            service_id: params.service_id,
            user_name: params.user_name,
            rating: params.rating,
            comment: params.comment,
            created_at: Utc::now(),
        };
        reviews.push(review.clone());
        Ok(review)
    }
}

/// Durable tier stand-in that either keeps records in memory or fails every
/// append with an I/O error.
#[derive(Default)]
pub struct FakeFallbackStore {
    fail: bool,
    pub append_calls: AtomicUsize,
    records: Mutex<Vec<Order>>,
}

impl FakeFallbackStore {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl FallbackStore for FakeFallbackStore {
    async fn append(&self, draft: OrderDraft) -> Result<Order, FallbackError> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FallbackError::Io {
                path: "/read-only/orders.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        let origin = OrderOrigin::Local;
        let order = Order::from_draft(origin.issue_id(), draft, origin);
        self.records.lock().unwrap().insert(0, order.clone());
        Ok(order)
    }

    async fn list_all(&self) -> Vec<Order> {
        self.records.lock().unwrap().clone()
    }
}

/// Notifier that records what it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    fail: bool,
    pub attempts: AtomicUsize,
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotificationError::Rejected(503));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ActorClient, ServiceClient};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Service>(10);
        let client = ServiceClient::new(inner);

        let get_task = tokio::spawn(async move { client.get("svc_1".to_string()).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "svc_1");
        responder.send(Ok(None)).unwrap();

        let result = get_task.await.unwrap();
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_dropped_responder_surfaces_as_unavailable() {
        let (inner, mut receiver) = create_mock_client::<Service>(10);
        let client = ServiceClient::new(inner);

        let list_task = tokio::spawn(async move { client.list().await });
        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        drop(responder);

        let result = list_task.await.unwrap();
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
