//! Persistence tiers.
//!
//! [`PrimaryStore`] is the document store the application is designed around;
//! [`FallbackStore`] only receives orders while the primary store is
//! unreachable.

mod actor_store;
mod fallback;

pub use actor_store::ActorStore;
pub use fallback::{FallbackLocation, FallbackStore, JsonFileStore};

use crate::domain::{
    Order, OrderDraft, OrderStatus, PaymentStatus, Review, ReviewCreate, Service, ServiceCreate,
    ServicePatch,
};
use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Last-known state of the primary store connection.
///
/// The store client flips it as it observes its own connection. No
/// background health check runs.
#[derive(Debug, Clone)]
pub struct ConnectionState {
    connected: Arc<AtomicBool>,
}

impl ConnectionState {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: Arc::new(AtomicBool::new(connected)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub fn mark_connected(&self) {
        self.connected.store(true, Ordering::Release);
    }

    pub fn mark_disconnected(&self) {
        self.connected.store(false, Ordering::Release);
    }
}

/// CRUD surface of the primary document store.
#[async_trait]
pub trait PrimaryStore: Send + Sync {
    fn is_connected(&self) -> bool;

    async fn find_services(&self) -> Result<Vec<Service>, StoreError>;
    async fn find_service(&self, id: &str) -> Result<Option<Service>, StoreError>;
    async fn create_service(&self, params: ServiceCreate) -> Result<Service, StoreError>;
    async fn update_service(&self, id: &str, patch: ServicePatch) -> Result<Service, StoreError>;
    async fn delete_service(&self, id: &str) -> Result<(), StoreError>;
    async fn record_rating(&self, id: &str, average: f64, count: u32) -> Result<Service, StoreError>;

    /// Newest first by order date.
    async fn find_orders(&self) -> Result<Vec<Order>, StoreError>;
    async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError>;
    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, StoreError>;
    async fn confirm_payment(
        &self,
        id: &str,
        payment_status: PaymentStatus,
        transaction_id: String,
    ) -> Result<Order, StoreError>;
    async fn delete_order(&self, id: &str) -> Result<(), StoreError>;

    /// Newest first.
    async fn find_reviews(&self, service_id: &str) -> Result<Vec<Review>, StoreError>;
    async fn create_review(&self, params: ReviewCreate) -> Result<Review, StoreError>;
}
