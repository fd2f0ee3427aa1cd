use super::{ConnectionState, PrimaryStore};
use crate::clients::{ActorClient, OrderClient, ReviewClient, ServiceClient};
use crate::domain::{
    Order, OrderDraft, OrderStatus, PaymentStatus, Review, ReviewCreate, Service, ServiceCreate,
    ServicePatch,
};
use crate::error::StoreError;
use async_trait::async_trait;
use tracing::{instrument, warn};

/// Primary store backed by the in-process resource actors.
///
/// While the connection state reads disconnected every call fails with
/// [`StoreError::Unavailable`] without reaching the actors. A closed actor
/// mailbox flips the state to disconnected.
#[derive(Clone)]
pub struct ActorStore {
    services: ServiceClient,
    orders: OrderClient,
    reviews: ReviewClient,
    connection: ConnectionState,
}

impl ActorStore {
    pub fn new(
        services: ServiceClient,
        orders: OrderClient,
        reviews: ReviewClient,
        connection: ConnectionState,
    ) -> Self {
        Self {
            services,
            orders,
            reviews,
            connection,
        }
    }

    fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.connection.is_connected() {
            Ok(())
        } else {
            Err(StoreError::Unavailable("not connected".to_string()))
        }
    }

    fn observe<T>(&self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if let Err(StoreError::Unavailable(reason)) = &result {
            warn!(%reason, "Lost primary store connection");
            self.connection.mark_disconnected();
        }
        result
    }
}

#[async_trait]
impl PrimaryStore for ActorStore {
    fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    #[instrument(skip(self))]
    async fn find_services(&self) -> Result<Vec<Service>, StoreError> {
        self.ensure_connected()?;
        self.observe(self.services.list().await)
    }

    #[instrument(skip(self))]
    async fn find_service(&self, id: &str) -> Result<Option<Service>, StoreError> {
        self.ensure_connected()?;
        self.observe(self.services.get(id.to_string()).await)
    }

    async fn create_service(&self, params: ServiceCreate) -> Result<Service, StoreError> {
        self.ensure_connected()?;
        self.observe(self.services.create_service(params).await)
    }

    async fn update_service(&self, id: &str, patch: ServicePatch) -> Result<Service, StoreError> {
        self.ensure_connected()?;
        self.observe(self.services.update_service(id.to_string(), patch).await)
    }

    #[instrument(skip(self))]
    async fn delete_service(&self, id: &str) -> Result<(), StoreError> {
        self.ensure_connected()?;
        self.observe(self.services.delete(id.to_string()).await)
    }

    async fn record_rating(&self, id: &str, average: f64, count: u32) -> Result<Service, StoreError> {
        self.ensure_connected()?;
        self.observe(self.services.record_rating(id.to_string(), average, count).await)
    }

    #[instrument(skip(self))]
    async fn find_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.ensure_connected()?;
        let mut orders = self.observe(self.orders.list().await)?;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        self.ensure_connected()?;
        self.observe(self.orders.create_order(draft).await)
    }

    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, StoreError> {
        self.ensure_connected()?;
        self.observe(self.orders.set_status(id.to_string(), status).await)
    }

    async fn confirm_payment(
        &self,
        id: &str,
        payment_status: PaymentStatus,
        transaction_id: String,
    ) -> Result<Order, StoreError> {
        self.ensure_connected()?;
        self.observe(
            self.orders
                .confirm_payment(id.to_string(), payment_status, transaction_id)
                .await,
        )
    }

    #[instrument(skip(self))]
    async fn delete_order(&self, id: &str) -> Result<(), StoreError> {
        self.ensure_connected()?;
        self.observe(self.orders.delete(id.to_string()).await)
    }

    #[instrument(skip(self))]
    async fn find_reviews(&self, service_id: &str) -> Result<Vec<Review>, StoreError> {
        self.ensure_connected()?;
        let mut reviews: Vec<Review> = self
            .observe(self.reviews.list().await)?
            .into_iter()
            .filter(|review| review.service_id == service_id)
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn create_review(&self, params: ReviewCreate) -> Result<Review, StoreError> {
        self.ensure_connected()?;
        self.observe(self.reviews.create_review(params).await)
    }
}
