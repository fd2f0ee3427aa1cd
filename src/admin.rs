//! Operator moderation of the catalog and stored orders, plus the simulated
//! payment confirmation.
//!
//! Everything here talks to the primary store only. Ids issued by the
//! fallback tiers are refused up front, and store failures are returned to
//! the caller rather than absorbed.

use crate::domain::{Order, OrderOrigin, OrderStatus, PaymentStatus, Service, ServiceCreate, ServicePatch};
use crate::error::StoreError;
use crate::store::PrimaryStore;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Body of a payment confirmation; both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfirmation {
    pub payment_status: Option<PaymentStatus>,
    pub transaction_id: Option<String>,
}

#[derive(Clone)]
pub struct AdminDesk {
    store: Arc<dyn PrimaryStore>,
}

fn ensure_primary_order(id: &str) -> Result<(), StoreError> {
    match OrderOrigin::from_id(id) {
        Some(origin @ (OrderOrigin::Local | OrderOrigin::Emergency)) => Err(StoreError::Validation(format!(
            "Order '{}' was saved by the {} fallback and cannot be changed until it is re-entered",
            id, origin
        ))),
        _ => Ok(()),
    }
}

impl AdminDesk {
    pub fn new(store: Arc<dyn PrimaryStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, params), fields(service_name = %params.name))]
    pub async fn create_service(&self, params: ServiceCreate) -> Result<Service, StoreError> {
        let service = self.store.create_service(params).await?;
        info!(service_id = %service.id, "Service created");
        Ok(service)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_service(&self, id: &str, patch: ServicePatch) -> Result<Service, StoreError> {
        self.store.update_service(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete_service(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete_service(id).await?;
        info!("Service deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, StoreError> {
        if !status.is_admin_settable() {
            return Err(StoreError::Validation(format!(
                "Status '{}' cannot be set by an operator",
                status
            )));
        }
        ensure_primary_order(id)?;
        let order = self.store.set_order_status(id, status).await?;
        info!(order_id = %order.id, status = %order.status, "Order status changed");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: &str) -> Result<(), StoreError> {
        ensure_primary_order(id)?;
        self.store.delete_order(id).await?;
        info!("Order deleted");
        Ok(())
    }

    /// Defaults to `paid` with a `TXN-<millis>` transaction id.
    #[instrument(skip(self, confirmation))]
    pub async fn confirm_payment(
        &self,
        id: &str,
        confirmation: PaymentConfirmation,
    ) -> Result<Order, StoreError> {
        ensure_primary_order(id)?;
        let payment_status = confirmation.payment_status.unwrap_or(PaymentStatus::Paid);
        let transaction_id = confirmation
            .transaction_id
            .filter(|txn| !txn.trim().is_empty())
            .unwrap_or_else(|| format!("TXN-{}", Utc::now().timestamp_millis()));
        let order = self
            .store
            .confirm_payment(id, payment_status, transaction_id)
            .await?;
        info!(order_id = %order.id, payment_status = ?order.payment_status, "Payment confirmed");
        Ok(order)
    }
}
