use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderDraft, OrderStatus, PaymentStatus};
use crate::error::StoreError;
use crate::order_actor::OrderAction;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_actor_client!(OrderClient, Order);

impl OrderClient {
    #[instrument(skip(self, draft), fields(service_count = draft.service_ids.len()))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        debug!("Sending request");
        let order = self.inner.create(draft).await?;
        info!(order_id = %order.id, total = order.total_amount, "Order stored");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: String, status: OrderStatus) -> Result<Order, StoreError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, OrderAction::SetStatus(status)).await?)
    }

    #[instrument(skip(self))]
    pub async fn confirm_payment(
        &self,
        id: String,
        payment_status: PaymentStatus,
        transaction_id: String,
    ) -> Result<Order, StoreError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(
                id,
                OrderAction::ConfirmPayment {
                    payment_status,
                    transaction_id,
                },
            )
            .await?)
    }
}
