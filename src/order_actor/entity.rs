use super::actions::OrderAction;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderDraft, OrderOrigin};
use chrono::Utc;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderDraft;
    type Patch = (); // Mutations go through actions
    type Action = OrderAction;
    type ActionResult = Order;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a primary-store order with status `new`.
    fn from_create_params(id: String, params: OrderDraft) -> Result<Self, String> {
        if params.service_ids.is_empty() {
            return Err("At least one service must be selected".to_string());
        }
        Ok(Order::from_draft(id, params, OrderOrigin::Primary))
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, String> {
        match action {
            OrderAction::SetStatus(status) => {
                if !status.is_admin_settable() {
                    return Err(format!("Invalid order status: {}", status));
                }
                self.status = status;
            }
            OrderAction::ConfirmPayment {
                payment_status,
                transaction_id,
            } => {
                self.payment_status = payment_status;
                self.transaction_id = Some(transaction_id);
            }
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderStatus, PaymentMethod, PaymentStatus};

    fn draft(service_ids: Vec<String>) -> OrderDraft {
        OrderDraft {
            user_name: "Mona".into(),
            user_phone: "01112345678".into(),
            user_address: "5 Nile Corniche, Giza".into(),
            user_email: None,
            service_ids,
            payment_method: PaymentMethod::Cash,
            total_amount: 200.0,
            order_date: Utc::now(),
        }
    }

    #[test]
    fn test_order_requires_a_service() {
        assert!(Order::from_create_params("ord_1".into(), draft(vec![])).is_err());
        let order = Order::from_create_params("ord_1".into(), draft(vec!["svc_1".into()])).unwrap();
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.origin, OrderOrigin::Primary);
    }

    #[test]
    fn test_status_and_payment_actions() {
        let mut order = Order::from_create_params("ord_1".into(), draft(vec!["svc_1".into()])).unwrap();

        let updated = order.handle_action(OrderAction::SetStatus(OrderStatus::Completed)).unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);
        assert!(order
            .handle_action(OrderAction::SetStatus(OrderStatus::NewLocal))
            .is_err());

        let paid = order
            .handle_action(OrderAction::ConfirmPayment {
                payment_status: PaymentStatus::Paid,
                transaction_id: "TXN-1".into(),
            })
            .unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.transaction_id.as_deref(), Some("TXN-1"));
    }
}
