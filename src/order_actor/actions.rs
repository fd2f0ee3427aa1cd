use crate::domain::{OrderStatus, PaymentStatus};

/// Custom actions for Order documents.
///
/// Both return the updated order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Moves the order to an operator-settable status.
    SetStatus(OrderStatus),
    /// Records the outcome of a (simulated) payment.
    ConfirmPayment {
        payment_status: PaymentStatus,
        transaction_id: String,
    },
}
