//! Presentation seam for cart failures.
//!
//! The cart store returns typed errors and knows nothing about how they are
//! surfaced. The UI layer maps an (operation, error) pair to one of a fixed
//! set of user-facing messages via [`failure_message`] and delivers it
//! through a [`Notifier`] — fire-and-forget, no return value.

use crate::cart::CartError;

/// Which cart operation a failure came from.
///
/// The same error kind is worded differently depending on the operation
/// (a catalog outage while adding reads "Error adding product", while
/// updating reads "Error changing product quantity").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
    Add,
    Remove,
    UpdateAmount,
}

/// Map a cart failure to its fixed user-facing message.
#[must_use]
pub fn failure_message(op: CartOp, error: &CartError) -> &'static str {
    match error {
        CartError::OutOfStock { .. } => "Requested quantity out of stock",
        _ => match op {
            CartOp::Add => "Error adding product",
            CartOp::Remove => "Error removing product",
            CartOp::UpdateAmount => "Error changing product quantity",
        },
    }
}

/// Receives user-facing failure messages for display.
pub trait Notifier {
    /// Deliver a message to the user. Fire-and-forget.
    fn notify(&self, message: &str);
}

/// Notifier that emits messages as `tracing` warnings.
///
/// Stand-in for a toast/banner in environments without a UI surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(%message, "cart notification");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    #[test]
    fn out_of_stock_has_the_same_message_for_every_operation() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(3),
        };
        for op in [CartOp::Add, CartOp::Remove, CartOp::UpdateAmount] {
            assert_eq!(failure_message(op, &err), "Requested quantity out of stock");
        }
    }

    #[test]
    fn other_failures_are_worded_per_operation() {
        let err = CartError::NotInCart {
            product_id: ProductId::new(9),
        };
        assert_eq!(failure_message(CartOp::Add, &err), "Error adding product");
        assert_eq!(
            failure_message(CartOp::Remove, &err),
            "Error removing product"
        );
        assert_eq!(
            failure_message(CartOp::UpdateAmount, &err),
            "Error changing product quantity"
        );

        let err = CartError::InvalidAmount { amount: 0 };
        assert_eq!(
            failure_message(CartOp::UpdateAmount, &err),
            "Error changing product quantity"
        );
    }
}
