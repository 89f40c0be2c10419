//! Guards for order transitions

use crate::schemas::{Order, OrderStatus, PaymentMethod};

use super::get_next_status;

/// Why a transition was refused
#[derive(Debug, Clone, PartialEq)]
pub enum BlockReason {
    /// No order is loaded
    NoOrder,
    /// Target is not the single legal next status
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    /// The order is already completed
    Terminal,
    /// No "before" photos taken
    NoPhotosBefore,
    /// Checklist has no items
    EmptyChecklist,
    /// Some checklist items are not completed
    IncompleteChecklist { remaining: usize },
    /// No "after" photos taken
    NoPhotosAfter,
    /// Payment method not chosen
    NoPaymentMethod,
    /// Cash handed over does not cover the amount due
    InsufficientCash { received: Option<f64>, due: f64 },
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::NoOrder => write!(f, "no order loaded"),
            BlockReason::InvalidTransition { from, to } => {
                write!(f, "cannot transition from {} to {}", from, to)
            }
            BlockReason::Terminal => write!(f, "order is already completed"),
            BlockReason::NoPhotosBefore => {
                write!(f, "take at least one photo before starting work")
            }
            BlockReason::EmptyChecklist => write!(f, "checklist is empty"),
            BlockReason::IncompleteChecklist { remaining } => {
                write!(f, "{} checklist item(s) not completed", remaining)
            }
            BlockReason::NoPhotosAfter => write!(f, "take at least one photo after finishing work"),
            BlockReason::NoPaymentMethod => write!(f, "payment method not chosen"),
            BlockReason::InsufficientCash { received, due } => match received {
                Some(received) => write!(f, "cash received {} is less than {} due", received, due),
                None => write!(f, "cash received not entered ({} due)", due),
            },
        }
    }
}

/// Result of a guard check
pub type GuardResult = std::result::Result<(), BlockReason>;

/// Guard for in_progress → photo_before
pub fn can_complete_photos_before(order: &Order) -> GuardResult {
    if order.photos_before.is_empty() {
        return Err(BlockReason::NoPhotosBefore);
    }
    Ok(())
}

/// Guard for photo_before → checklist
pub fn can_complete_checklist(order: &Order) -> GuardResult {
    if order.all_checklist_completed() {
        return Ok(());
    }
    if order.checklist.is_empty() {
        return Err(BlockReason::EmptyChecklist);
    }
    let remaining = order.checklist.iter().filter(|item| !item.completed).count();
    if remaining > 0 {
        return Err(BlockReason::IncompleteChecklist { remaining });
    }
    Ok(())
}

/// Guard for checklist → photo_after
pub fn can_complete_photos_after(order: &Order) -> GuardResult {
    if order.photos_after.is_empty() {
        return Err(BlockReason::NoPhotosAfter);
    }
    Ok(())
}

/// Guard for the payment stage → completed, given the payment being confirmed
pub fn can_confirm_payment(
    order: &Order,
    method: Option<PaymentMethod>,
    cash_received: Option<f64>,
) -> GuardResult {
    match method {
        None => Err(BlockReason::NoPaymentMethod),
        Some(PaymentMethod::Qr) => Ok(()),
        Some(PaymentMethod::Cash) => {
            let due = order.amount_due();
            match cash_received {
                Some(received) if received.is_finite() && received >= due => Ok(()),
                received => Err(BlockReason::InsufficientCash { received, due }),
            }
        }
    }
}

/// Validate a single-step transition of `order` to `target`, using the
/// payment details already recorded on the order.
pub fn validate_transition(order: &Order, target: OrderStatus) -> GuardResult {
    let next = match get_next_status(order.status) {
        Some(next) => next,
        None => return Err(BlockReason::Terminal),
    };
    if next != target {
        return Err(BlockReason::InvalidTransition {
            from: order.status,
            to: target,
        });
    }

    match target {
        OrderStatus::InProgress => Ok(()),
        OrderStatus::PhotoBefore => can_complete_photos_before(order),
        OrderStatus::Checklist => can_complete_checklist(order),
        OrderStatus::PhotoAfter => can_complete_photos_after(order),
        OrderStatus::Completed => {
            can_confirm_payment(order, order.payment_method, order.cash_received)
        }
        OrderStatus::Pending | OrderStatus::Payment => Err(BlockReason::InvalidTransition {
            from: order.status,
            to: target,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::ChecklistItem;
    use chrono::Utc;

    fn make_order(status: OrderStatus) -> Order {
        let mut order = Order::new("ORD-1", "Client", "+7", "Addr", "Repair", Utc::now());
        order.status = status;
        order
    }

    fn item(completed: bool) -> ChecklistItem {
        let mut item = ChecklistItem::from_master("Task");
        item.completed = completed;
        item
    }

    #[test]
    fn test_photos_before_guard() {
        let mut order = make_order(OrderStatus::InProgress);
        assert_eq!(can_complete_photos_before(&order), Err(BlockReason::NoPhotosBefore));

        order.photos_before.push("file:///a.jpg".to_string());
        assert!(can_complete_photos_before(&order).is_ok());
    }

    #[test]
    fn test_checklist_guard_blocks_until_all_completed() {
        let mut order = make_order(OrderStatus::PhotoBefore);
        order.checklist = vec![item(true), item(false)];
        assert_eq!(
            can_complete_checklist(&order),
            Err(BlockReason::IncompleteChecklist { remaining: 1 })
        );

        order.checklist[1].completed = true;
        assert!(can_complete_checklist(&order).is_ok());
    }

    #[test]
    fn test_checklist_guard_blocks_empty() {
        let order = make_order(OrderStatus::PhotoBefore);
        assert_eq!(can_complete_checklist(&order), Err(BlockReason::EmptyChecklist));
    }

    #[test]
    fn test_photos_after_guard() {
        let mut order = make_order(OrderStatus::Checklist);
        assert_eq!(can_complete_photos_after(&order), Err(BlockReason::NoPhotosAfter));

        order.photos_after.push("file:///b.jpg".to_string());
        assert!(can_complete_photos_after(&order).is_ok());
    }

    #[test]
    fn test_payment_guard() {
        let order = make_order(OrderStatus::PhotoAfter).with_payment_amount(2000.0);

        assert_eq!(can_confirm_payment(&order, None, None), Err(BlockReason::NoPaymentMethod));
        assert!(can_confirm_payment(&order, Some(PaymentMethod::Qr), None).is_ok());
        assert!(can_confirm_payment(&order, Some(PaymentMethod::Cash), Some(2000.0)).is_ok());
        assert!(can_confirm_payment(&order, Some(PaymentMethod::Cash), Some(2500.0)).is_ok());
        assert_eq!(
            can_confirm_payment(&order, Some(PaymentMethod::Cash), Some(1500.0)),
            Err(BlockReason::InsufficientCash {
                received: Some(1500.0),
                due: 2000.0
            })
        );
        assert!(can_confirm_payment(&order, Some(PaymentMethod::Cash), None).is_err());
    }

    #[test]
    fn test_validate_transition_valid() {
        let order = make_order(OrderStatus::Pending);
        assert!(validate_transition(&order, OrderStatus::InProgress).is_ok());
    }

    #[test]
    fn test_validate_transition_invalid_skip() {
        let order = make_order(OrderStatus::Pending);
        let result = validate_transition(&order, OrderStatus::Checklist);
        assert!(matches!(result, Err(BlockReason::InvalidTransition { .. })));
        assert!(result.unwrap_err().to_string().contains("cannot transition"));
    }

    #[test]
    fn test_validate_transition_invalid_backward() {
        let order = make_order(OrderStatus::Checklist);
        assert!(validate_transition(&order, OrderStatus::InProgress).is_err());
    }

    #[test]
    fn test_validate_transition_into_payment_is_refused() {
        let order = make_order(OrderStatus::PhotoAfter);
        assert!(validate_transition(&order, OrderStatus::Payment).is_err());
    }

    #[test]
    fn test_validate_transition_from_terminal() {
        let order = make_order(OrderStatus::Completed);
        assert_eq!(
            validate_transition(&order, OrderStatus::Pending),
            Err(BlockReason::Terminal)
        );
    }

    #[test]
    fn test_validate_completion_uses_recorded_method() {
        let order = make_order(OrderStatus::Payment);
        assert_eq!(
            validate_transition(&order, OrderStatus::Completed),
            Err(BlockReason::NoPaymentMethod)
        );

        let paid = order.with_payment_method(Some(PaymentMethod::Qr));
        assert!(validate_transition(&paid, OrderStatus::Completed).is_ok());
    }
}
