//! Order transition logic
//!
//! Pure functions for applying named workflow steps to orders.

use crate::schemas::{Order, OrderStatus, PaymentMethod};

use super::states::get_next_status;
use super::validation::{
    can_complete_checklist, can_complete_photos_after, can_complete_photos_before,
    can_confirm_payment, BlockReason,
};

/// A named workflow step. Each step has exactly one source stage and
/// computes its own target status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderTransition {
    /// pending → in_progress
    StartWork,
    /// in_progress → photo_before
    CompletePhotosBefore,
    /// photo_before → checklist
    CompleteChecklist,
    /// checklist → photo_after
    CompletePhotosAfter,
    /// photo_after (or payment) → completed
    ConfirmPayment {
        method: Option<PaymentMethod>,
        cash_received: Option<f64>,
    },
}

impl OrderTransition {
    /// Whether this step may start from the given status
    pub fn applies_to(&self, status: OrderStatus) -> bool {
        match self {
            OrderTransition::StartWork => status == OrderStatus::Pending,
            OrderTransition::CompletePhotosBefore => status == OrderStatus::InProgress,
            OrderTransition::CompleteChecklist => status == OrderStatus::PhotoBefore,
            OrderTransition::CompletePhotosAfter => status == OrderStatus::Checklist,
            OrderTransition::ConfirmPayment { .. } => {
                matches!(status, OrderStatus::PhotoAfter | OrderStatus::Payment)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrderTransition::StartWork => "start_work",
            OrderTransition::CompletePhotosBefore => "complete_photos_before",
            OrderTransition::CompleteChecklist => "complete_checklist",
            OrderTransition::CompletePhotosAfter => "complete_photos_after",
            OrderTransition::ConfirmPayment { .. } => "confirm_payment",
        }
    }
}

/// Result of a transition attempt
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// Transition applied; carries the new order state
    Applied { order: Order },
    /// A guard refused the transition; state is unchanged
    Blocked { reason: BlockReason },
}

impl TransitionOutcome {
    /// Check if the transition was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }

    /// Check if the transition was blocked
    pub fn is_blocked(&self) -> bool {
        matches!(self, TransitionOutcome::Blocked { .. })
    }

    /// Get the new order if the transition was applied
    pub fn order(self) -> Option<Order> {
        match self {
            TransitionOutcome::Applied { order } => Some(order),
            TransitionOutcome::Blocked { .. } => None,
        }
    }

    /// Get the block reason if the transition was refused
    pub fn reason(&self) -> Option<&BlockReason> {
        match self {
            TransitionOutcome::Applied { .. } => None,
            TransitionOutcome::Blocked { reason } => Some(reason),
        }
    }

    pub(crate) fn blocked(reason: BlockReason) -> Self {
        TransitionOutcome::Blocked { reason }
    }
}

/// Pure function that applies a named step to an order.
///
/// Never mutates the input; on success returns a new Order at the step's
/// target status with any timestamps and payment details applied.
pub fn apply_transition(order: &Order, transition: OrderTransition) -> TransitionOutcome {
    let target = match get_next_status(order.status) {
        Some(next) => next,
        None => return TransitionOutcome::blocked(BlockReason::Terminal),
    };

    if !transition.applies_to(order.status) {
        return TransitionOutcome::blocked(BlockReason::InvalidTransition {
            from: order.status,
            to: step_target(transition),
        });
    }

    let guard = match transition {
        OrderTransition::StartWork => Ok(()),
        OrderTransition::CompletePhotosBefore => can_complete_photos_before(order),
        OrderTransition::CompleteChecklist => can_complete_checklist(order),
        OrderTransition::CompletePhotosAfter => can_complete_photos_after(order),
        OrderTransition::ConfirmPayment {
            method,
            cash_received,
        } => can_confirm_payment(order, method, cash_received.or(order.cash_received)),
    };
    if let Err(reason) = guard {
        return TransitionOutcome::blocked(reason);
    }

    let mut next = order.clone();
    if let OrderTransition::ConfirmPayment {
        method,
        cash_received,
    } = transition
    {
        next = next.with_payment_method(method);
        if let Some(received) = cash_received.filter(|r| *r > 0.0) {
            next = next.with_cash_received(received);
        }
    }

    TransitionOutcome::Applied {
        order: next.with_status(target),
    }
}

fn step_target(transition: OrderTransition) -> OrderStatus {
    match transition {
        OrderTransition::StartWork => OrderStatus::InProgress,
        OrderTransition::CompletePhotosBefore => OrderStatus::PhotoBefore,
        OrderTransition::CompleteChecklist => OrderStatus::Checklist,
        OrderTransition::CompletePhotosAfter => OrderStatus::PhotoAfter,
        OrderTransition::ConfirmPayment { .. } => OrderStatus::Completed,
    }
}

/// The step that moves an order out of its current stage. Payment is
/// excluded because it needs the caller's payment details.
pub fn transition_for_stage(status: OrderStatus) -> Option<OrderTransition> {
    match status {
        OrderStatus::Pending => Some(OrderTransition::StartWork),
        OrderStatus::InProgress => Some(OrderTransition::CompletePhotosBefore),
        OrderStatus::PhotoBefore => Some(OrderTransition::CompleteChecklist),
        OrderStatus::Checklist => Some(OrderTransition::CompletePhotosAfter),
        OrderStatus::PhotoAfter | OrderStatus::Payment | OrderStatus::Completed => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::ChecklistItem;
    use chrono::Utc;

    fn make_order(status: OrderStatus) -> Order {
        let mut order = Order::new("ORD-1", "Client", "+7", "Addr", "Repair", Utc::now())
            .with_payment_amount(3000.0);
        order.status = status;
        order
    }

    #[test]
    fn test_start_work() {
        let order = make_order(OrderStatus::Pending);
        let before = Utc::now();

        let next = apply_transition(&order, OrderTransition::StartWork).order().unwrap();
        assert_eq!(next.status, OrderStatus::InProgress);
        assert!(next.start_time.unwrap() >= before);
    }

    #[test]
    fn test_complete_photos_before_requires_photo() {
        let mut order = make_order(OrderStatus::InProgress);
        let result = apply_transition(&order, OrderTransition::CompletePhotosBefore);
        assert_eq!(result.reason(), Some(&BlockReason::NoPhotosBefore));

        order.photos_before.push("file:///1.jpg".to_string());
        let next = apply_transition(&order, OrderTransition::CompletePhotosBefore)
            .order()
            .unwrap();
        assert_eq!(next.status, OrderStatus::PhotoBefore);
    }

    #[test]
    fn test_complete_checklist() {
        let mut item = ChecklistItem::from_dispatcher("c1", "Mount unit");
        item.completed = true;
        let order = make_order(OrderStatus::PhotoBefore).with_checklist(vec![item]);

        let next = apply_transition(&order, OrderTransition::CompleteChecklist)
            .order()
            .unwrap();
        assert_eq!(next.status, OrderStatus::Checklist);
    }

    #[test]
    fn test_complete_photos_after() {
        let mut order = make_order(OrderStatus::Checklist);
        order.photos_after.push("file:///2.jpg".to_string());

        let result = apply_transition(&order, OrderTransition::CompletePhotosAfter);
        assert_eq!(result.order().unwrap().status, OrderStatus::PhotoAfter);
    }

    #[test]
    fn test_confirm_payment_records_method_and_cash() {
        let order = make_order(OrderStatus::PhotoAfter);
        let step = OrderTransition::ConfirmPayment {
            method: Some(PaymentMethod::Cash),
            cash_received: Some(5000.0),
        };

        let next = apply_transition(&order, step).order().unwrap();
        assert_eq!(next.status, OrderStatus::Completed);
        assert_eq!(next.payment_method, Some(PaymentMethod::Cash));
        assert_eq!(next.cash_received, Some(5000.0));
        assert_eq!(next.cash_change(), Some(2000.0));
        assert!(next.end_time.is_some());
    }

    #[test]
    fn test_confirm_payment_from_legacy_payment_status() {
        let order = make_order(OrderStatus::Payment);
        let step = OrderTransition::ConfirmPayment {
            method: Some(PaymentMethod::Qr),
            cash_received: None,
        };

        let next = apply_transition(&order, step).order().unwrap();
        assert_eq!(next.status, OrderStatus::Completed);
        assert!(next.cash_received.is_none());
    }

    #[test]
    fn test_step_from_wrong_stage_is_blocked() {
        let order = make_order(OrderStatus::Pending);
        let result = apply_transition(&order, OrderTransition::CompleteChecklist);
        assert_eq!(
            result.reason(),
            Some(&BlockReason::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Checklist
            })
        );
    }

    #[test]
    fn test_transition_from_terminal_status() {
        let order = make_order(OrderStatus::Completed);
        let result = apply_transition(&order, OrderTransition::StartWork);
        assert_eq!(result.reason(), Some(&BlockReason::Terminal));
    }

    #[test]
    fn test_transition_does_not_mutate_original() {
        let order = make_order(OrderStatus::Pending);
        let original = order.clone();

        let _ = apply_transition(&order, OrderTransition::StartWork);
        assert_eq!(order, original);
    }

    #[test]
    fn test_transition_for_stage() {
        assert_eq!(transition_for_stage(OrderStatus::Pending), Some(OrderTransition::StartWork));
        assert_eq!(
            transition_for_stage(OrderStatus::Checklist),
            Some(OrderTransition::CompletePhotosAfter)
        );
        assert_eq!(transition_for_stage(OrderStatus::PhotoAfter), None);
        assert_eq!(transition_for_stage(OrderStatus::Completed), None);
    }

    #[test]
    fn test_outcome_helpers() {
        let order = make_order(OrderStatus::Pending);
        let result = apply_transition(&order, OrderTransition::StartWork);
        assert!(result.is_applied());
        assert!(!result.is_blocked());
        assert!(result.reason().is_none());
    }
}
