//! Order status ordering
//!
//! The workflow follows a linear progression:
//! pending → in_progress → photo_before → checklist → photo_after → completed
//!
//! `payment` sits between `photo_after` and `completed` in the display
//! order but is never entered by a transition; an order found there (from
//! older stored data) is treated like `photo_after` and pays straight to
//! `completed`.

use crate::schemas::OrderStatus;

/// The canonical display ordering of order statuses.
pub const ORDER_STATUSES: &[OrderStatus] = &[
    OrderStatus::Pending,
    OrderStatus::InProgress,
    OrderStatus::PhotoBefore,
    OrderStatus::Checklist,
    OrderStatus::PhotoAfter,
    OrderStatus::Payment,
    OrderStatus::Completed,
];

/// Get the 0-based index of a status in the display progression.
pub fn get_status_index(status: OrderStatus) -> usize {
    ORDER_STATUSES
        .iter()
        .position(|&s| s == status)
        .unwrap_or(usize::MAX)
}

/// Returns the single legal next status, or None for `completed`.
pub fn get_next_status(current: OrderStatus) -> Option<OrderStatus> {
    match current {
        OrderStatus::Pending => Some(OrderStatus::InProgress),
        OrderStatus::InProgress => Some(OrderStatus::PhotoBefore),
        OrderStatus::PhotoBefore => Some(OrderStatus::Checklist),
        OrderStatus::Checklist => Some(OrderStatus::PhotoAfter),
        OrderStatus::PhotoAfter | OrderStatus::Payment => Some(OrderStatus::Completed),
        OrderStatus::Completed => None,
    }
}

/// Check if a status is the terminal status (completed).
pub fn is_terminal_status(status: OrderStatus) -> bool {
    status == OrderStatus::Completed
}

/// Whether the order is on the payment stage.
pub fn is_payment_stage(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::PhotoAfter | OrderStatus::Payment)
}

/// Position of an order within the progression, for progress displays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Index of the current status in ORDER_STATUSES
    pub step: usize,
    /// Number of statuses in the progression
    pub total: usize,
}

impl Progress {
    /// Share of the progression behind the current status, in 0.0..=1.0
    pub fn fraction(&self) -> f64 {
        if self.total <= 1 {
            return 0.0;
        }
        self.step as f64 / (self.total - 1) as f64
    }
}

/// Progress of an order at the given status
pub fn progress_of(status: OrderStatus) -> Progress {
    Progress {
        step: get_status_index(status),
        total: ORDER_STATUSES.len(),
    }
}
