//! Order schema - The master's single active work order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of an order.
///
/// Each status names the stage most recently finished, so `photo_before`
/// means the "before" photos are done and the checklist is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Assigned, work not started yet
    Pending,
    /// Work started, capturing "before" photos
    InProgress,
    /// "Before" photos done, working through the checklist
    PhotoBefore,
    /// Checklist done, capturing "after" photos
    Checklist,
    /// "After" photos done, awaiting payment
    PhotoAfter,
    /// Awaiting payment (shares the payment stage with `photo_after`)
    Payment,
    /// Paid and closed
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::PhotoBefore => "photo_before",
            OrderStatus::Checklist => "checklist",
            OrderStatus::PhotoAfter => "photo_after",
            OrderStatus::Payment => "payment",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "in_progress" => Ok(OrderStatus::InProgress),
            "photo_before" => Ok(OrderStatus::PhotoBefore),
            "checklist" => Ok(OrderStatus::Checklist),
            "photo_after" => Ok(OrderStatus::PhotoAfter),
            "payment" => Ok(OrderStatus::Payment),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// How the client paid. "Unset" is `Option::None` on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Qr,
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "qr" => Ok(PaymentMethod::Qr),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

/// Which role made a change (checklist item origin, amount edit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Dispatcher,
    Master,
}

/// A discrete task within an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub added_by: Actor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl ChecklistItem {
    /// Create a master-added item with a fresh id, stamped now
    pub fn from_master(title: impl Into<String>) -> Self {
        ChecklistItem {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            added_by: Actor::Master,
            added_at: Some(Utc::now()),
        }
    }

    /// Create a dispatcher-added (fixed) item
    pub fn from_dispatcher(id: impl Into<String>, title: impl Into<String>) -> Self {
        ChecklistItem {
            id: id.into(),
            title: title.into(),
            completed: false,
            added_by: Actor::Dispatcher,
            added_at: None,
        }
    }

    /// Whether the master may remove this item
    pub fn is_removable_by_master(&self) -> bool {
        self.added_by == Actor::Master
    }
}

/// One active unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,

    pub client_name: String,

    /// Display form of the phone number
    pub client_phone: String,

    /// Dialable digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone_raw: Option<String>,

    pub address: String,

    pub service_type: String,

    pub scheduled_time: DateTime<Utc>,

    pub status: OrderStatus,

    #[serde(default)]
    pub photos_before: Vec<String>,

    #[serde(default)]
    pub photos_after: Vec<String>,

    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<f64>,

    /// Amount before the first edit; written at most once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_changed_by: Option<Actor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_change_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_received: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Order {
    /// Create a new pending order with empty photo sets, checklist and payment
    pub fn new(
        id: impl Into<String>,
        client_name: impl Into<String>,
        client_phone: impl Into<String>,
        address: impl Into<String>,
        service_type: impl Into<String>,
        scheduled_time: DateTime<Utc>,
    ) -> Self {
        Order {
            id: id.into(),
            client_name: client_name.into(),
            client_phone: client_phone.into(),
            client_phone_raw: None,
            address: address.into(),
            service_type: service_type.into(),
            scheduled_time,
            status: OrderStatus::Pending,
            photos_before: Vec::new(),
            photos_after: Vec::new(),
            checklist: Vec::new(),
            payment_method: None,
            payment_amount: None,
            original_amount: None,
            amount_changed_by: None,
            amount_change_reason: None,
            cash_received: None,
            start_time: None,
            end_time: None,
            notes: None,
        }
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Order at the given status, stamping `start_time` on
    /// entry to `in_progress` and `end_time` on entry to `completed`
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        match status {
            OrderStatus::InProgress => self.start_time = Some(Utc::now()),
            OrderStatus::Completed => self.end_time = Some(Utc::now()),
            _ => {}
        }
        self
    }

    pub fn with_checklist(mut self, checklist: Vec<ChecklistItem>) -> Self {
        self.checklist = checklist;
        self
    }

    pub fn with_payment_amount(mut self, amount: f64) -> Self {
        self.payment_amount = Some(amount);
        self
    }

    pub fn with_payment_method(mut self, method: Option<PaymentMethod>) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_cash_received(mut self, amount: f64) -> Self {
        self.cash_received = Some(amount);
        self
    }

    // ===== DERIVED VALUES =====

    /// Amount due; an unset amount counts as zero
    pub fn amount_due(&self) -> f64 {
        self.payment_amount.unwrap_or(0.0)
    }

    /// (completed, total) checklist counts
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|item| item.completed).count();
        (done, self.checklist.len())
    }

    /// True only for a non-empty checklist with every item completed
    pub fn all_checklist_completed(&self) -> bool {
        !self.checklist.is_empty() && self.checklist.iter().all(|item| item.completed)
    }

    /// Change owed to the client for a cash payment
    pub fn cash_change(&self) -> Option<f64> {
        match (self.cash_received, self.payment_amount) {
            (Some(received), Some(amount)) => Some(received - amount),
            _ => None,
        }
    }

    /// Whether the amount was edited away from its original value
    pub fn amount_was_changed(&self) -> bool {
        match (self.original_amount, self.payment_amount) {
            (Some(original), Some(current)) => original != current,
            _ => false,
        }
    }
}
