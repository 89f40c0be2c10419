//! Order workflow store
//!
//! Owns the master's single current order. Every operation builds a new
//! `Order` value from the current one, persists it, and swaps it in as a
//! fresh shared snapshot, so callers can detect changes by identity.
//!
//! Validation rejections (blank input, negative amounts, no order loaded)
//! are silent no-ops that return `false`. Transitions return a
//! [`TransitionOutcome`] and are blocked by the guards in `domain`.
//! Storage failures are logged and never undo an in-memory change.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{
    apply_transition, progress_of, validate_transition, BlockReason, OrderTransition, Progress,
    TransitionOutcome,
};
use crate::fs::KeyValueStorage;
use crate::schemas::{Actor, ChecklistItem, Config, Order, OrderStatus, PaymentMethod};

use super::seed::{fresh_order, seed_order};

/// Shared snapshot of the current order
pub type OrderSnapshot = Option<Arc<Order>>;

/// Result of decoding a stored payload
#[derive(Debug, Clone, PartialEq)]
pub enum StoredOrder {
    /// A usable order
    Valid(Order),
    /// Nothing meaningful stored
    Missing,
    /// Something was stored but it is not an order
    Corrupt(String),
}

/// Where the order in memory came from after a load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSource {
    Stored,
    SeedMissing,
    SeedCorrupt(String),
    SeedUnreadable(String),
}

/// Decode the raw stored text into an order.
///
/// Absent, blank, `null` and `undefined` payloads count as missing. The
/// payload must be a JSON object with a non-empty `id` and `clientName`
/// and must deserialize into an [`Order`]; anything else is corrupt.
pub fn decode_stored_order(raw: Option<&str>) -> StoredOrder {
    let text = match raw.map(str::trim) {
        None | Some("") | Some("null") | Some("undefined") => return StoredOrder::Missing,
        Some(text) => text,
    };

    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return StoredOrder::Corrupt(format!("not JSON: {}", e)),
    };

    let has_text = |field: &str| {
        value
            .get(field)
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    };
    if !value.is_object() || !has_text("id") || !has_text("clientName") {
        return StoredOrder::Corrupt("missing id or clientName".to_string());
    }

    match serde_json::from_value::<Order>(value) {
        Ok(order) => StoredOrder::Valid(order),
        Err(e) => StoredOrder::Corrupt(format!("unexpected shape: {}", e)),
    }
}

/// The master's order store
pub struct OrderStore<S: KeyValueStorage> {
    storage: S,
    storage_key: String,
    current: OrderSnapshot,
    is_loading: bool,
    revision: u64,
    publisher: watch::Sender<OrderSnapshot>,
}

impl<S: KeyValueStorage> OrderStore<S> {
    /// Create a store with nothing loaded yet
    pub fn new(storage: S, config: &Config) -> Self {
        let (publisher, _) = watch::channel(None);
        OrderStore {
            storage,
            storage_key: config.storage_key.clone(),
            current: None,
            is_loading: true,
            revision: 0,
            publisher,
        }
    }

    /// Create a store and load the current order from storage
    pub fn open(storage: S, config: &Config) -> Self {
        let mut store = Self::new(storage, config);
        store.load();
        store
    }

    // ===== READ MODEL =====

    pub fn current_order(&self) -> OrderSnapshot {
        self.current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Number of committed changes since the store was created
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receive every new snapshot as it is committed
    pub fn subscribe(&self) -> watch::Receiver<OrderSnapshot> {
        self.publisher.subscribe()
    }

    /// Position of the current order in the status progression
    pub fn progress(&self) -> Option<Progress> {
        self.current.as_ref().map(|order| progress_of(order.status))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ===== LOAD / PERSIST =====

    /// Load the stored order, substituting the seed order when nothing
    /// valid is stored. Never fails.
    pub fn load(&mut self) -> LoadSource {
        self.is_loading = true;

        let (order, source) = match self.storage.get_item(&self.storage_key) {
            Err(e) => {
                tracing::error!("Error loading order: {}", e);
                (seed_order(), LoadSource::SeedUnreadable(e.to_string()))
            }
            Ok(raw) => match decode_stored_order(raw.as_deref()) {
                StoredOrder::Valid(order) => {
                    tracing::debug!(
                        order_id = %order.id,
                        status = %order.status,
                        "Loaded stored order"
                    );
                    (order, LoadSource::Stored)
                }
                StoredOrder::Missing => {
                    tracing::debug!("No stored order, using seed order");
                    (seed_order(), LoadSource::SeedMissing)
                }
                StoredOrder::Corrupt(reason) => {
                    tracing::warn!("Invalid stored order ({}), using seed order", reason);
                    if let Err(e) = self.storage.remove_item(&self.storage_key) {
                        tracing::warn!("Could not discard invalid stored order: {}", e);
                    }
                    (seed_order(), LoadSource::SeedCorrupt(reason))
                }
            },
        };

        self.publish(order);
        self.is_loading = false;
        source
    }

    /// Write the order under the storage key; failures are logged only
    fn persist(&mut self, order: &Order) {
        let serialized = match serde_json::to_string(order) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::error!("Error serializing order {}: {}", order.id, e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&self.storage_key, &serialized) {
            tracing::error!("Error saving order {}: {}", order.id, e);
        }
    }

    /// Swap in a new snapshot and notify subscribers
    fn publish(&mut self, order: Order) {
        let snapshot = Some(Arc::new(order));
        self.current = snapshot.clone();
        self.revision += 1;
        self.publisher.send_replace(snapshot);
    }

    fn commit(&mut self, order: Order) {
        self.persist(&order);
        self.publish(order);
    }

    /// Apply `change` to a copy of the current order and commit the
    /// result. `change` returns None to reject.
    fn update<F>(&mut self, operation: &str, change: F) -> bool
    where
        F: FnOnce(&Order) -> Option<Order>,
    {
        let Some(current) = self.current.as_deref() else {
            tracing::debug!(operation, "Ignored: no order loaded");
            return false;
        };
        match change(current) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => {
                tracing::debug!(operation, "Ignored: rejected input");
                false
            }
        }
    }

    // ===== TRANSITIONS =====

    /// Apply a named workflow step
    pub fn transition(&mut self, step: OrderTransition) -> TransitionOutcome {
        let Some(current) = self.current.as_deref() else {
            return TransitionOutcome::Blocked {
                reason: BlockReason::NoOrder,
            };
        };

        let outcome = apply_transition(current, step);
        match &outcome {
            TransitionOutcome::Applied { order } => {
                tracing::info!(
                    order_id = %order.id,
                    from = %current.status,
                    to = %order.status,
                    "{}",
                    step.name()
                );
                let next = order.clone();
                self.commit(next);
            }
            TransitionOutcome::Blocked { reason } => {
                tracing::debug!(step = step.name(), "Transition blocked: {}", reason);
            }
        }
        outcome
    }

    /// pending → in_progress; stamps `start_time`
    pub fn start_work(&mut self) -> TransitionOutcome {
        self.transition(OrderTransition::StartWork)
    }

    /// in_progress → photo_before; needs at least one "before" photo
    pub fn complete_photos_before(&mut self) -> TransitionOutcome {
        self.transition(OrderTransition::CompletePhotosBefore)
    }

    /// photo_before → checklist; needs a non-empty, fully completed checklist
    pub fn complete_checklist(&mut self) -> TransitionOutcome {
        self.transition(OrderTransition::CompleteChecklist)
    }

    /// checklist → photo_after; needs at least one "after" photo
    pub fn complete_photos_after(&mut self) -> TransitionOutcome {
        self.transition(OrderTransition::CompletePhotosAfter)
    }

    /// Payment stage → completed; records the method and cash, stamps `end_time`
    pub fn confirm_payment(
        &mut self,
        method: Option<PaymentMethod>,
        cash_received: Option<f64>,
    ) -> TransitionOutcome {
        self.transition(OrderTransition::ConfirmPayment {
            method,
            cash_received,
        })
    }

    /// Move to `status` if it is the single legal next status and its
    /// guard passes, judged on what is already recorded on the order.
    pub fn update_order_status(&mut self, status: OrderStatus) -> TransitionOutcome {
        let Some(current) = self.current.as_deref() else {
            return TransitionOutcome::Blocked {
                reason: BlockReason::NoOrder,
            };
        };

        if let Err(reason) = validate_transition(current, status) {
            tracing::debug!(target_status = %status, "Status change blocked: {}", reason);
            return TransitionOutcome::Blocked { reason };
        }

        let next = current.clone().with_status(status);
        tracing::info!(
            order_id = %next.id,
            from = %current.status,
            to = %status,
            "update_order_status"
        );
        self.commit(next.clone());
        TransitionOutcome::Applied { order: next }
    }

    // ===== CHECKLIST =====

    /// Set one item's completion; no-op for an unknown id
    pub fn update_checklist_item(&mut self, item_id: &str, completed: bool) -> bool {
        self.update("update_checklist_item", |order| {
            if !order.checklist.iter().any(|item| item.id == item_id) {
                return None;
            }
            let mut next = order.clone();
            for item in next.checklist.iter_mut().filter(|item| item.id == item_id) {
                item.completed = completed;
            }
            Some(next)
        })
    }

    /// Append a master-added item; blank titles are rejected
    pub fn add_checklist_item(&mut self, title: &str) -> bool {
        let title = title.trim();
        self.update("add_checklist_item", |order| {
            if title.is_empty() {
                return None;
            }
            let mut next = order.clone();
            next.checklist.push(ChecklistItem::from_master(title));
            Some(next)
        })
    }

    /// Remove a master-added item; dispatcher items and unknown ids are
    /// left alone
    pub fn remove_checklist_item(&mut self, item_id: &str) -> bool {
        self.update("remove_checklist_item", |order| {
            let item = order.checklist.iter().find(|item| item.id == item_id)?;
            if !item.is_removable_by_master() {
                return None;
            }
            let mut next = order.clone();
            next.checklist.retain(|item| item.id != item_id);
            Some(next)
        })
    }

    // ===== PHOTOS =====

    pub fn add_photo_before(&mut self, uri: &str) -> bool {
        self.update("add_photo_before", |order| {
            push_photo(order, uri, |o| &mut o.photos_before)
        })
    }

    pub fn remove_photo_before(&mut self, index: usize) -> bool {
        self.update("remove_photo_before", |order| {
            remove_photo(order, index, |o| &mut o.photos_before)
        })
    }

    pub fn add_photo_after(&mut self, uri: &str) -> bool {
        self.update("add_photo_after", |order| {
            push_photo(order, uri, |o| &mut o.photos_after)
        })
    }

    pub fn remove_photo_after(&mut self, index: usize) -> bool {
        self.update("remove_photo_after", |order| {
            remove_photo(order, index, |o| &mut o.photos_after)
        })
    }

    // ===== PAYMENT =====

    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) -> bool {
        self.update("set_payment_method", |order| {
            Some(order.clone().with_payment_method(method))
        })
    }

    /// Record cash handed over; negative amounts are rejected
    pub fn set_cash_received(&mut self, amount: f64) -> bool {
        self.update("set_cash_received", |order| {
            if !is_valid_amount(amount) {
                return None;
            }
            Some(order.clone().with_cash_received(amount))
        })
    }

    /// Change the amount due. The first change ever keeps the previous
    /// amount in `original_amount`; later changes leave it alone.
    pub fn update_payment_amount(&mut self, new_amount: f64, reason: Option<&str>) -> bool {
        self.update("update_payment_amount", |order| {
            if !is_valid_amount(new_amount) {
                return None;
            }
            let mut next = order.clone();
            if next.original_amount.is_none() {
                next.original_amount = Some(order.amount_due());
            }
            next.payment_amount = Some(new_amount);
            next.amount_changed_by = Some(Actor::Master);
            next.amount_change_reason = reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string);
            Some(next)
        })
    }

    // ===== RESET =====

    /// Start over with a fresh pending order and clear storage. A failure
    /// to clear storage is logged and the reset still happens.
    pub fn reset_order(&mut self) {
        if let Err(e) = self.storage.remove_item(&self.storage_key) {
            tracing::error!("Error resetting order: {}", e);
        }
        let order = fresh_order();
        tracing::info!(order_id = %order.id, "Order reset");
        self.publish(order);
        self.is_loading = false;
    }
}

fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

fn push_photo(
    order: &Order,
    uri: &str,
    photos: impl FnOnce(&mut Order) -> &mut Vec<String>,
) -> Option<Order> {
    if uri.trim().is_empty() {
        return None;
    }
    let mut next = order.clone();
    photos(&mut next).push(uri.to_string());
    Some(next)
}

fn remove_photo(
    order: &Order,
    index: usize,
    photos: impl FnOnce(&mut Order) -> &mut Vec<String>,
) -> Option<Order> {
    let mut next = order.clone();
    let list = photos(&mut next);
    if index >= list.len() {
        return None;
    }
    list.remove(index);
    Some(next)
}
