//! Dispatcher assignment store
//!
//! Owns the dispatcher's masters and order collection. This dataset is
//! independent of the master's single current order.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::schemas::{DispatcherOrder, Master, OrderStatus, Priority};

use super::seed::{seed_dispatcher_orders, seed_masters};

/// Which orders the filtered view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderFilter {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
}

impl OrderFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Pending => status == OrderStatus::Pending,
            OrderFilter::InProgress => status == OrderStatus::InProgress,
            OrderFilter::Completed => status == OrderStatus::Completed,
        }
    }
}

impl std::str::FromStr for OrderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(OrderFilter::All),
            "pending" => Ok(OrderFilter::Pending),
            "in_progress" => Ok(OrderFilter::InProgress),
            "completed" => Ok(OrderFilter::Completed),
            _ => Err(format!("Unknown order filter: {}", s)),
        }
    }
}

/// Result of an assignment attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AssignOutcome {
    Assigned,
    /// The order already belongs to this master; nothing changed
    AlreadyAssigned,
    MasterNotFound,
    OrderNotFound,
    /// Master is offline or at capacity
    MasterUnavailable,
}

impl AssignOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignOutcome::Assigned)
    }
}

/// Order counts for the dispatcher overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub today_total: usize,
}

/// Whether `timestamp` falls on `day` in the device's local time zone
fn is_on_local_day(timestamp: DateTime<Utc>, day: NaiveDate) -> bool {
    timestamp.with_timezone(&Local).date_naive() == day
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The dispatcher's store
#[derive(Debug, Clone)]
pub struct DispatcherStore {
    masters: Vec<Master>,
    orders: Vec<DispatcherOrder>,
    selected_filter: OrderFilter,
}

impl DispatcherStore {
    pub fn new(masters: Vec<Master>, orders: Vec<DispatcherOrder>) -> Self {
        DispatcherStore {
            masters,
            orders,
            selected_filter: OrderFilter::All,
        }
    }

    /// Store over the built-in demo dataset
    pub fn with_seed_data() -> Self {
        Self::new(seed_masters(), seed_dispatcher_orders())
    }

    // ===== COLLECTIONS =====

    pub fn masters(&self) -> &[Master] {
        &self.masters
    }

    pub fn all_orders(&self) -> &[DispatcherOrder] {
        &self.orders
    }

    pub fn master(&self, master_id: &str) -> Option<&Master> {
        self.masters.iter().find(|m| m.id == master_id)
    }

    pub fn order(&self, order_id: &str) -> Option<&DispatcherOrder> {
        self.orders.iter().find(|o| o.id() == order_id)
    }

    /// Display name of the order's master, looked up by id
    pub fn master_name(&self, order: &DispatcherOrder) -> Option<&str> {
        let master_id = order.master_id.as_deref()?;
        self.master(master_id).map(|m| m.name.as_str())
    }

    // ===== FILTERED VIEW =====

    pub fn selected_filter(&self) -> OrderFilter {
        self.selected_filter
    }

    pub fn set_selected_filter(&mut self, filter: OrderFilter) {
        self.selected_filter = filter;
    }

    /// Orders matching the selected filter
    pub fn filtered_orders(&self) -> Vec<&DispatcherOrder> {
        self.orders
            .iter()
            .filter(|o| self.selected_filter.matches(o.order.status))
            .collect()
    }

    // ===== ASSIGNMENT =====

    /// Assign an order to a master, moving it to `in_progress`.
    ///
    /// The master must be online with spare capacity. An order held by
    /// another master is released from that master first.
    pub fn assign_order_to_master(&mut self, order_id: &str, master_id: &str) -> AssignOutcome {
        let Some(master) = self.master(master_id) else {
            return AssignOutcome::MasterNotFound;
        };
        let master_available = master.is_available();
        let Some(order) = self.order(order_id) else {
            return AssignOutcome::OrderNotFound;
        };
        if order.master_id.as_deref() == Some(master_id) {
            return AssignOutcome::AlreadyAssigned;
        }
        if !master_available {
            tracing::debug!(order_id, master_id, "Master unavailable for assignment");
            return AssignOutcome::MasterUnavailable;
        }

        let previous = order.master_id.clone();
        if let Some(previous) = previous {
            self.release_master(&previous);
        }

        let now = Utc::now();
        self.orders = self
            .orders
            .iter()
            .map(|o| {
                if o.id() != order_id {
                    return o.clone();
                }
                let mut next = o.clone();
                next.master_id = Some(master_id.to_string());
                next.order.status = OrderStatus::InProgress;
                next.assigned_at = Some(now);
                next
            })
            .collect();
        self.masters = self
            .masters
            .iter()
            .map(|m| {
                let mut next = m.clone();
                if m.id == master_id {
                    next.current_orders += 1;
                }
                next
            })
            .collect();

        tracing::info!(order_id, master_id, "Order assigned");
        AssignOutcome::Assigned
    }

    /// Return an order to `pending` and free its master. No-op for an
    /// order without a master.
    pub fn unassign_order(&mut self, order_id: &str) -> bool {
        let Some(master_id) = self.order(order_id).and_then(|o| o.master_id.clone()) else {
            return false;
        };

        self.orders = self
            .orders
            .iter()
            .map(|o| {
                let mut next = o.clone();
                if o.id() == order_id {
                    next.master_id = None;
                    next.assigned_at = None;
                    next.order.status = OrderStatus::Pending;
                }
                next
            })
            .collect();
        self.release_master(&master_id);

        tracing::info!(order_id, master_id = %master_id, "Order unassigned");
        true
    }

    fn release_master(&mut self, master_id: &str) {
        self.masters = self
            .masters
            .iter()
            .map(|m| {
                let mut next = m.clone();
                if m.id == master_id {
                    next.current_orders = m.current_orders.saturating_sub(1);
                }
                next
            })
            .collect();
    }

    /// Set an order's priority; no-op for an unknown order
    pub fn update_order_priority(&mut self, order_id: &str, priority: Priority) -> bool {
        if self.order(order_id).is_none() {
            return false;
        }
        self.orders = self
            .orders
            .iter()
            .map(|o| {
                let mut next = o.clone();
                if o.id() == order_id {
                    next.priority = priority;
                }
                next
            })
            .collect();
        true
    }

    // ===== MASTERS =====

    /// Online masters with spare capacity
    pub fn available_masters(&self) -> Vec<&Master> {
        self.masters.iter().filter(|m| m.is_available()).collect()
    }

    /// Available masters whose specialties match the order's service type
    pub fn suitable_masters(&self, order_id: &str) -> Vec<&Master> {
        let Some(order) = self.order(order_id) else {
            return Vec::new();
        };
        self.available_masters()
            .into_iter()
            .filter(|m| m.matches_service(&order.order.service_type))
            .collect()
    }

    /// Available masters whose specialties do not match the order
    pub fn other_masters(&self, order_id: &str) -> Vec<&Master> {
        let Some(order) = self.order(order_id) else {
            return Vec::new();
        };
        self.available_masters()
            .into_iter()
            .filter(|m| !m.matches_service(&order.order.service_type))
            .collect()
    }

    pub fn online_master_count(&self) -> usize {
        self.masters.iter().filter(|m| m.is_online).count()
    }

    /// Masters sorted by rating, best first
    pub fn masters_by_rating(&self) -> Vec<&Master> {
        let mut masters: Vec<&Master> = self.masters.iter().collect();
        masters.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        masters
    }

    // ===== STATS =====

    /// Counts by status plus orders created today (local date)
    pub fn get_orders_stats(&self) -> OrdersStats {
        self.orders_stats_on(local_today())
    }

    /// Counts by status plus orders created on `today`
    pub fn orders_stats_on(&self, today: NaiveDate) -> OrdersStats {
        let count = |status: OrderStatus| {
            self.orders
                .iter()
                .filter(|o| o.order.status == status)
                .count()
        };
        OrdersStats {
            total: self.orders.len(),
            pending: count(OrderStatus::Pending),
            in_progress: count(OrderStatus::InProgress),
            completed: count(OrderStatus::Completed),
            today_total: self
                .orders
                .iter()
                .filter(|o| is_on_local_day(o.created_at, today))
                .count(),
        }
    }

    /// Sum of amounts over completed orders created today
    pub fn today_revenue(&self) -> f64 {
        self.revenue_on(local_today())
    }

    pub fn revenue_on(&self, day: NaiveDate) -> f64 {
        self.orders
            .iter()
            .filter(|o| o.order.status == OrderStatus::Completed)
            .filter(|o| is_on_local_day(o.created_at, day))
            .map(|o| o.order.amount_due())
            .sum()
    }

    /// Mean amount over all orders; zero for an empty collection
    pub fn average_order_value(&self) -> f64 {
        if self.orders.is_empty() {
            return 0.0;
        }
        let total: f64 = self.orders.iter().map(|o| o.order.amount_due()).sum();
        total / self.orders.len() as f64
    }
}

impl Default for DispatcherStore {
    fn default() -> Self {
        Self::with_seed_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Order;
    use chrono::Duration;

    fn make_master(id: &str, online: bool, current: u32, max: u32, specialty: &str) -> Master {
        Master {
            id: id.to_string(),
            name: format!("Master {}", id),
            phone: "+7".to_string(),
            rating: 4.0,
            completed_orders: 0,
            is_online: online,
            current_orders: current,
            max_orders: max,
            specialties: vec![specialty.to_string()],
            location: None,
        }
    }

    fn make_order(id: &str, service: &str, created_at: DateTime<Utc>) -> DispatcherOrder {
        DispatcherOrder {
            order: Order::new(id, "Client", "+7", "Addr", service, Utc::now())
                .with_payment_amount(1000.0),
            master_id: None,
            priority: Priority::Medium,
            estimated_duration: 60,
            created_at,
            assigned_at: None,
        }
    }

    fn make_store() -> DispatcherStore {
        DispatcherStore::new(
            vec![
                make_master("m1", true, 1, 3, "Plumbing"),
                make_master("m2", true, 2, 2, "Electrical"),
                make_master("m3", false, 0, 2, "Plumbing"),
                make_master("m4", true, 0, 1, "Electrical"),
            ],
            vec![
                make_order("o1", "Plumbing repair", Utc::now()),
                make_order("o2", "Socket install", Utc::now() - Duration::days(3)),
            ],
        )
    }

    #[test]
    fn test_assign_then_unassign_restores_state() {
        let mut store = make_store();
        let before = store.master("m1").unwrap().current_orders;

        assert_eq!(store.assign_order_to_master("o1", "m1"), AssignOutcome::Assigned);
        let order = store.order("o1").unwrap();
        assert_eq!(order.order.status, OrderStatus::InProgress);
        assert_eq!(order.master_id.as_deref(), Some("m1"));
        assert!(order.assigned_at.is_some());
        assert_eq!(store.master_name(order), Some("Master m1"));
        assert_eq!(store.master("m1").unwrap().current_orders, before + 1);

        assert!(store.unassign_order("o1"));
        let order = store.order("o1").unwrap();
        assert_eq!(order.order.status, OrderStatus::Pending);
        assert!(order.master_id.is_none());
        assert!(order.assigned_at.is_none());
        assert_eq!(store.master("m1").unwrap().current_orders, before);
    }

    #[test]
    fn test_assign_unknown_master_or_order() {
        let mut store = make_store();
        assert_eq!(store.assign_order_to_master("o1", "nobody"), AssignOutcome::MasterNotFound);
        assert_eq!(store.assign_order_to_master("o9", "m1"), AssignOutcome::OrderNotFound);
        assert_eq!(store.master("m1").unwrap().current_orders, 1);
    }

    #[test]
    fn test_assign_rejects_unavailable_master() {
        let mut store = make_store();
        assert_eq!(store.assign_order_to_master("o1", "m2"), AssignOutcome::MasterUnavailable);
        assert_eq!(store.assign_order_to_master("o1", "m3"), AssignOutcome::MasterUnavailable);
        assert_eq!(store.order("o1").unwrap().order.status, OrderStatus::Pending);
        assert_eq!(store.master("m2").unwrap().current_orders, 2);
    }

    #[test]
    fn test_reassign_releases_previous_master() {
        let mut store = make_store();
        store.assign_order_to_master("o2", "m4");
        assert_eq!(store.master("m4").unwrap().current_orders, 1);

        assert_eq!(store.assign_order_to_master("o2", "m1"), AssignOutcome::Assigned);
        assert_eq!(store.master("m4").unwrap().current_orders, 0);
        assert_eq!(store.master("m1").unwrap().current_orders, 2);
        assert_eq!(store.assign_order_to_master("o2", "m1"), AssignOutcome::AlreadyAssigned);
        assert_eq!(store.master("m1").unwrap().current_orders, 2);
    }

    #[test]
    fn test_unassign_without_master_is_noop() {
        let mut store = make_store();
        assert!(!store.unassign_order("o1"));
        assert!(!store.unassign_order("missing"));
    }

    #[test]
    fn test_unassign_floors_master_count_at_zero() {
        let mut orders = vec![make_order("o1", "Plumbing", Utc::now())];
        orders[0].master_id = Some("m1".to_string());
        let masters = vec![make_master("m1", true, 0, 2, "Plumbing")];
        let mut store = DispatcherStore::new(masters, orders);

        assert!(store.unassign_order("o1"));
        assert_eq!(store.master("m1").unwrap().current_orders, 0);
    }

    #[test]
    fn test_master_name_follows_master_record() {
        let mut store = make_store();
        store.assign_order_to_master("o1", "m1");
        store.masters[0].name = "Renamed".to_string();

        let order = store.order("o1").unwrap();
        assert_eq!(store.master_name(order), Some("Renamed"));
    }

    #[test]
    fn test_update_order_priority() {
        let mut store = make_store();
        assert!(store.update_order_priority("o1", Priority::High));
        assert_eq!(store.order("o1").unwrap().priority, Priority::High);
        assert!(!store.update_order_priority("zzz", Priority::Low));
    }

    #[test]
    fn test_filtered_orders() {
        let mut store = make_store();
        store.assign_order_to_master("o1", "m1");

        assert_eq!(store.filtered_orders().len(), 2);
        store.set_selected_filter(OrderFilter::InProgress);
        let ids: Vec<&str> = store.filtered_orders().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["o1"]);
        store.set_selected_filter(OrderFilter::Completed);
        assert!(store.filtered_orders().is_empty());
        assert_eq!(store.all_orders().len(), 2);
    }

    #[test]
    fn test_orders_stats() {
        let mut store = make_store();
        store.assign_order_to_master("o1", "m1");

        let today = Utc::now().with_timezone(&Local).date_naive();
        let stats = store.orders_stats_on(today);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.today_total, 1);
    }

    #[test]
    fn test_available_and_suitable_masters() {
        let store = make_store();
        let available: Vec<&str> =
            store.available_masters().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(available, vec!["m1", "m4"]);

        let suitable: Vec<&str> =
            store.suitable_masters("o1").iter().map(|m| m.id.as_str()).collect();
        assert_eq!(suitable, vec!["m1"]);
        let other: Vec<&str> = store.other_masters("o1").iter().map(|m| m.id.as_str()).collect();
        assert_eq!(other, vec!["m4"]);
        assert!(store.suitable_masters("missing").is_empty());
    }

    #[test]
    fn test_revenue_and_average() {
        let mut store = make_store();
        let today = Utc::now().with_timezone(&Local).date_naive();
        assert_eq!(store.revenue_on(today), 0.0);
        assert_eq!(store.average_order_value(), 1000.0);

        store.orders[0].order.status = OrderStatus::Completed;
        store.orders[1].order.status = OrderStatus::Completed;
        assert_eq!(store.revenue_on(today), 1000.0);

        let empty = DispatcherStore::new(Vec::new(), Vec::new());
        assert_eq!(empty.average_order_value(), 0.0);
    }

    #[test]
    fn test_masters_by_rating_and_online_count() {
        let mut store = make_store();
        store.masters[2].rating = 5.0;
        assert_eq!(store.masters_by_rating()[0].id, "m3");
        assert_eq!(store.online_master_count(), 3);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("in_progress".parse::<OrderFilter>().unwrap(), OrderFilter::InProgress);
        assert!("done".parse::<OrderFilter>().is_err());
    }

    #[test]
    fn test_seed_store_stats() {
        let store = DispatcherStore::with_seed_data();
        let stats = store.get_orders_stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
    }
}
