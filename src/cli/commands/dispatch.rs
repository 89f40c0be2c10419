//! Dispatch command - the dispatcher's view over the demo dataset
//!
//! Dispatcher state is not persisted; every invocation starts from the
//! seed masters and orders.

use std::fmt::Write as _;
use std::path::Path;

use crate::cli::DispatchAction;
use crate::config::load_config;
use crate::errors::{FieldError, Result};
use crate::fs::resolve_data_dir;
use crate::schemas::{Config, DispatcherOrder, Master, Priority};
use crate::store::{AssignOutcome, DispatcherStore, OrderFilter};

pub async fn run(data_dir: Option<&Path>, action: DispatchAction) -> Result<()> {
    let config = load_config(&resolve_data_dir(data_dir))?;
    let mut store = DispatcherStore::with_seed_data();
    let changes_data = matches!(
        action,
        DispatchAction::Assign { .. }
            | DispatchAction::Unassign { .. }
            | DispatchAction::Priority { .. }
    );
    println!("{}", execute(&mut store, &config, action)?);
    if changes_data {
        println!("(demo dataset: this change is not saved)");
    }
    Ok(())
}

pub fn execute(
    store: &mut DispatcherStore,
    config: &Config,
    action: DispatchAction,
) -> Result<String> {
    match action {
        DispatchAction::List { filter, json } => list(store, filter, json),
        DispatchAction::Masters { available, order } => {
            masters(store, available, order.as_deref())
        }
        DispatchAction::Assign { order, master } => assign(store, &order, &master),
        DispatchAction::Unassign { order } => {
            order_exists(store, &order)?;
            if store.unassign_order(&order) {
                Ok(format!("Order {} returned to pending", order))
            } else {
                Ok(format!("Order {} has no master", order))
            }
        }
        DispatchAction::Priority { order, priority } => {
            order_exists(store, &order)?;
            store.update_order_priority(&order, priority);
            Ok(format!("Order {} priority is now {}", order, priority_label(priority)))
        }
        DispatchAction::Stats { json } => stats(store, config, json),
    }
}

fn order_exists(store: &DispatcherStore, order_id: &str) -> Result<()> {
    match store.order(order_id) {
        Some(_) => Ok(()),
        None => Err(FieldError::NotFound(format!("order {}", order_id))),
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn list(store: &mut DispatcherStore, filter: OrderFilter, json: bool) -> Result<String> {
    store.set_selected_filter(filter);
    let orders = store.filtered_orders();

    if json {
        let rows: Vec<serde_json::Value> = orders
            .iter()
            .map(|o| {
                let mut value = serde_json::to_value(o).unwrap_or_default();
                if let Some(obj) = value.as_object_mut() {
                    obj.insert(
                        "masterName".to_string(),
                        serde_json::json!(store.master_name(o)),
                    );
                }
                value
            })
            .collect();
        return serde_json::to_string_pretty(&rows)
            .map_err(|e| FieldError::wrap(e, "serializing orders"));
    }

    if orders.is_empty() {
        return Ok("No orders".to_string());
    }
    let mut out = String::new();
    for o in &orders {
        let _ = writeln!(out, "{}", order_line(store, o));
    }
    Ok(out.trim_end().to_string())
}

fn order_line(store: &DispatcherStore, o: &DispatcherOrder) -> String {
    format!(
        "{:<6} {:<12} {:<7} {:<30} {}",
        o.id(),
        o.order.status.as_str(),
        priority_label(o.priority),
        o.order.service_type,
        store.master_name(o).unwrap_or("-")
    )
}

fn master_line(m: &Master) -> String {
    format!(
        "{:<4} {:<16} {:.1}  {}/{}  {}  {}",
        m.id,
        m.name,
        m.rating,
        m.current_orders,
        m.max_orders,
        if m.is_online { "online " } else { "offline" },
        m.specialties.join(", ")
    )
}

fn masters(store: &DispatcherStore, available: bool, order: Option<&str>) -> Result<String> {
    let mut out = String::new();

    if let Some(order_id) = order {
        order_exists(store, order_id)?;
        let _ = writeln!(out, "Suitable:");
        for m in store.suitable_masters(order_id) {
            let _ = writeln!(out, "  {}", master_line(m));
        }
        let _ = writeln!(out, "Others:");
        for m in store.other_masters(order_id) {
            let _ = writeln!(out, "  {}", master_line(m));
        }
        return Ok(out.trim_end().to_string());
    }

    let masters = if available {
        store.available_masters()
    } else {
        store.masters_by_rating()
    };
    for m in masters {
        let _ = writeln!(out, "{}", master_line(m));
    }
    Ok(out.trim_end().to_string())
}

fn assign(store: &mut DispatcherStore, order_id: &str, master_id: &str) -> Result<String> {
    match store.assign_order_to_master(order_id, master_id) {
        AssignOutcome::Assigned => {
            let name = store.master(master_id).map(|m| m.name.as_str()).unwrap_or(master_id);
            Ok(format!("Order {} assigned to {}", order_id, name))
        }
        AssignOutcome::AlreadyAssigned => {
            Ok(format!("Order {} is already assigned to {}", order_id, master_id))
        }
        AssignOutcome::MasterNotFound => Err(FieldError::NotFound(format!("master {}", master_id))),
        AssignOutcome::OrderNotFound => Err(FieldError::NotFound(format!("order {}", order_id))),
        AssignOutcome::MasterUnavailable => Err(FieldError::Rejected(format!(
            "master {} is offline or at capacity",
            master_id
        ))),
    }
}

fn stats(store: &DispatcherStore, config: &Config, json: bool) -> Result<String> {
    let counts = store.get_orders_stats();
    let revenue = store.today_revenue();
    let average = store.average_order_value();
    let online = store.online_master_count();

    if json {
        let value = serde_json::json!({
            "orders": counts,
            "todayRevenue": revenue,
            "avgOrderValue": average,
            "onlineMasters": online,
            "totalMasters": store.masters().len(),
        });
        return serde_json::to_string_pretty(&value)
            .map_err(|e| FieldError::wrap(e, "serializing stats"));
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Orders: {} total, {} pending, {} in progress, {} completed, {} today",
        counts.total, counts.pending, counts.in_progress, counts.completed, counts.today_total
    );
    let _ = writeln!(out, "Revenue today: {:.2} {}", revenue, config.currency);
    let _ = writeln!(out, "Average order: {:.2} {}", average, config.currency);
    let _ = write!(out, "Masters online: {}/{}", online, store.masters().len());
    Ok(out)
}
