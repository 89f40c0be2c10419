//! Show command - Show the current order

use std::fmt::Write as _;
use std::path::Path;

use crate::domain::progress_of;
use crate::errors::{FieldError, Result};
use crate::fs::KeyValueStorage;
use crate::schemas::{Actor, Config, Order, OrderStatus, PaymentMethod};
use crate::store::OrderStore;

use super::{current, open_store};

/// Show the current order
pub async fn run(data_dir: Option<&Path>, json: bool) -> Result<()> {
    let (config, store) = open_store(data_dir)?;
    println!("{}", execute(&store, &config, json)?);
    Ok(())
}

pub fn execute<S: KeyValueStorage>(
    store: &OrderStore<S>,
    config: &Config,
    json: bool,
) -> Result<String> {
    let order = current(store)?;
    if json {
        return serde_json::to_string_pretty(order.as_ref())
            .map_err(|e| FieldError::wrap(e, "serializing order"));
    }
    Ok(render_order(&order, config))
}

/// What the master is expected to do at each status
pub fn stage_hint(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "review the details, then `start`",
        OrderStatus::InProgress => "take photos before work, then `next-stage`",
        OrderStatus::PhotoBefore => "complete every checklist task, then `next-stage`",
        OrderStatus::Checklist => "take photos after work, then `next-stage`",
        OrderStatus::PhotoAfter | OrderStatus::Payment => "take payment with `pay`",
        OrderStatus::Completed => "done; `reset` to start over",
    }
}

/// Human-readable view of an order
pub fn render_order(order: &Order, config: &Config) -> String {
    let progress = progress_of(order.status);
    let money = |amount: f64| format!("{:.2} {}", amount, config.currency);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Order {} [{}] step {}/{}",
        order.id,
        order.status,
        progress.step + 1,
        progress.total
    );
    let _ = writeln!(out, "  Client:    {} ({})", order.client_name, order.client_phone);
    let _ = writeln!(out, "  Address:   {}", order.address);
    let _ = writeln!(out, "  Service:   {}", order.service_type);
    let _ = writeln!(out, "  Scheduled: {}", order.scheduled_time.format("%Y-%m-%d %H:%M UTC"));
    if let Some(notes) = &order.notes {
        let _ = writeln!(out, "  Notes:     {}", notes);
    }

    let _ = writeln!(
        out,
        "  Photos:    {} before, {} after (max {} each)",
        order.photos_before.len(),
        order.photos_after.len(),
        config.max_photos_per_stage
    );

    let (done, total) = order.checklist_progress();
    let _ = writeln!(out, "  Checklist: {}/{}", done, total);
    for item in &order.checklist {
        let mark = if item.completed { "x" } else { " " };
        let owner = match item.added_by {
            Actor::Dispatcher => "",
            Actor::Master => " (yours)",
        };
        let _ = writeln!(out, "    [{}] {} {}{}", mark, item.id, item.title, owner);
    }

    let _ = writeln!(out, "  Amount:    {}", money(order.amount_due()));
    if order.amount_was_changed() {
        if let Some(original) = order.original_amount {
            let reason = order.amount_change_reason.as_deref().unwrap_or("no reason given");
            let _ = writeln!(out, "    changed from {} ({})", money(original), reason);
        }
    }
    if let Some(method) = order.payment_method {
        let label = match method {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Qr => "QR",
        };
        let _ = writeln!(out, "  Paid by:   {}", label);
    }
    if let Some(received) = order.cash_received {
        let _ = writeln!(out, "  Received:  {}", money(received));
        if let Some(change) = order.cash_change().filter(|c| *c > 0.0) {
            let _ = writeln!(out, "  Change:    {}", money(change));
        }
    }

    let _ = write!(out, "Next: {}", stage_hint(order.status));
    out
}
