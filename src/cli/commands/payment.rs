//! Payment commands - edit the amount due and take payment

use std::path::Path;

use crate::errors::Result;
use crate::fs::KeyValueStorage;
use crate::schemas::{Config, PaymentMethod};
use crate::store::OrderStore;

use super::{current, describe_outcome, open_store, require};

/// Change the amount due
pub async fn run_amount(data_dir: Option<&Path>, amount: f64, reason: Option<&str>) -> Result<()> {
    let (config, mut store) = open_store(data_dir)?;
    println!("{}", amount_cmd(&mut store, &config, amount, reason)?);
    Ok(())
}

/// Confirm payment and complete the order
pub async fn run_pay(
    data_dir: Option<&Path>,
    method: PaymentMethod,
    received: Option<f64>,
) -> Result<()> {
    let (config, mut store) = open_store(data_dir)?;
    println!("{}", pay(&mut store, &config, method, received)?);
    Ok(())
}

pub fn amount_cmd<S: KeyValueStorage>(
    store: &mut OrderStore<S>,
    config: &Config,
    amount: f64,
    reason: Option<&str>,
) -> Result<String> {
    require(
        store.update_payment_amount(amount, reason),
        "amount must be a non-negative number",
    )?;
    let order = current(store)?;
    Ok(format!(
        "Amount due {:.2} {} (originally {:.2} {})",
        order.amount_due(),
        config.currency,
        order.original_amount.unwrap_or_else(|| order.amount_due()),
        config.currency
    ))
}

/// Record the method (and cash handed over) and complete the order
pub fn pay<S: KeyValueStorage>(
    store: &mut OrderStore<S>,
    config: &Config,
    method: PaymentMethod,
    received: Option<f64>,
) -> Result<String> {
    let mut line = describe_outcome(store.confirm_payment(Some(method), received))?;
    if let Some(change) = current(store)?.cash_change().filter(|c| *c > 0.0) {
        line.push_str(&format!("; change {:.2} {}", change, config.currency));
    }
    Ok(line)
}
