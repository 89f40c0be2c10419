//! Workflow commands - start work, finish a stage, reset

use std::path::Path;

use crate::domain::{is_payment_stage, transition_for_stage, BlockReason};
use crate::errors::{FieldError, Result};
use crate::fs::KeyValueStorage;
use crate::store::OrderStore;

use super::{current, describe_outcome, open_store};

/// Start work on a pending order
pub async fn run_start(data_dir: Option<&Path>) -> Result<()> {
    let (_, mut store) = open_store(data_dir)?;
    println!("{}", start(&mut store)?);
    Ok(())
}

/// Finish the current stage
pub async fn run_next_stage(data_dir: Option<&Path>) -> Result<()> {
    let (_, mut store) = open_store(data_dir)?;
    println!("{}", next_stage(&mut store)?);
    Ok(())
}

/// Discard the current order
pub async fn run_reset(data_dir: Option<&Path>) -> Result<()> {
    let (_, mut store) = open_store(data_dir)?;
    println!("{}", reset(&mut store));
    Ok(())
}

pub fn start<S: KeyValueStorage>(store: &mut OrderStore<S>) -> Result<String> {
    describe_outcome(store.start_work())
}

/// Apply the transition that leaves the current stage. Payment needs its
/// details, so the payment stages point at `pay` instead.
pub fn next_stage<S: KeyValueStorage>(store: &mut OrderStore<S>) -> Result<String> {
    let status = current(store)?.status;
    match transition_for_stage(status) {
        Some(step) => describe_outcome(store.transition(step)),
        None if is_payment_stage(status) => Err(FieldError::Rejected(
            "order is waiting for payment; use `pay`".to_string(),
        )),
        None => Err(FieldError::Rejected(BlockReason::Terminal.to_string())),
    }
}

pub fn reset<S: KeyValueStorage>(store: &mut OrderStore<S>) -> String {
    store.reset_order();
    match store.current_order() {
        Some(order) => format!("Order {} reset to {}", order.id, order.status),
        None => "Order reset".to_string(),
    }
}
