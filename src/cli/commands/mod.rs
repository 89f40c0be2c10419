//! CLI command implementations
//!
//! Each command has a `run` entry point used by the binary and a
//! storage-generic `execute` that returns the text to print.

pub mod checklist;
pub mod dispatch;
pub mod order;
pub mod payment;
pub mod photo;
pub mod show;

use std::path::Path;

use crate::config::load_config;
use crate::domain::TransitionOutcome;
use crate::errors::{FieldError, Result};
use crate::fs::{resolve_data_dir, FileStorage, KeyValueStorage};
use crate::schemas::{Config, Order};
use crate::store::OrderStore;

/// Open the order store over the data directory
pub(crate) fn open_store(data_dir: Option<&Path>) -> Result<(Config, OrderStore<FileStorage>)> {
    let dir = resolve_data_dir(data_dir);
    let config = load_config(&dir)?;
    tracing::debug!(data_dir = %dir.display(), "Opening order store");
    let store = OrderStore::open(FileStorage::new(dir), &config);
    Ok((config, store))
}

/// The loaded order, or an error when the store holds none
pub(crate) fn current<S: KeyValueStorage>(store: &OrderStore<S>) -> Result<std::sync::Arc<Order>> {
    store
        .current_order()
        .ok_or_else(|| FieldError::NotFound("no order loaded".to_string()))
}

/// Turn a transition outcome into the line to print, or a rejection
pub(crate) fn describe_outcome(outcome: TransitionOutcome) -> Result<String> {
    match outcome {
        TransitionOutcome::Applied { order } => {
            Ok(format!("Order {} is now {}", order.id, order.status))
        }
        TransitionOutcome::Blocked { reason } => Err(FieldError::Rejected(reason.to_string())),
    }
}

/// Map a refused store mutation to a rejection
pub(crate) fn require(accepted: bool, what: impl Into<String>) -> Result<()> {
    if accepted {
        Ok(())
    } else {
        Err(FieldError::Rejected(what.into()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BlockReason;
    use crate::store::seed_order;

    #[test]
    fn test_describe_applied() {
        let order = seed_order();
        let line = describe_outcome(TransitionOutcome::Applied { order }).unwrap();
        assert!(line.contains("pending"));
    }

    #[test]
    fn test_describe_blocked_is_rejection() {
        let err = describe_outcome(TransitionOutcome::Blocked {
            reason: BlockReason::NoPhotosBefore,
        })
        .unwrap_err();
        assert_eq!(err.code(), "REJECTED");
    }

    #[test]
    fn test_open_store_in_empty_dir_uses_seed() {
        let temp = tempfile::TempDir::new().unwrap();
        let (config, store) = open_store(Some(temp.path())).unwrap();
        assert_eq!(config.storage_key, "currentOrder");
        assert_eq!(current(&store).unwrap().id, crate::store::SEED_ORDER_ID);
    }
}
