//! Checklist command - Add, toggle and remove checklist tasks

use std::path::Path;

use crate::errors::{FieldError, Result};
use crate::fs::KeyValueStorage;
use crate::store::OrderStore;

use super::{current, open_store, require};

pub async fn run_add(data_dir: Option<&Path>, title: &str) -> Result<()> {
    let (_, mut store) = open_store(data_dir)?;
    println!("{}", add(&mut store, title)?);
    Ok(())
}

pub async fn run_toggle(data_dir: Option<&Path>, id: &str, completed: bool) -> Result<()> {
    let (_, mut store) = open_store(data_dir)?;
    println!("{}", toggle(&mut store, id, completed)?);
    Ok(())
}

pub async fn run_remove(data_dir: Option<&Path>, id: &str) -> Result<()> {
    let (_, mut store) = open_store(data_dir)?;
    println!("{}", remove(&mut store, id)?);
    Ok(())
}

fn summary<S: KeyValueStorage>(store: &OrderStore<S>) -> Result<String> {
    let (done, total) = current(store)?.checklist_progress();
    Ok(format!("Checklist {}/{}", done, total))
}

/// Add a task; prints the new task's id
pub fn add<S: KeyValueStorage>(store: &mut OrderStore<S>, title: &str) -> Result<String> {
    require(store.add_checklist_item(title), "task title must not be blank")?;
    let order = current(store)?;
    let id = order
        .checklist
        .last()
        .map(|item| item.id.clone())
        .unwrap_or_default();
    Ok(format!("Added {} ({})", id, summary(store)?))
}

pub fn toggle<S: KeyValueStorage>(
    store: &mut OrderStore<S>,
    id: &str,
    completed: bool,
) -> Result<String> {
    if !store.update_checklist_item(id, completed) {
        return Err(FieldError::NotFound(format!("checklist item {}", id)));
    }
    summary(store)
}

/// Remove a task the master added; dispatcher tasks stay
pub fn remove<S: KeyValueStorage>(store: &mut OrderStore<S>, id: &str) -> Result<String> {
    let order = current(store)?;
    let Some(item) = order.checklist.iter().find(|item| item.id == id) else {
        return Err(FieldError::NotFound(format!("checklist item {}", id)));
    };
    require(
        item.is_removable_by_master(),
        format!("{} was added by the dispatcher and cannot be removed", id),
    )?;
    require(store.remove_checklist_item(id), format!("cannot remove {}", id))?;
    summary(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::store_with;
    use crate::schemas::OrderStatus;

    #[test]
    fn test_toggle_dispatcher_item() {
        let mut store = store_with(OrderStatus::PhotoBefore);
        assert_eq!(toggle(&mut store, "cl-1", true).unwrap(), "Checklist 1/4");
        assert_eq!(toggle(&mut store, "cl-1", false).unwrap(), "Checklist 0/4");
    }

    #[test]
    fn test_toggle_unknown_item() {
        let mut store = store_with(OrderStatus::PhotoBefore);
        let err = toggle(&mut store, "cl-9", true).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_add_then_remove_own_item() {
        let mut store = store_with(OrderStatus::PhotoBefore);
        let line = add(&mut store, "  Clean up  ").unwrap();
        assert!(line.ends_with("(Checklist 0/5)"));

        let id = store.current_order().unwrap().checklist[4].id.clone();
        assert_eq!(remove(&mut store, &id).unwrap(), "Checklist 0/4");
    }

    #[test]
    fn test_remove_dispatcher_item_rejected() {
        let mut store = store_with(OrderStatus::PhotoBefore);
        let err = remove(&mut store, "cl-2").unwrap_err();
        assert_eq!(err.code(), "REJECTED");
        assert_eq!(store.current_order().unwrap().checklist.len(), 4);
    }

    #[test]
    fn test_add_blank_title_rejected() {
        let mut store = store_with(OrderStatus::PhotoBefore);
        assert!(add(&mut store, "   ").is_err());
    }
}
