//! Photo command - Add or remove before/after photos

use std::path::Path;

use crate::cli::PhotoStage;
use crate::errors::Result;
use crate::fs::KeyValueStorage;
use crate::schemas::Config;
use crate::store::OrderStore;

use super::{current, open_store, require};

/// Append a photo to a stage
pub async fn run_add(data_dir: Option<&Path>, stage: PhotoStage, uri: &str) -> Result<()> {
    let (config, mut store) = open_store(data_dir)?;
    println!("{}", add(&mut store, &config, stage, uri)?);
    Ok(())
}

/// Remove a photo from a stage
pub async fn run_remove(data_dir: Option<&Path>, stage: PhotoStage, index: usize) -> Result<()> {
    let (_, mut store) = open_store(data_dir)?;
    println!("{}", remove(&mut store, stage, index)?);
    Ok(())
}

fn count<S: KeyValueStorage>(store: &OrderStore<S>, stage: PhotoStage) -> Result<usize> {
    let order = current(store)?;
    Ok(match stage {
        PhotoStage::Before => order.photos_before.len(),
        PhotoStage::After => order.photos_after.len(),
    })
}

pub fn add<S: KeyValueStorage>(
    store: &mut OrderStore<S>,
    config: &Config,
    stage: PhotoStage,
    uri: &str,
) -> Result<String> {
    let existing = count(store, stage)?;
    require(
        config.can_add_photo(existing),
        format!("at most {} photos per stage", config.max_photos_per_stage),
    )?;

    let accepted = match stage {
        PhotoStage::Before => store.add_photo_before(uri),
        PhotoStage::After => store.add_photo_after(uri),
    };
    require(accepted, "photo URI must not be blank")?;
    Ok(format!("{} photo(s) {}", count(store, stage)?, label(stage)))
}

pub fn remove<S: KeyValueStorage>(
    store: &mut OrderStore<S>,
    stage: PhotoStage,
    index: usize,
) -> Result<String> {
    let removed = match stage {
        PhotoStage::Before => store.remove_photo_before(index),
        PhotoStage::After => store.remove_photo_after(index),
    };
    require(removed, format!("no photo at position {}", index))?;
    Ok(format!("{} photo(s) {}", count(store, stage)?, label(stage)))
}

fn label(stage: PhotoStage) -> &'static str {
    match stage {
        PhotoStage::Before => "before",
        PhotoStage::After => "after",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::store_with;
    use crate::schemas::OrderStatus;

    #[test]
    fn test_add_and_remove_before() {
        let mut store = store_with(OrderStatus::InProgress);
        let config = Config::default();

        let line = add(&mut store, &config, PhotoStage::Before, "a.jpg").unwrap();
        assert_eq!(line, "1 photo(s) before");
        let line = add(&mut store, &config, PhotoStage::Before, "b.jpg").unwrap();
        assert_eq!(line, "2 photo(s) before");
        assert_eq!(remove(&mut store, PhotoStage::Before, 0).unwrap(), "1 photo(s) before");
        assert_eq!(store.current_order().unwrap().photos_before, vec!["b.jpg".to_string()]);
    }

    #[test]
    fn test_add_blank_uri_rejected() {
        let mut store = store_with(OrderStatus::Checklist);
        let err = add(&mut store, &Config::default(), PhotoStage::After, "  ").unwrap_err();
        assert_eq!(err.code(), "REJECTED");
    }

    #[test]
    fn test_add_respects_photo_limit() {
        let mut store = store_with(OrderStatus::InProgress);
        let config = Config {
            max_photos_per_stage: 1,
            ..Config::default()
        };
        add(&mut store, &config, PhotoStage::Before, "a.jpg").unwrap();
        let err = add(&mut store, &config, PhotoStage::Before, "b.jpg").unwrap_err();
        assert!(err.to_string().contains("at most 1"));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = store_with(OrderStatus::InProgress);
        assert!(remove(&mut store, PhotoStage::After, 3).is_err());
    }
}
