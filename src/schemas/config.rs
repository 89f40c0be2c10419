//! Config schema - Configuration for fieldmaster

use serde::{Deserialize, Serialize};

/// Main configuration for fieldmaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storage key of the persisted current order
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Photos the capture screen lets a master take per stage
    #[serde(default = "default_max_photos_per_stage")]
    pub max_photos_per_stage: usize,

    /// Currency sign used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_storage_key() -> String {
    "currentOrder".to_string()
}

fn default_max_photos_per_stage() -> usize {
    5
}

fn default_currency() -> String {
    "₽".to_string()
}

impl Config {
    /// Whether a stage holding `existing` photos can take another one
    pub fn can_add_photo(&self, existing: usize) -> bool {
        existing < self.max_photos_per_stage
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key: default_storage_key(),
            max_photos_per_stage: default_max_photos_per_stage(),
            currency: default_currency(),
        }
    }
}
