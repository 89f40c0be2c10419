//! File system utilities for fieldmaster
//!
//! Provides path resolution, JSON file operations and key/value storage.

mod json;
mod paths;
mod storage;

pub use json::{read_config, read_json, write_atomic, write_json};
pub use paths::{
    get_config_path, get_record_path, resolve_cwd, resolve_data_dir, resolve_data_dir_from,
    DATA_DIR_ENV, DEFAULT_DATA_DIR_NAME,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
