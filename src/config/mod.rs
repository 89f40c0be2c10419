//! Configuration for fieldmaster

mod loader;

pub use loader::load_config;
