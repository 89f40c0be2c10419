//! Schema types for fieldmaster
//!
//! Field names serialize in camelCase to match the persisted order record.

mod config;
mod master;
mod order;

pub use config::Config;
pub use master::{DispatcherOrder, Location, Master, Priority};
pub use order::{Actor, ChecklistItem, Order, OrderStatus, PaymentMethod};
