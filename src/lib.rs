//! Fieldmaster - field-service order workflow
//!
//! This library provides the core of a field-service app, including:
//! - Schema definitions for orders, checklist items, masters and dispatcher orders
//! - Domain logic for order statuses, transition guards and transitions
//! - The master's order store with local persistence
//! - The dispatcher's assignment store and derived stats
//! - File system utilities and key/value storage backends
//! - A command-line front end

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod store;

// Re-export commonly used types
pub use domain::{BlockReason, OrderTransition, TransitionOutcome};
pub use errors::{FieldError, Result};
pub use schemas::{Config, DispatcherOrder, Master, Order, OrderStatus, PaymentMethod};
pub use store::{DispatcherStore, OrderStore};
