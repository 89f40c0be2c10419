//! Stores owning the application state
//!
//! The order store holds the master's single active order; the dispatcher
//! store holds the masters and the dispatcher's order collection.

mod dispatcher;
mod order;
mod seed;


pub use dispatcher::{AssignOutcome, DispatcherStore, OrderFilter, OrdersStats};
pub use order::{decode_stored_order, LoadSource, OrderSnapshot, OrderStore, StoredOrder};
pub use seed::{fresh_order, seed_dispatcher_orders, seed_masters, seed_order, SEED_ORDER_ID};
