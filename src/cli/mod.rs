//! CLI module for fieldmaster
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::schemas::{PaymentMethod, Priority};
use crate::store::OrderFilter;

/// Fieldmaster - walk a work order from arrival to payment
#[derive(Parser, Debug)]
#[command(name = "fieldmaster")]
#[command(version)]
#[command(about = "Walk a field-service work order from arrival to payment")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.json and the stored order
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

/// Which photo set a command works on
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStage {
    Before,
    After,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current order
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start work on a pending order
    Start,

    /// Add or remove photos
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },

    /// Manage checklist items
    Checklist {
        #[command(subcommand)]
        action: ChecklistAction,
    },

    /// Finish the current stage (photos before, checklist, photos after)
    NextStage,

    /// Change the amount due
    Amount {
        /// New amount
        amount: f64,

        /// Why the amount changed
        #[arg(long)]
        reason: Option<String>,
    },

    /// Confirm payment and complete the order
    Pay {
        /// Payment method (cash, qr)
        #[arg(long)]
        method: PaymentMethod,

        /// Cash handed over by the client
        #[arg(long)]
        received: Option<f64>,
    },

    /// Discard the current order and start over with a fresh one
    Reset,

    /// Dispatcher view over the demo dataset
    Dispatch {
        #[command(subcommand)]
        action: DispatchAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PhotoAction {
    /// Append a photo
    Add {
        #[arg(long, value_enum)]
        stage: PhotoStage,

        /// Photo URI
        uri: String,
    },

    /// Remove a photo by position (0-based)
    Remove {
        #[arg(long, value_enum)]
        stage: PhotoStage,

        index: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChecklistAction {
    /// Add a task
    Add { title: String },

    /// Mark a task completed
    Toggle {
        id: String,

        /// Mark as not completed instead
        #[arg(long)]
        undo: bool,
    },

    /// Remove a task you added
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DispatchAction {
    /// List orders
    List {
        /// Filter by status (all, pending, in_progress, completed)
        #[arg(long, default_value = "all")]
        filter: OrderFilter,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List masters
    Masters {
        /// Only masters that can take an order
        #[arg(long)]
        available: bool,

        /// Split available masters by fit for this order
        #[arg(long)]
        order: Option<String>,
    },

    /// Assign an order to a master (demo dataset; the change is not saved)
    Assign { order: String, master: String },

    /// Return an order to pending (demo dataset; the change is not saved)
    Unassign { order: String },

    /// Change an order's priority: low, medium, high (demo dataset; the
    /// change is not saved)
    Priority { order: String, priority: Priority },

    /// Show order and revenue stats
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
