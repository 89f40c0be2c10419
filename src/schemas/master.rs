//! Dispatcher-side schemas - masters and the orders assigned to them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Order;

/// Geographic position of a master
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A field technician as seen by the dispatcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Master {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub rating: f64,
    pub completed_orders: u32,
    pub is_online: bool,
    /// Orders currently assigned; never negative
    pub current_orders: u32,
    pub max_orders: u32,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Master {
    /// Online with spare capacity
    pub fn is_available(&self) -> bool {
        self.is_online && self.current_orders < self.max_orders
    }

    /// Case-insensitive match between a specialty and a service type,
    /// in either direction ("AC" matches "AC installation" and vice versa).
    /// Blank specialties and a blank service type never match.
    pub fn matches_service(&self, service_type: &str) -> bool {
        let service = service_type.trim().to_lowercase();
        if service.is_empty() {
            return false;
        }
        self.specialties
            .iter()
            .map(|specialty| specialty.trim().to_lowercase())
            .filter(|specialty| !specialty.is_empty())
            .any(|specialty| service.contains(&specialty) || specialty.contains(&service))
    }
}

/// Dispatcher urgency for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// An order in the dispatcher's collection.
///
/// The owning master is referenced by id only; display names are
/// resolved through the dispatcher store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatcherOrder {
    #[serde(flatten)]
    pub order: Order,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_id: Option<String>,

    pub priority: Priority,

    /// Expected duration in minutes
    pub estimated_duration: u32,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,
}

impl DispatcherOrder {
    pub fn id(&self) -> &str {
        &self.order.id
    }
}
