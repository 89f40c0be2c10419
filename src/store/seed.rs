//! Seed data: the fallback order for the master and the demo dataset for
//! the dispatcher

use chrono::{Duration, Utc};

use crate::schemas::{
    ChecklistItem, DispatcherOrder, Location, Master, Order, OrderStatus, Priority,
};

/// Id of the seed order
pub const SEED_ORDER_ID: &str = "ORD-2024-001";

/// The order used when nothing valid is stored
pub fn seed_order() -> Order {
    let mut order = Order::new(
        SEED_ORDER_ID,
        "Anna Petrova",
        "+7 (912) 345-67-89",
        "Lenina st. 24, apt. 15",
        "Air conditioner installation",
        Utc::now() + Duration::hours(2),
    )
    .with_checklist(vec![
        ChecklistItem::from_dispatcher("cl-1", "Check the mounting wall"),
        ChecklistItem::from_dispatcher("cl-2", "Install the indoor unit"),
        ChecklistItem::from_dispatcher("cl-3", "Install the outdoor unit"),
        ChecklistItem::from_dispatcher("cl-4", "Connect and test the system"),
    ])
    .with_payment_amount(8500.0);
    order.client_phone_raw = Some("79123456789".to_string());
    order.notes = Some("Intercom code 15K, 4th floor".to_string());
    order
}

/// The order a reset starts over with: the seed order with its checklist
/// discarded and no payment recorded
pub fn fresh_order() -> Order {
    seed_order().with_checklist(Vec::new())
}

/// The dispatcher's masters
pub fn seed_masters() -> Vec<Master> {
    vec![
        Master {
            id: "m-1".to_string(),
            name: "Sergey Ivanov".to_string(),
            phone: "+7 (901) 111-22-33".to_string(),
            rating: 4.9,
            completed_orders: 247,
            is_online: true,
            current_orders: 1,
            max_orders: 3,
            specialties: vec!["Air conditioner".to_string(), "Ventilation".to_string()],
            location: Some(Location {
                latitude: 55.7558,
                longitude: 37.6173,
            }),
        },
        Master {
            id: "m-2".to_string(),
            name: "Dmitry Smirnov".to_string(),
            phone: "+7 (902) 222-33-44".to_string(),
            rating: 4.7,
            completed_orders: 156,
            is_online: true,
            current_orders: 2,
            max_orders: 2,
            specialties: vec!["Plumbing".to_string(), "Heating".to_string()],
            location: None,
        },
        Master {
            id: "m-3".to_string(),
            name: "Alexey Kozlov".to_string(),
            phone: "+7 (903) 333-44-55".to_string(),
            rating: 4.8,
            completed_orders: 198,
            is_online: true,
            current_orders: 0,
            max_orders: 3,
            specialties: vec!["Electrical".to_string(), "Air conditioner".to_string()],
            location: None,
        },
        Master {
            id: "m-4".to_string(),
            name: "Mikhail Volkov".to_string(),
            phone: "+7 (904) 444-55-66".to_string(),
            rating: 4.5,
            completed_orders: 89,
            is_online: false,
            current_orders: 0,
            max_orders: 2,
            specialties: vec!["Plumbing".to_string()],
            location: None,
        },
    ]
}

/// The dispatcher's order collection
pub fn seed_dispatcher_orders() -> Vec<DispatcherOrder> {
    let now = Utc::now();

    let make = |id: &str, client: &str, service: &str, amount: f64, hours: i64| {
        Order::new(
            id,
            client,
            "+7 (900) 000-00-00",
            "Moscow",
            service,
            now + Duration::hours(hours),
        )
        .with_payment_amount(amount)
    };

    vec![
        DispatcherOrder {
            order: make("D-101", "Elena Sokolova", "Air conditioner cleaning", 3500.0, 3),
            master_id: None,
            priority: Priority::High,
            estimated_duration: 90,
            created_at: now,
            assigned_at: None,
        },
        DispatcherOrder {
            order: make("D-102", "Pavel Orlov", "Plumbing repair", 2500.0, 5)
                .with_status(OrderStatus::InProgress),
            master_id: Some("m-2".to_string()),
            priority: Priority::Medium,
            estimated_duration: 60,
            created_at: now,
            assigned_at: Some(now),
        },
        DispatcherOrder {
            order: make("D-103", "Olga Morozova", "Electrical wiring", 6000.0, 24),
            master_id: None,
            priority: Priority::Low,
            estimated_duration: 180,
            created_at: now - Duration::days(1),
            assigned_at: None,
        },
        DispatcherOrder {
            order: make("D-104", "Igor Lebedev", "Air conditioner installation", 8500.0, -4)
                .with_status(OrderStatus::Completed),
            master_id: Some("m-1".to_string()),
            priority: Priority::Medium,
            estimated_duration: 120,
            created_at: now,
            assigned_at: Some(now - Duration::hours(6)),
        },
    ]
}
