// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, NotificationEvent, NotificationKind, Recipient};
use procura_domain::{Department, DocumentKind, LedgerRole, Role};
use time::macros::datetime;

fn create_test_actor() -> Actor {
    Actor::new(
        String::from("u-42"),
        String::from("Ana Reyes"),
        Role::Requester,
        Department::canonical("IT Department"),
    )
}

#[test]
fn test_actor_creation() {
    let actor: Actor = create_test_actor();
    assert_eq!(actor.id, "u-42");
    assert_eq!(actor.department, Department::It);
    assert_eq!(
        actor.as_recipient(),
        Recipient::User {
            id: String::from("u-42"),
            name: String::from("Ana Reyes"),
        }
    );
}

#[test]
fn test_recipient_display() {
    assert_eq!(
        Recipient::LedgerRole {
            role: LedgerRole::Finance
        }
        .to_string(),
        "role:FINANCE"
    );
    assert_eq!(
        Recipient::Department {
            department: Department::Maintenance
        }
        .to_string(),
        "department:Maintenance"
    );
    assert_eq!(create_test_actor().as_recipient().to_string(), "user:u-42");
}

#[test]
fn test_notification_event_serializes() {
    let event: NotificationEvent = NotificationEvent::new(
        NotificationKind::PurchaseOrderReceived,
        DocumentKind::PurchaseOrder,
        String::from("po-1"),
        String::from("PO-2025-0001"),
        Recipient::Department {
            department: Department::It,
        },
        String::from("Purchase order PO-2025-0001 received"),
        datetime!(2025-04-02 10:30 UTC),
    );

    let json: serde_json::Value = serde_json::to_value(&event).unwrap();
    assert_eq!(json["kind"], "PURCHASE_ORDER_RECEIVED");
    assert_eq!(json["entity_type"], "PURCHASE_ORDER");
    assert_eq!(json["recipient"]["type"], "department");
    assert_eq!(json["recipient"]["department"], "IT");
    assert_eq!(json["occurred_at"], "2025-04-02T10:30:00Z");
}
