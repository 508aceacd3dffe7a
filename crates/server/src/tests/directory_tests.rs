// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use procura_api::{NotificationError, NotificationSink};
use procura_domain::{DocumentKind, LedgerRole};
use procura_events::{NotificationEvent, NotificationKind, Recipient};
use std::collections::HashMap;
use time::macros::datetime;

use crate::directory::{DirectoryNotificationSink, LogNotificationSink};

fn event(recipient: Recipient) -> NotificationEvent {
    NotificationEvent::new(
        NotificationKind::PurchaseOrderSubmitted,
        DocumentKind::PurchaseOrder,
        String::from("po-1"),
        String::from("PO-2025-0001"),
        recipient,
        String::from("Purchase order PO-2025-0001 awaits President approval"),
        datetime!(2025-03-03 10:00 UTC),
    )
}

#[test]
fn test_directory_resolves_configured_recipient() {
    let sink = DirectoryNotificationSink::new(HashMap::from([(
        String::from("role:MANAGEMENT"),
        String::from("president@example.com"),
    )]));

    assert_eq!(
        sink.address_for("role:MANAGEMENT"),
        Some("president@example.com")
    );
    assert!(
        sink.deliver(&event(Recipient::LedgerRole {
            role: LedgerRole::Management
        }))
        .is_ok()
    );
}

#[test]
fn test_directory_reports_unknown_recipient() {
    let sink = DirectoryNotificationSink::default();

    let err = sink
        .deliver(&event(Recipient::LedgerRole {
            role: LedgerRole::Finance,
        }))
        .unwrap_err();
    assert_eq!(
        err,
        NotificationError::NoAddress {
            recipient: String::from("role:FINANCE")
        }
    );
}

#[test]
fn test_directory_loads_from_json_file() {
    let path = std::env::temp_dir().join(format!(
        "procura-directory-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{"department:IT": "it-heads@example.com"}"#).unwrap();

    let sink = DirectoryNotificationSink::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(
        sink.address_for("department:IT"),
        Some("it-heads@example.com")
    );
}

#[test]
fn test_directory_rejects_malformed_file() {
    let path = std::env::temp_dir().join(format!(
        "procura-directory-bad-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let result = DirectoryNotificationSink::from_file(&path);
    std::fs::remove_file(&path).unwrap();

    assert!(result.is_err());
}

#[test]
fn test_log_sink_accepts_everything() {
    assert!(
        LogNotificationSink
            .deliver(&event(Recipient::User {
                id: String::from("req-1"),
                name: String::from("Rita"),
            }))
            .is_ok()
    );
}
