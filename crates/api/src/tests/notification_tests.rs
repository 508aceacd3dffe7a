// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use procura_domain::ServiceRequest;
use procura_events::{NotificationEvent, NotificationKind, Recipient};

use crate::tests::helpers::{requester, service_request_request, setup};
use crate::{NotificationError, NotificationSink, create_service_request, get_document};

struct FailingSink;

impl NotificationSink for FailingSink {
    fn deliver(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        Err(NotificationError::NoAddress {
            recipient: event.recipient.to_string(),
        })
    }
}

#[test]
fn test_failed_delivery_does_not_fail_the_action() {
    let mut h = setup();

    let sr = create_service_request(
        &mut h.persistence,
        &FailingSink,
        &h.ctx,
        &requester(),
        service_request_request(),
    )
    .unwrap()
    .response
    .document;

    let stored: ServiceRequest = get_document(&mut h.persistence, &sr.id).unwrap();
    assert_eq!(stored.number, sr.number);
}

#[test]
fn test_submission_notifies_requesting_department() {
    let mut h = setup();
    let sr = create_service_request(
        &mut h.persistence,
        &h.sink,
        &h.ctx,
        &requester(),
        service_request_request(),
    )
    .unwrap()
    .response
    .document;

    let events = h.sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, NotificationKind::ServiceRequestSubmitted);
    assert_eq!(events[0].entity_id, sr.id);
    assert_eq!(
        events[0].recipient,
        Recipient::Department {
            department: sr.department
        }
    );
}
