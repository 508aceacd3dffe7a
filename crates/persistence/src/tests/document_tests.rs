// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_job_order, create_test_service_request};
use crate::{Persistence, PersistenceError};
use procura_domain::{
    ApprovalAction, ApprovalRecord, JobOrder, JobOrderStatus, LedgerRole, MaterialItem,
    PurchaseOrder, RejectDuplicate, ServiceRequest, ServiceRequestStatus,
};
use rust_decimal::Decimal;

#[test]
fn test_insert_and_get_round_trips_the_body() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let mut sr = create_test_service_request("sr-1", "SR-2025-0001");
    sr.approvals.record(
        &RejectDuplicate,
        ApprovalRecord {
            role: LedgerRole::DepartmentHead,
            user_id: String::from("head-1"),
            user_name: String::from("Hank Head"),
            action: ApprovalAction::Approved,
            timestamp: sr.created_at,
            comments: Some(String::from("ok")),
        },
    );
    persistence.insert(&sr).unwrap();

    let stored: ServiceRequest = persistence.get("sr-1").unwrap().unwrap();
    assert_eq!(stored, sr);
}

#[test]
fn test_get_is_scoped_by_kind() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .insert(&create_test_service_request("sr-1", "SR-2025-0001"))
        .unwrap();

    assert!(persistence.get::<JobOrder>("sr-1").unwrap().is_none());
    assert!(persistence.get::<ServiceRequest>("missing").unwrap().is_none());
}

#[test]
fn test_save_overwrites_whole_document() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let sr = create_test_service_request("sr-1", "SR-2025-0001");
    persistence.insert(&sr).unwrap();

    let mut first = sr.clone();
    first.title = String::from("First writer");
    let mut second = sr;
    second.status = ServiceRequestStatus::Rejected;

    persistence.save(&first).unwrap();
    persistence.save(&second).unwrap();

    // Last writer wins: the first writer's title change is lost.
    let stored: ServiceRequest = persistence.get("sr-1").unwrap().unwrap();
    assert_eq!(stored.title, "Replace projector");
    assert_eq!(stored.status, ServiceRequestStatus::Rejected);
}

#[test]
fn test_save_requires_existing_document() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let result = persistence.save(&create_test_service_request("sr-9", "SR-2025-0009"));
    assert!(matches!(
        result,
        Err(PersistenceError::DocumentNotFound { .. })
    ));
}

#[test]
fn test_duplicate_number_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .insert(&create_test_service_request("sr-1", "SR-2025-0001"))
        .unwrap();
    let result = persistence.insert(&create_test_service_request("sr-2", "SR-2025-0001"));
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_second_job_order_for_request_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let sr = create_test_service_request("sr-1", "SR-2025-0001");
    let other = create_test_service_request("sr-2", "SR-2025-0002");
    persistence.insert(&sr).unwrap();
    persistence.insert(&other).unwrap();
    persistence
        .insert(&create_test_job_order("jo-1", "JO-2025-0001", &sr))
        .unwrap();

    let result = persistence.insert(&create_test_job_order("jo-2", "JO-2025-0002", &sr));
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));

    persistence
        .insert(&create_test_job_order("jo-3", "JO-2025-0003", &other))
        .unwrap();
    assert_eq!(persistence.list::<JobOrder>().unwrap().len(), 2);
}

#[test]
fn test_child_requires_stored_parent() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let sr = create_test_service_request("sr-1", "SR-2025-0001");
    let jo = create_test_job_order("jo-1", "JO-2025-0001", &sr);

    assert!(persistence.insert(&jo).is_err());

    persistence.insert(&sr).unwrap();
    persistence.insert(&jo).unwrap();
}

#[test]
fn test_find_by_parent() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let sr = create_test_service_request("sr-1", "SR-2025-0001");
    let mut jo = create_test_job_order("jo-1", "JO-2025-0001", &sr);
    jo.materials.push(MaterialItem {
        description: String::from("Projector"),
        quantity: Decimal::ONE,
        unit: String::from("unit"),
        estimated_cost: Decimal::new(45_000, 2),
        supplier: None,
    });
    persistence.insert(&sr).unwrap();
    persistence.insert(&jo).unwrap();

    let found: JobOrder = persistence.find_by_parent("sr-1").unwrap().unwrap();
    assert_eq!(found.number, "JO-2025-0001");
    assert_eq!(found.materials[0].estimated_cost, Decimal::new(45_000, 2));

    assert!(
        persistence
            .find_by_parent::<PurchaseOrder>("jo-1")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_list_returns_kind_only() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let sr = create_test_service_request("sr-1", "SR-2025-0001");
    let mut jo = create_test_job_order("jo-1", "JO-2025-0001", &sr);
    jo.status = JobOrderStatus::Approved;
    persistence.insert(&sr).unwrap();
    persistence
        .insert(&create_test_service_request("sr-2", "SR-2025-0002"))
        .unwrap();
    persistence.insert(&jo).unwrap();

    assert_eq!(persistence.list::<ServiceRequest>().unwrap().len(), 2);
    let job_orders: Vec<JobOrder> = persistence.list().unwrap();
    assert_eq!(job_orders.len(), 1);
    assert_eq!(job_orders[0].status, JobOrderStatus::Approved);
}
