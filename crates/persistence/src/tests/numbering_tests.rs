// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::{create_test_job_order, create_test_service_request};
use procura_domain::DocumentKind;

#[test]
fn test_first_number_of_year() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(
        persistence
            .next_number(DocumentKind::ServiceRequest, 2025)
            .unwrap(),
        "SR-2025-0001"
    );
}

#[test]
fn test_numbers_are_sequential_per_kind_and_year() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let sr = create_test_service_request("sr-1", "SR-2025-0001");
    persistence.insert(&sr).unwrap();
    persistence
        .insert(&create_test_service_request("sr-2", "SR-2025-0002"))
        .unwrap();
    persistence
        .insert(&create_test_service_request("sr-3", "SR-2024-0007"))
        .unwrap();
    persistence
        .insert(&create_test_job_order("jo-1", "JO-2025-0001", &sr))
        .unwrap();

    assert_eq!(
        persistence
            .next_number(DocumentKind::ServiceRequest, 2025)
            .unwrap(),
        "SR-2025-0003"
    );
    assert_eq!(
        persistence
            .next_number(DocumentKind::ServiceRequest, 2026)
            .unwrap(),
        "SR-2026-0001"
    );
    assert_eq!(
        persistence.next_number(DocumentKind::JobOrder, 2025).unwrap(),
        "JO-2025-0002"
    );
    assert_eq!(
        persistence
            .next_number(DocumentKind::PurchaseOrder, 2025)
            .unwrap(),
        "PO-2025-0001"
    );
}
