// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod document_tests;
mod numbering_tests;

use procura_domain::{
    ApprovalLedger, Budget, Department, Execution, JobOrder, JobOrderStatus, JobOrderType,
    Manpower, MaterialTransfer, Priority, ServiceCategory, ServiceRequest, ServiceRequestStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_time() -> OffsetDateTime {
    datetime!(2025-02-10 08:30 UTC)
}

pub fn create_test_service_request(id: &str, number: &str) -> ServiceRequest {
    ServiceRequest {
        id: id.to_string(),
        number: number.to_string(),
        requester_id: String::from("req-1"),
        requester_name: String::from("Rita Requester"),
        department: Department::canonical("IT"),
        category: ServiceCategory::TechnicalSupport,
        priority: Priority::Medium,
        title: String::from("Replace projector"),
        description: String::from("Conference room B projector is dead"),
        requested_date: create_test_time(),
        target_date: None,
        budget_source: None,
        status: ServiceRequestStatus::Submitted,
        approvals: ApprovalLedger::new(),
        created_at: create_test_time(),
        updated_at: create_test_time(),
    }
}

pub fn create_test_job_order(id: &str, number: &str, sr: &ServiceRequest) -> JobOrder {
    JobOrder {
        id: id.to_string(),
        number: number.to_string(),
        service_request_id: sr.id.clone(),
        service_request_number: sr.number.clone(),
        job_type: JobOrderType::MaterialRequisition,
        status: JobOrderStatus::Draft,
        requester_id: sr.requester_id.clone(),
        requester_name: sr.requester_name.clone(),
        department: sr.department.clone(),
        category: sr.category,
        priority: sr.priority,
        handling_department: sr.category.handling_department(),
        requested_date: sr.requested_date,
        target_date: None,
        work_description: String::from("Procure replacement projector"),
        materials: vec![],
        manpower: Manpower::default(),
        budget: Budget::default(),
        execution: Execution::default(),
        acceptance: None,
        transfer: MaterialTransfer::default(),
        approvals: ApprovalLedger::new(),
        created_at: create_test_time(),
        updated_at: create_test_time(),
    }
}
