// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    JobOrderDraft, NewDocument, PurchaseOrderDraft, ServiceRequestCommand, ServiceRequestDraft,
    SignOff, WorkflowConfig, WorkflowContext, apply_service_request, create_job_order,
    create_service_request,
};
use procura_domain::{
    ApprovalAction, Department, JobOrder, JobOrderType, LedgerRole, Manpower, MaterialItem,
    Priority, PurchaseOrderItem, Role, ServiceCategory, ServiceRequest, SupplierInfo,
};
use procura_events::Actor;
use rust_decimal::Decimal;
use time::macros::datetime;

pub fn create_test_context() -> WorkflowContext {
    WorkflowContext::new(datetime!(2025-01-15 09:00 UTC), WorkflowConfig::default())
}

pub fn create_test_requester() -> Actor {
    Actor::new(
        String::from("req-1"),
        String::from("Rita Requester"),
        Role::Requester,
        Department::canonical("IT Department"),
    )
}

pub fn create_test_actor(id: &str, role: Role, department: &str) -> Actor {
    Actor::new(
        id.to_string(),
        format!("User {id}"),
        role,
        Department::canonical(department),
    )
}

pub fn create_test_super_admin() -> Actor {
    create_test_actor("sa-1", Role::SuperAdmin, "Administration")
}

pub fn identity(number: &str) -> NewDocument {
    NewDocument::new(number.to_lowercase(), number.to_string())
}

pub fn service_request_draft() -> ServiceRequestDraft {
    ServiceRequestDraft {
        department: Department::canonical("IT Department"),
        category: ServiceCategory::TechnicalSupport,
        priority: Priority::High,
        title: String::from("Replace failing switch"),
        description: String::from("Core switch on floor 2 drops packets"),
        requested_date: None,
        target_date: None,
        budget_source: Some(String::from("OPEX")),
        save_as_draft: false,
    }
}

pub fn submitted_service_request() -> ServiceRequest {
    create_service_request(
        identity("SR-2025-0001"),
        service_request_draft(),
        &create_test_requester(),
        &create_test_context(),
    )
    .unwrap()
    .document
}

pub fn approved_service_request() -> ServiceRequest {
    let head: Actor = create_test_actor("head-1", Role::Approver, "IT");
    apply_service_request(
        &submitted_service_request(),
        ServiceRequestCommand::Decide(SignOff::new(
            LedgerRole::DepartmentHead,
            ApprovalAction::Approved,
            None,
        )),
        &head,
        &create_test_context(),
    )
    .unwrap()
    .document
}

pub fn material(description: &str, quantity: i64, estimated_cost: i64) -> MaterialItem {
    MaterialItem {
        description: description.to_string(),
        quantity: Decimal::from(quantity),
        unit: String::from("pcs"),
        estimated_cost: Decimal::from(estimated_cost),
        supplier: None,
    }
}

pub fn job_order_draft(job_type: JobOrderType, materials: Vec<MaterialItem>) -> JobOrderDraft {
    JobOrderDraft {
        job_type,
        work_description: String::from("Install replacement"),
        materials,
        manpower: Manpower::default(),
        estimated_total_cost: None,
        target_date: None,
    }
}

pub fn job_order(job_type: JobOrderType, materials: Vec<MaterialItem>) -> JobOrder {
    job_order_with(job_type, materials, &create_test_context())
}

pub fn job_order_with(
    job_type: JobOrderType,
    materials: Vec<MaterialItem>,
    ctx: &WorkflowContext,
) -> JobOrder {
    create_job_order(
        identity("JO-2025-0001"),
        &approved_service_request(),
        None,
        job_order_draft(job_type, materials),
        ctx,
    )
    .unwrap()
    .document
}

pub fn purchase_order_item(description: &str, quantity: i64, unit_price: i64) -> PurchaseOrderItem {
    PurchaseOrderItem {
        description: description.to_string(),
        quantity: Decimal::from(quantity),
        unit: String::from("pcs"),
        unit_price: Decimal::from(unit_price),
        supplier_name: None,
        supplier_contact: None,
        delivery_date: None,
    }
}

pub fn purchase_order_draft(items: Vec<PurchaseOrderItem>, tax: i64) -> PurchaseOrderDraft {
    PurchaseOrderDraft {
        items,
        supplier: SupplierInfo {
            name: Some(String::from("Acme Supplies")),
            address: None,
            contact: None,
        },
        tax_amount: Decimal::from(tax),
        submit_as: None,
    }
}
