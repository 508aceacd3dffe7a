// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use procura::{WorkflowConfig, WorkflowContext};
use procura_domain::{
    Department, JobOrder, Manpower, MaterialItem, PurchaseOrder, PurchaseOrderItem, Role,
    ServiceRequest, SupplierInfo,
};
use procura_persistence::Persistence;
use rust_decimal::Decimal;
use time::macros::datetime;

use crate::{
    ApprovalRequest, AuthenticatedActor, CreateJobOrderRequest, CreatePurchaseOrderRequest,
    CreateServiceRequestRequest, RecordingNotificationSink, StatusChangeRequest,
    approve_job_order, change_purchase_order_status, create_job_order, create_purchase_order,
    create_service_request, decide_purchase_order, decide_service_request,
};

/// The store, sink and context every handler test needs.
pub struct Harness {
    pub persistence: Persistence,
    pub sink: RecordingNotificationSink,
    pub ctx: WorkflowContext,
}

pub fn setup() -> Harness {
    Harness {
        persistence: Persistence::new_in_memory().expect("Failed to create persistence"),
        sink: RecordingNotificationSink::new(),
        ctx: WorkflowContext::new(datetime!(2025-03-03 10:00 UTC), WorkflowConfig::default()),
    }
}

pub fn actor(id: &str, role: Role, department: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(
        id.to_string(),
        format!("User {id}"),
        role,
        Department::canonical(department),
    )
}

pub fn requester() -> AuthenticatedActor {
    actor("req-1", Role::Requester, "IT")
}

pub fn it_head() -> AuthenticatedActor {
    actor("head-1", Role::Approver, "IT")
}

pub fn president() -> AuthenticatedActor {
    actor("pres-1", Role::Management, "President")
}

pub fn finance() -> AuthenticatedActor {
    actor("fin-1", Role::Approver, "Finance")
}

pub fn buyer() -> AuthenticatedActor {
    actor("buyer-1", Role::Approver, "Purchasing")
}

pub fn approval(action: &str) -> ApprovalRequest {
    ApprovalRequest {
        action: action.to_string(),
        role: None,
        comments: None,
    }
}

pub fn status(label: &str) -> StatusChangeRequest {
    StatusChangeRequest {
        status: label.to_string(),
    }
}

pub fn service_request_request() -> CreateServiceRequestRequest {
    CreateServiceRequestRequest {
        department: None,
        category: String::from("Technical Support"),
        priority: Some(String::from("HIGH")),
        title: String::from("Replace failing switch"),
        description: String::from("Core switch on floor 2 drops packets"),
        target_date: None,
        budget_source: None,
        save_as_draft: false,
    }
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

pub fn job_order_request(sr: &ServiceRequest, job_type: &str) -> CreateJobOrderRequest {
    let materials: Vec<MaterialItem> = if job_type == "MATERIAL_REQUISITION" {
        vec![material("Network switch", 2, 100)]
    } else {
        Vec::new()
    };
    CreateJobOrderRequest {
        service_request_id: sr.id.clone(),
        job_type: job_type.to_string(),
        work_description: String::from("Install replacement"),
        materials,
        manpower: Manpower::default(),
        estimated_total_cost: None,
        target_date: None,
    }
}

pub fn purchase_order_request(jo: &JobOrder, submit: bool) -> CreatePurchaseOrderRequest {
    CreatePurchaseOrderRequest {
        job_order_id: jo.id.clone(),
        items: vec![PurchaseOrderItem {
            description: String::from("Network switch"),
            quantity: Decimal::from(2),
            unit: String::from("pcs"),
            unit_price: Decimal::from(100),
            supplier_name: None,
            supplier_contact: None,
            delivery_date: None,
        }],
        supplier: SupplierInfo {
            name: Some(String::from("Acme Supplies")),
            address: None,
            contact: None,
        },
        tax_amount: Decimal::from(20),
        submit,
    }
}

/// Raises and approves a service request.
pub fn approved_service_request(h: &mut Harness) -> ServiceRequest {
    let sr: ServiceRequest = create_service_request(
        &mut h.persistence,
        &h.sink,
        &h.ctx,
        &requester(),
        service_request_request(),
    )
    .unwrap()
    .response
    .document;
    decide_service_request(
        &mut h.persistence,
        &h.sink,
        &h.ctx,
        &it_head(),
        &sr.id,
        approval("APPROVED"),
    )
    .unwrap()
    .response
    .document
}

/// Raises a job order of `job_type` and has the President approve it.
pub fn approved_job_order(h: &mut Harness, job_type: &str) -> JobOrder {
    let sr: ServiceRequest = approved_service_request(h);
    let jo: JobOrder = create_job_order(
        &mut h.persistence,
        &h.sink,
        &h.ctx,
        &it_head(),
        job_order_request(&sr, job_type),
    )
    .unwrap()
    .response
    .document;
    approve_job_order(
        &mut h.persistence,
        &h.sink,
        &h.ctx,
        &president(),
        &jo.id,
        approval("APPROVED"),
    )
    .unwrap()
    .response
    .document
}

/// Takes an approved material requisition through to a received purchase
/// order. Returns the job order, unchanged by the receipt, and the result of
/// marking the purchase order received.
pub fn received_purchase_order(
    h: &mut Harness,
) -> (JobOrder, crate::ApiResult<PurchaseOrder>) {
    let jo: JobOrder = approved_job_order(h, "MATERIAL_REQUISITION");
    let po: PurchaseOrder = create_purchase_order(
        &mut h.persistence,
        &h.sink,
        &h.ctx,
        &buyer(),
        purchase_order_request(&jo, true),
    )
    .unwrap()
    .response
    .document;
    decide_purchase_order(
        &mut h.persistence,
        &h.sink,
        &h.ctx,
        &president(),
        &po.id,
        approval("APPROVED"),
    )
    .unwrap();
    let received = change_purchase_order_status(
        &mut h.persistence,
        &h.sink,
        &h.ctx,
        &buyer(),
        &po.id,
        status("RECEIVED"),
    )
    .unwrap();
    (jo, received)
}
