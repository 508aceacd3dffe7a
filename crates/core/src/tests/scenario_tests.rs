// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end walks through the procurement chain.

use crate::tests::helpers::{
    create_test_actor, create_test_context, create_test_requester, create_test_super_admin,
    identity, job_order_draft, material, purchase_order_draft, purchase_order_item,
    service_request_draft,
};
use crate::{
    FollowUp, JobOrderCommand, PurchaseOrderCommand, ServiceRequestCommand, SignOff,
    advance_job_order_on_receipt, apply_job_order, apply_purchase_order, apply_service_request,
    create_job_order, create_purchase_order, create_service_request,
};
use procura_domain::{
    ApprovalAction, JobOrderStatus, JobOrderType, LedgerRole, PurchaseOrderStatus, Role,
    ServiceRequest, ServiceRequestStatus,
};
use procura_events::{NotificationKind, Recipient};
use rust_decimal::Decimal;

fn approved_request() -> ServiceRequest {
    let ctx = create_test_context();
    let submitted = create_service_request(
        identity("SR-2025-0001"),
        service_request_draft(),
        &create_test_requester(),
        &ctx,
    )
    .unwrap();
    assert_eq!(submitted.document.status, ServiceRequestStatus::Submitted);
    assert_eq!(
        submitted.notification.unwrap().kind,
        NotificationKind::ServiceRequestSubmitted
    );

    let approved = apply_service_request(
        &submitted.document,
        ServiceRequestCommand::Decide(SignOff::new(
            LedgerRole::DepartmentHead,
            ApprovalAction::Approved,
            Some(String::from("go ahead")),
        )),
        &create_test_actor("head-1", Role::Approver, "IT Department"),
        &ctx,
    )
    .unwrap();
    assert_eq!(approved.document.status, ServiceRequestStatus::Approved);
    approved.document
}

#[test]
fn test_service_job_order_approved_by_president() {
    let ctx = create_test_context();
    let sr = approved_request();

    let jo = create_job_order(
        identity("JO-2025-0001"),
        &sr,
        None,
        job_order_draft(JobOrderType::Service, vec![]),
        &ctx,
    )
    .unwrap()
    .document;
    assert_eq!(jo.status, JobOrderStatus::Draft);

    let approved = apply_job_order(
        &jo,
        JobOrderCommand::Approve(SignOff::new(
            LedgerRole::Management,
            ApprovalAction::Approved,
            None,
        )),
        &create_test_super_admin(),
        &ctx,
    )
    .unwrap()
    .document;
    assert_eq!(approved.status, JobOrderStatus::Approved);
    assert_eq!(approved.approvals.len(), 1);
}

#[test]
fn test_material_requisition_needs_both_budget_sign_offs() {
    let ctx = create_test_context();
    let jo = create_job_order(
        identity("JO-2025-0001"),
        &approved_request(),
        None,
        job_order_draft(
            JobOrderType::MaterialRequisition,
            vec![material("Network switch", 2, 100)],
        ),
        &ctx,
    )
    .unwrap()
    .document;
    assert_eq!(jo.budget.estimated_total_cost, Decimal::from(200));

    let finance = apply_job_order(
        &jo,
        JobOrderCommand::Approve(SignOff::new(
            LedgerRole::Finance,
            ApprovalAction::BudgetApproved,
            None,
        )),
        &create_test_actor("fin-1", Role::Approver, "Finance"),
        &ctx,
    )
    .unwrap()
    .document;
    assert_eq!(finance.status, JobOrderStatus::Draft);

    let president = apply_job_order(
        &finance,
        JobOrderCommand::Approve(SignOff::new(
            LedgerRole::Management,
            ApprovalAction::BudgetApproved,
            None,
        )),
        &create_test_actor("pres-1", Role::Management, "President"),
        &ctx,
    )
    .unwrap();
    assert_eq!(president.document.status, JobOrderStatus::Approved);
    assert_eq!(
        president.notification.unwrap().recipient,
        Recipient::LedgerRole {
            role: LedgerRole::Purchasing
        }
    );
}

#[test]
fn test_received_purchase_order_starts_job_order() {
    let ctx = create_test_context();
    let admin = create_test_super_admin();

    let jo = create_job_order(
        identity("JO-2025-0001"),
        &approved_request(),
        None,
        job_order_draft(
            JobOrderType::MaterialRequisition,
            vec![material("Network switch", 2, 100)],
        ),
        &ctx,
    )
    .unwrap()
    .document;
    let jo = apply_job_order(
        &jo,
        JobOrderCommand::Approve(SignOff::new(
            LedgerRole::Management,
            ApprovalAction::Approved,
            None,
        )),
        &admin,
        &ctx,
    )
    .unwrap()
    .document;

    let po = create_purchase_order(
        identity("PO-2025-0001"),
        &jo,
        None,
        purchase_order_draft(vec![purchase_order_item("Network switch", 2, 100)], 20),
        &admin,
        &ctx,
    )
    .unwrap()
    .document;
    assert_eq!(po.total_amount, Decimal::from(220));

    let received = apply_purchase_order(
        &po,
        PurchaseOrderCommand::ChangeStatus {
            status: PurchaseOrderStatus::Received,
        },
        &admin,
        &ctx,
    )
    .unwrap();
    assert_eq!(received.document.status, PurchaseOrderStatus::Received);

    let mut current = jo;
    for follow_up in received.follow_ups {
        let FollowUp::AdvanceJobOrderOnReceipt {
            job_order_id,
            purchase_order_number,
        } = follow_up;
        assert_eq!(job_order_id, current.id);
        if let Some(advanced) = advance_job_order_on_receipt(&current, &purchase_order_number, &ctx)
        {
            current = advanced.document;
        }
    }
    assert_eq!(current.status, JobOrderStatus::InProgress);
}
