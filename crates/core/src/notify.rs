// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification routing.
//!
//! Decides who hears about each workflow step. Recipients are abstract
//! (ledger role, department, user); the delivery channel resolves them.

use procura_domain::{
    ApprovalAction, ApprovalLedger, Document, JobOrder, JobOrderStatus, JobOrderType, LedgerRole,
    PurchaseOrder, ServiceRequest,
};
use procura_events::{NotificationEvent, NotificationKind, Recipient};
use time::OffsetDateTime;

fn event<D: Document>(
    document: &D,
    kind: NotificationKind,
    recipient: Recipient,
    label: String,
    now: OffsetDateTime,
) -> NotificationEvent {
    NotificationEvent::new(
        kind,
        D::KIND,
        document.id().to_string(),
        document.number().to_string(),
        recipient,
        label,
        now,
    )
}

const fn role(role: LedgerRole) -> Recipient {
    Recipient::LedgerRole { role }
}

fn requester(id: &str, name: &str) -> Recipient {
    Recipient::User {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn service_request_submitted(sr: &ServiceRequest, now: OffsetDateTime) -> NotificationEvent {
    event(
        sr,
        NotificationKind::ServiceRequestSubmitted,
        Recipient::Department {
            department: sr.department.clone(),
        },
        format!("Service request {} awaits department head review", sr.number),
        now,
    )
}

/// Approval goes to the handling department so it can raise a job order;
/// rejection goes back to the requester.
pub fn service_request_decided(
    sr: &ServiceRequest,
    approved: bool,
    now: OffsetDateTime,
) -> NotificationEvent {
    if approved {
        event(
            sr,
            NotificationKind::ServiceRequestApproved,
            Recipient::Department {
                department: sr.category.handling_department(),
            },
            format!(
                "Service request {} approved; a job order can be created",
                sr.number
            ),
            now,
        )
    } else {
        event(
            sr,
            NotificationKind::ServiceRequestRejected,
            requester(&sr.requester_id, &sr.requester_name),
            format!("Service request {} was rejected", sr.number),
            now,
        )
    }
}

pub fn job_order_created(jo: &JobOrder, now: OffsetDateTime) -> NotificationEvent {
    let (recipient, label): (Recipient, String) = match (jo.job_type, jo.status) {
        (JobOrderType::Service, _) => (
            role(LedgerRole::Management),
            format!("Job order {} awaits President approval", jo.number),
        ),
        (JobOrderType::MaterialRequisition, JobOrderStatus::PendingCanvass) => (
            role(LedgerRole::Purchasing),
            format!("Material requisition {} awaits canvass", jo.number),
        ),
        (JobOrderType::MaterialRequisition, _) => (
            role(LedgerRole::Finance),
            format!("Material requisition {} awaits budget review", jo.number),
        ),
    };
    event(jo, NotificationKind::JobOrderCreated, recipient, label, now)
}

/// Routes a job order after a ledger mutation.
///
/// SERVICE: once approved, the handling department may begin. MATERIAL
/// REQUISITION: FINANCE first, then MANAGEMENT, then PURCHASING once fully
/// approved to raise the purchase order.
pub fn job_order_after_sign_off(
    jo: &JobOrder,
    previous: JobOrderStatus,
    action: ApprovalAction,
    now: OffsetDateTime,
) -> Option<NotificationEvent> {
    if matches!(
        action,
        ApprovalAction::Rejected | ApprovalAction::BudgetRejected
    ) {
        return Some(event(
            jo,
            NotificationKind::JobOrderRejected,
            Recipient::Department {
                department: jo.handling_department.clone(),
            },
            format!("Job order {} was rejected ({action})", jo.number),
            now,
        ));
    }

    match jo.job_type {
        JobOrderType::Service => {
            if jo.status == JobOrderStatus::Approved && previous != JobOrderStatus::Approved {
                Some(event(
                    jo,
                    NotificationKind::JobOrderApproved,
                    Recipient::Department {
                        department: jo.handling_department.clone(),
                    },
                    format!("Job order {} approved; execution may begin", jo.number),
                    now,
                ))
            } else {
                None
            }
        }
        JobOrderType::MaterialRequisition => material_requisition_next(jo, now),
    }
}

fn material_requisition_next(jo: &JobOrder, now: OffsetDateTime) -> Option<NotificationEvent> {
    if jo.status == JobOrderStatus::Approved {
        return Some(event(
            jo,
            NotificationKind::JobOrderApproved,
            role(LedgerRole::Purchasing),
            format!(
                "Material requisition {} approved; raise the purchase order",
                jo.number
            ),
            now,
        ));
    }

    let ledger: &ApprovalLedger = &jo.approvals;
    let finance_acted: bool = ledger.contains(LedgerRole::Finance, ApprovalAction::Noted)
        || ledger.contains(LedgerRole::Finance, ApprovalAction::BudgetApproved);
    let management_acted: bool = ledger.contains(LedgerRole::Management, ApprovalAction::Approved)
        || ledger.contains(LedgerRole::Management, ApprovalAction::BudgetApproved);

    if finance_acted && !management_acted {
        Some(event(
            jo,
            NotificationKind::JobOrderAwaitingApproval,
            role(LedgerRole::Management),
            format!(
                "Material requisition {} cleared by Finance; awaiting President approval",
                jo.number
            ),
            now,
        ))
    } else if !finance_acted {
        Some(event(
            jo,
            NotificationKind::JobOrderAwaitingApproval,
            role(LedgerRole::Finance),
            format!("Material requisition {} awaits Finance review", jo.number),
            now,
        ))
    } else {
        None
    }
}

pub fn canvass_completed(jo: &JobOrder, now: OffsetDateTime) -> NotificationEvent {
    event(
        jo,
        NotificationKind::CanvassCompleted,
        role(LedgerRole::Finance),
        format!(
            "Canvass for {} completed; estimated total {}",
            jo.number, jo.budget.estimated_total_cost
        ),
        now,
    )
}

pub fn job_order_started(jo: &JobOrder, reason: &str, now: OffsetDateTime) -> NotificationEvent {
    event(
        jo,
        NotificationKind::JobOrderStarted,
        Recipient::Department {
            department: jo.handling_department.clone(),
        },
        format!("Job order {} is in progress ({reason})", jo.number),
        now,
    )
}

pub fn job_order_completed(jo: &JobOrder, now: OffsetDateTime) -> NotificationEvent {
    event(
        jo,
        NotificationKind::JobOrderCompleted,
        requester(&jo.requester_id, &jo.requester_name),
        format!("Job order {} is completed and awaits your acceptance", jo.number),
        now,
    )
}

pub fn job_order_rejected(jo: &JobOrder, now: OffsetDateTime) -> NotificationEvent {
    event(
        jo,
        NotificationKind::JobOrderRejected,
        requester(&jo.requester_id, &jo.requester_name),
        format!("Job order {} was rejected", jo.number),
        now,
    )
}

pub fn job_order_accepted(jo: &JobOrder, now: OffsetDateTime) -> NotificationEvent {
    event(
        jo,
        NotificationKind::JobOrderAccepted,
        Recipient::Department {
            department: jo.handling_department.clone(),
        },
        format!("Job order {} accepted by the requester", jo.number),
        now,
    )
}

pub fn purchase_order_raised(
    po: &PurchaseOrder,
    kind: NotificationKind,
    now: OffsetDateTime,
) -> NotificationEvent {
    event(
        po,
        kind,
        role(LedgerRole::Management),
        format!(
            "Purchase order {} ({}) awaits President approval",
            po.number, po.total_amount
        ),
        now,
    )
}

pub fn purchase_order_decided(
    po: &PurchaseOrder,
    approved: bool,
    now: OffsetDateTime,
) -> NotificationEvent {
    let (kind, verb): (NotificationKind, &str) = if approved {
        (NotificationKind::PurchaseOrderApproved, "approved")
    } else {
        (NotificationKind::PurchaseOrderRejected, "rejected")
    };
    event(
        po,
        kind,
        role(LedgerRole::Purchasing),
        format!("Purchase order {} was {verb}", po.number),
        now,
    )
}

pub fn purchase_order_received(po: &PurchaseOrder, now: OffsetDateTime) -> NotificationEvent {
    event(
        po,
        NotificationKind::PurchaseOrderReceived,
        role(LedgerRole::Purchasing),
        format!(
            "Purchase order {} received; file the receiving report",
            po.number
        ),
        now,
    )
}
