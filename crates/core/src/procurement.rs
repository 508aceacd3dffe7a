// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::{approval_record, require_text};
use crate::command::{
    NewDocument, PurchaseOrderCommand, PurchaseOrderDraft, ReceivedLine, ReceivingReportCommand,
    ReceivingReportDraft, SignOff,
};
use crate::config::WorkflowContext;
use crate::error::CoreError;
use crate::notify;
use crate::state::{FollowUp, Transition};
use procura_domain::{
    Admission, ApprovalAction, ApprovalLedger, DocumentKind, DomainError, JobOrder, JobOrderType,
    PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus, ReceivedItem, ReceivingReport,
    ReceivingReportStatus, RejectDuplicate, advance_on_receipt, purchase_order_subtotal,
    purchase_order_total, reduce_purchase_order, validate_amount, validate_purchase_order_items,
};
use procura_events::{Actor, NotificationEvent, NotificationKind};
use rust_decimal::Decimal;

/// Creates a purchase order for a material requisition.
///
/// # Arguments
///
/// * `identity` - The allocated id and number
/// * `jo` - The job order the purchase order procures for
/// * `existing` - The purchase order already raised for `jo`, if any
/// * `draft` - The purchase order fields
/// * `actor` - The authorized caller
/// * `ctx` - The workflow context
///
/// # Errors
///
/// Returns an error if:
/// - The job order is not a MATERIAL_REQUISITION
/// - A purchase order already exists for the job order
/// - The items or tax amount are invalid
pub fn create_purchase_order(
    identity: NewDocument,
    jo: &JobOrder,
    existing: Option<&PurchaseOrder>,
    draft: PurchaseOrderDraft,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Result<Transition<PurchaseOrder>, CoreError> {
    if jo.job_type != JobOrderType::MaterialRequisition {
        return Err(DomainError::WrongJobOrderType {
            number: jo.number.clone(),
            expected: JobOrderType::MaterialRequisition.as_str().to_string(),
            actual: jo.job_type.as_str().to_string(),
        }
        .into());
    }
    if let Some(po) = existing {
        return Err(DomainError::PurchaseOrderExists {
            job_order: jo.number.clone(),
            purchase_order: po.number.clone(),
        }
        .into());
    }

    validate_purchase_order_items(&draft.items)?;
    validate_amount("tax_amount", draft.tax_amount)?;

    let subtotal: Decimal = purchase_order_subtotal(&draft.items)?;
    let total_amount: Decimal = purchase_order_total(subtotal, draft.tax_amount)?;
    let mut po: PurchaseOrder = PurchaseOrder {
        id: identity.id,
        number: identity.number,
        job_order_id: jo.id.clone(),
        job_order_number: jo.number.clone(),
        items: draft.items,
        supplier: draft.supplier,
        subtotal,
        tax_amount: draft.tax_amount,
        total_amount,
        status: PurchaseOrderStatus::Draft,
        received_at: None,
        approvals: ApprovalLedger::new(),
        created_at: ctx.now,
        updated_at: ctx.now,
    };

    let kind: NotificationKind = if let Some(role) = draft.submit_as {
        let record = approval_record(
            SignOff::new(role, ApprovalAction::Submitted, None),
            actor,
            ctx,
        );
        po.status = reduce_purchase_order(po.status, &record);
        po.approvals.record(&RejectDuplicate, record);
        NotificationKind::PurchaseOrderSubmitted
    } else {
        NotificationKind::PurchaseOrderCreated
    };

    let notification: NotificationEvent = notify::purchase_order_raised(&po, kind, ctx.now);
    Ok(Transition::new(po, Some(notification)))
}

/// Applies a command to a purchase order.
///
/// # Arguments
///
/// * `po` - The current purchase order
/// * `command` - The command to apply
/// * `actor` - The authorized caller
/// * `ctx` - The workflow context
///
/// # Errors
///
/// Returns an error if:
/// - The action is not SUBMITTED, APPROVED or REJECTED
/// - The same user already recorded the same action
/// - The approval decision was already made
/// - A submission is made outside DRAFT
pub fn apply_purchase_order(
    po: &PurchaseOrder,
    command: PurchaseOrderCommand,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Result<Transition<PurchaseOrder>, CoreError> {
    let mut next: PurchaseOrder = po.clone();
    next.updated_at = ctx.now;

    match command {
        PurchaseOrderCommand::Decide(sign_off) => {
            let action: ApprovalAction = sign_off.action;
            if !matches!(
                action,
                ApprovalAction::Submitted | ApprovalAction::Approved | ApprovalAction::Rejected
            ) {
                return Err(DomainError::ActionNotAllowed {
                    kind: DocumentKind::PurchaseOrder,
                    action,
                }
                .into());
            }

            let record = approval_record(sign_off, actor, ctx);
            if next.approvals.record(&RejectDuplicate, record.clone()) == Admission::Reject {
                return Err(DomainError::AlreadyActed {
                    number: po.number.clone(),
                    user_id: actor.id.clone(),
                    action,
                }
                .into());
            }

            if action == ApprovalAction::Submitted {
                if po.status != PurchaseOrderStatus::Draft {
                    return Err(DomainError::InvalidState {
                        kind: DocumentKind::PurchaseOrder,
                        number: po.number.clone(),
                        current: po.status.as_str().to_string(),
                        required: PurchaseOrderStatus::Draft.as_str().to_string(),
                    }
                    .into());
                }
            } else if !po.status.is_awaiting_decision() {
                return Err(DomainError::AlreadyDecided {
                    kind: DocumentKind::PurchaseOrder,
                    number: po.number.clone(),
                    status: po.status.as_str().to_string(),
                }
                .into());
            }

            next.status = reduce_purchase_order(po.status, &record);
            let notification: Option<NotificationEvent> = match next.status {
                PurchaseOrderStatus::Submitted if po.status == PurchaseOrderStatus::Draft => Some(
                    notify::purchase_order_raised(
                        &next,
                        NotificationKind::PurchaseOrderSubmitted,
                        ctx.now,
                    ),
                ),
                PurchaseOrderStatus::Approved => {
                    Some(notify::purchase_order_decided(&next, true, ctx.now))
                }
                PurchaseOrderStatus::Rejected => {
                    Some(notify::purchase_order_decided(&next, false, ctx.now))
                }
                _ => None,
            };
            Ok(Transition::new(next, notification))
        }
        PurchaseOrderCommand::ChangeStatus { status } => {
            next.status = status;
            if status != PurchaseOrderStatus::Received {
                return Ok(Transition::new(next, None));
            }

            next.received_at.get_or_insert(ctx.now);
            let notification: Option<NotificationEvent> = (po.status
                != PurchaseOrderStatus::Received)
                .then(|| notify::purchase_order_received(&next, ctx.now));
            let follow_up: FollowUp = FollowUp::AdvanceJobOrderOnReceipt {
                job_order_id: po.job_order_id.clone(),
                purchase_order_number: po.number.clone(),
            };
            Ok(Transition::new(next, notification).with_follow_up(follow_up))
        }
    }
}

/// Advances a job order after its purchase order was received.
///
/// Returns `None` when the job order is already IN_PROGRESS or beyond, so
/// running the follow-up twice is harmless.
#[must_use]
pub fn advance_job_order_on_receipt(
    jo: &JobOrder,
    purchase_order_number: &str,
    ctx: &WorkflowContext,
) -> Option<Transition<JobOrder>> {
    let status = advance_on_receipt(jo.status)?;

    let mut next: JobOrder = jo.clone();
    next.status = status;
    next.updated_at = ctx.now;
    next.execution.actual_start_date.get_or_insert(ctx.now);

    let reason: String = format!("purchase order {purchase_order_number} received");
    let notification: NotificationEvent = notify::job_order_started(&next, &reason, ctx.now);
    Some(Transition::new(next, Some(notification)))
}

/// Creates a receiving report for a received purchase order.
///
/// Lines default to the matching purchase order line for ordered quantity
/// and price. The supplier is taken from the line, then the purchase order,
/// then `UNKNOWN_SUPPLIER`. An empty draft receives every line in full.
///
/// # Errors
///
/// Returns an error if the purchase order is not RECEIVED or a line is
/// invalid.
pub fn create_receiving_report(
    identity: NewDocument,
    po: &PurchaseOrder,
    draft: ReceivingReportDraft,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Result<Transition<ReceivingReport>, CoreError> {
    if po.status != PurchaseOrderStatus::Received {
        return Err(DomainError::InvalidState {
            kind: DocumentKind::PurchaseOrder,
            number: po.number.clone(),
            current: po.status.as_str().to_string(),
            required: PurchaseOrderStatus::Received.as_str().to_string(),
        }
        .into());
    }

    let items: Vec<ReceivedItem> = if draft.lines.is_empty() {
        po.items.iter().map(|item| received_in_full(po, item)).collect()
    } else {
        draft
            .lines
            .into_iter()
            .map(|line| received_line(po, line))
            .collect::<Result<Vec<ReceivedItem>, DomainError>>()?
    };

    let rr: ReceivingReport = ReceivingReport {
        id: identity.id,
        number: identity.number,
        purchase_order_id: po.id.clone(),
        purchase_order_number: po.number.clone(),
        items,
        received_by: actor.name.clone(),
        remarks: draft.remarks,
        status: ReceivingReportStatus::Draft,
        created_at: ctx.now,
        updated_at: ctx.now,
    };
    Ok(Transition::new(rr, None))
}

fn received_in_full(po: &PurchaseOrder, item: &PurchaseOrderItem) -> ReceivedItem {
    ReceivedItem {
        description: item.description.clone(),
        quantity_ordered: item.quantity,
        quantity_received: item.quantity,
        unit_price: item.unit_price,
        supplier: po.supplier_for(Some(item)),
    }
}

fn received_line(po: &PurchaseOrder, line: ReceivedLine) -> Result<ReceivedItem, DomainError> {
    require_text("items.description", &line.description)?;
    validate_amount("items.quantity_received", line.quantity_received)?;

    let ordered: Option<&PurchaseOrderItem> = po.item_by_description(&line.description);
    let supplier: String = match line.supplier.filter(|s| !s.trim().is_empty()) {
        Some(supplier) => supplier,
        None => po.supplier_for(ordered),
    };

    Ok(ReceivedItem {
        quantity_ordered: line
            .quantity_ordered
            .or_else(|| ordered.map(|i| i.quantity))
            .unwrap_or(Decimal::ZERO),
        unit_price: line
            .unit_price
            .or_else(|| ordered.map(|i| i.unit_price))
            .unwrap_or(Decimal::ZERO),
        description: line.description,
        quantity_received: line.quantity_received,
        supplier,
    })
}

/// Applies a command to a receiving report.
///
/// # Errors
///
/// Returns an error if the status change is not a single forward step.
pub fn apply_receiving_report(
    rr: &ReceivingReport,
    command: ReceivingReportCommand,
    ctx: &WorkflowContext,
) -> Result<Transition<ReceivingReport>, CoreError> {
    match command {
        ReceivingReportCommand::ChangeStatus { status } => {
            rr.status.validate_transition(status)?;
            let mut next: ReceivingReport = rr.clone();
            next.status = status;
            next.updated_at = ctx.now;
            Ok(Transition::new(next, None))
        }
    }
}
