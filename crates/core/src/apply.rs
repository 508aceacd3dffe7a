// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{
    BudgetUpdate, JobOrderCommand, JobOrderDetails, JobOrderDraft, MaterialTransferUpdate,
    NewDocument, ServiceRequestCommand, ServiceRequestDraft, ServiceRequestEdit, SignOff,
};
use crate::config::{CanvassPolicy, WorkflowContext};
use crate::error::CoreError;
use crate::notify;
use crate::state::Transition;
use procura_domain::{
    Acceptance, Admission, ApprovalAction, ApprovalLedger, ApprovalRecord, Budget, DocumentKind,
    DomainError, Execution, ExecutionStep, JobOrder, JobOrderStatus, JobOrderType, LedgerRole,
    MaterialItem, MaterialTransfer, Milestone, PurchaseOrder, PurchaseOrderStatus, RejectDuplicate,
    ReplaceSameRole, ServiceRequest, ServiceRequestStatus, TransferRecord, advance_on_transfer,
    budget_estimate, canvass_total, reduce_job_order, reduce_service_request, validate_amount,
    validate_job_order_status_change, validate_materials,
};
use procura_events::{Actor, NotificationEvent};
use rust_decimal::Decimal;

/// Builds the ledger record for an authorized sign-off.
pub(crate) fn approval_record(
    sign_off: SignOff,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> ApprovalRecord {
    ApprovalRecord {
        role: sign_off.role,
        user_id: actor.id.clone(),
        user_name: actor.name.clone(),
        action: sign_off.action,
        timestamp: ctx.now,
        comments: sign_off.comments,
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(())
}

/// Creates a service request, submitted unless saved as a draft.
///
/// # Arguments
///
/// * `identity` - The allocated id and number
/// * `draft` - The request fields
/// * `actor` - The requester
/// * `ctx` - The workflow context
///
/// # Errors
///
/// Returns an error if the title is empty.
pub fn create_service_request(
    identity: NewDocument,
    draft: ServiceRequestDraft,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Result<Transition<ServiceRequest>, CoreError> {
    require_text("title", &draft.title)?;

    let status: ServiceRequestStatus = if draft.save_as_draft {
        ServiceRequestStatus::Draft
    } else {
        ServiceRequestStatus::Submitted
    };

    let sr: ServiceRequest = ServiceRequest {
        id: identity.id,
        number: identity.number,
        requester_id: actor.id.clone(),
        requester_name: actor.name.clone(),
        department: draft.department,
        category: draft.category,
        priority: draft.priority,
        title: draft.title.trim().to_string(),
        description: draft.description,
        requested_date: draft.requested_date.unwrap_or(ctx.now),
        target_date: draft.target_date,
        budget_source: draft.budget_source,
        status,
        approvals: ApprovalLedger::new(),
        created_at: ctx.now,
        updated_at: ctx.now,
    };

    let notification: Option<NotificationEvent> = (status == ServiceRequestStatus::Submitted)
        .then(|| notify::service_request_submitted(&sr, ctx.now));
    Ok(Transition::new(sr, notification))
}

/// Applies a command to a service request.
///
/// # Arguments
///
/// * `sr` - The current service request
/// * `command` - The command to apply
/// * `actor` - The authorized caller
/// * `ctx` - The workflow context
///
/// # Errors
///
/// Returns an error if:
/// - The same user already recorded the same action
/// - The request is already APPROVED or REJECTED
/// - The request is not in a status that permits the command
pub fn apply_service_request(
    sr: &ServiceRequest,
    command: ServiceRequestCommand,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Result<Transition<ServiceRequest>, CoreError> {
    let mut next: ServiceRequest = sr.clone();
    next.updated_at = ctx.now;

    match command {
        ServiceRequestCommand::Submit => {
            if sr.status != ServiceRequestStatus::Draft {
                return Err(invalid_sr_state(sr, "DRAFT").into());
            }
            next.status = ServiceRequestStatus::Submitted;
            let notification: NotificationEvent = notify::service_request_submitted(&next, ctx.now);
            Ok(Transition::new(next, Some(notification)))
        }
        ServiceRequestCommand::Edit(edit) => {
            if sr.status.is_terminal() {
                return Err(invalid_sr_state(sr, "DRAFT or SUBMITTED").into());
            }
            apply_sr_edit(&mut next, edit)?;
            Ok(Transition::new(next, None))
        }
        ServiceRequestCommand::Decide(sign_off) => {
            let action: ApprovalAction = sign_off.action;
            if !matches!(action, ApprovalAction::Approved | ApprovalAction::Rejected) {
                return Err(DomainError::ActionNotAllowed {
                    kind: DocumentKind::ServiceRequest,
                    action,
                }
                .into());
            }

            if next.approvals.record(&RejectDuplicate, approval_record(sign_off, actor, ctx))
                == Admission::Reject
            {
                return Err(DomainError::AlreadyActed {
                    number: sr.number.clone(),
                    user_id: actor.id.clone(),
                    action,
                }
                .into());
            }
            if sr.status.is_terminal() {
                return Err(DomainError::AlreadyDecided {
                    kind: DocumentKind::ServiceRequest,
                    number: sr.number.clone(),
                    status: sr.status.as_str().to_string(),
                }
                .into());
            }
            if sr.status == ServiceRequestStatus::Draft {
                return Err(invalid_sr_state(sr, "SUBMITTED").into());
            }

            next.status = reduce_service_request(sr.status, action);
            let approved: bool = next.status == ServiceRequestStatus::Approved;
            let notification: NotificationEvent =
                notify::service_request_decided(&next, approved, ctx.now);
            Ok(Transition::new(next, Some(notification)))
        }
    }
}

fn apply_sr_edit(sr: &mut ServiceRequest, edit: ServiceRequestEdit) -> Result<(), DomainError> {
    if let Some(title) = edit.title {
        require_text("title", &title)?;
        sr.title = title.trim().to_string();
    }
    if let Some(description) = edit.description {
        sr.description = description;
    }
    if let Some(priority) = edit.priority {
        sr.priority = priority;
    }
    if let Some(category) = edit.category {
        sr.category = category;
    }
    if edit.target_date.is_some() {
        sr.target_date = edit.target_date;
    }
    if edit.budget_source.is_some() {
        sr.budget_source = edit.budget_source;
    }
    Ok(())
}

fn invalid_sr_state(sr: &ServiceRequest, required: &str) -> DomainError {
    DomainError::InvalidState {
        kind: DocumentKind::ServiceRequest,
        number: sr.number.clone(),
        current: sr.status.as_str().to_string(),
        required: required.to_string(),
    }
}

fn invalid_jo_state(jo: &JobOrder, required: &str) -> DomainError {
    DomainError::InvalidState {
        kind: DocumentKind::JobOrder,
        number: jo.number.clone(),
        current: jo.status.as_str().to_string(),
        required: required.to_string(),
    }
}

/// Creates a job order for an approved service request.
///
/// The job order inherits the request's requester, department, category,
/// priority, dates and budget source.
///
/// # Arguments
///
/// * `identity` - The allocated id and number
/// * `sr` - The service request the job order fulfils
/// * `existing` - The job order already raised for `sr`, if any
/// * `draft` - The job order fields
/// * `ctx` - The workflow context
///
/// # Errors
///
/// Returns an error if:
/// - The service request is not APPROVED and carries no department head approval
/// - A job order already exists for the service request
/// - A material line or the cost estimate is invalid
pub fn create_job_order(
    identity: NewDocument,
    sr: &ServiceRequest,
    existing: Option<&JobOrder>,
    draft: JobOrderDraft,
    ctx: &WorkflowContext,
) -> Result<Transition<JobOrder>, CoreError> {
    let approved: bool = sr.status == ServiceRequestStatus::Approved
        || sr
            .approvals
            .contains(LedgerRole::DepartmentHead, ApprovalAction::Approved);
    if !approved {
        return Err(invalid_sr_state(sr, "APPROVED").into());
    }

    if let Some(jo) = existing {
        return Err(DomainError::JobOrderExists {
            service_request: sr.number.clone(),
            job_order: jo.number.clone(),
        }
        .into());
    }

    validate_materials(&draft.materials)?;
    if let Some(price) = draft.manpower.outsource_price {
        validate_amount("manpower.outsource_price", price)?;
    }
    if let Some(total) = draft.estimated_total_cost {
        validate_amount("estimated_total_cost", total)?;
    }

    let status: JobOrderStatus = match (draft.job_type, ctx.config.canvass_policy) {
        (JobOrderType::MaterialRequisition, CanvassPolicy::EnterOnCreation) => {
            JobOrderStatus::PendingCanvass
        }
        _ => JobOrderStatus::Draft,
    };

    let estimated_total_cost: Decimal = match draft.estimated_total_cost {
        Some(cost) => cost,
        None => budget_estimate(&draft.materials, draft.manpower.outsource_price)?,
    };
    let budget: Budget = Budget {
        estimated_total_cost,
        cost_override: draft.estimated_total_cost.is_some(),
        budget_source: sr.budget_source.clone(),
        ..Budget::default()
    };

    let jo: JobOrder = JobOrder {
        id: identity.id,
        number: identity.number,
        service_request_id: sr.id.clone(),
        service_request_number: sr.number.clone(),
        job_type: draft.job_type,
        status,
        requester_id: sr.requester_id.clone(),
        requester_name: sr.requester_name.clone(),
        department: sr.department.clone(),
        category: sr.category,
        priority: sr.priority,
        handling_department: sr.category.handling_department(),
        requested_date: sr.requested_date,
        target_date: draft.target_date.or(sr.target_date),
        work_description: draft.work_description,
        materials: draft.materials,
        manpower: draft.manpower,
        budget,
        execution: Execution::default(),
        acceptance: None,
        transfer: MaterialTransfer::default(),
        approvals: ApprovalLedger::new(),
        created_at: ctx.now,
        updated_at: ctx.now,
    };

    let notification: NotificationEvent = notify::job_order_created(&jo, ctx.now);
    Ok(Transition::new(jo, Some(notification)))
}

/// Applies a command to a job order.
///
/// Ledger mutations use the replace-same-role policy and re-derive the
/// status; every other command is an explicit lifecycle step.
///
/// # Arguments
///
/// * `jo` - The current job order
/// * `command` - The command to apply
/// * `actor` - The authorized caller
/// * `ctx` - The workflow context
///
/// # Errors
///
/// Returns an error if the command is not valid for the job order's type or
/// status, or carries invalid amounts.
pub fn apply_job_order(
    jo: &JobOrder,
    command: JobOrderCommand,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Result<Transition<JobOrder>, CoreError> {
    let mut next: JobOrder = jo.clone();
    next.updated_at = ctx.now;

    match command {
        JobOrderCommand::Approve(sign_off) => {
            if sign_off.action == ApprovalAction::Submitted {
                return Err(DomainError::ActionNotAllowed {
                    kind: DocumentKind::JobOrder,
                    action: sign_off.action,
                }
                .into());
            }
            let notification: Option<NotificationEvent> =
                sign_job_order(&mut next, jo.status, sign_off, actor, ctx);
            Ok(Transition::new(next, notification))
        }
        JobOrderCommand::UpdateBudget { update, sign_off } => {
            merge_budget(&mut next, update)?;
            let notification: Option<NotificationEvent> = match sign_off {
                Some(sign_off) => {
                    if !sign_off.action.is_budget_action() {
                        return Err(DomainError::ActionNotAllowed {
                            kind: DocumentKind::JobOrder,
                            action: sign_off.action,
                        }
                        .into());
                    }
                    if matches!(
                        sign_off.action,
                        ApprovalAction::BudgetApproved | ApprovalAction::Noted
                    ) {
                        next.budget.cleared_by = Some(actor.name.clone());
                        next.budget.cleared_at = Some(ctx.now);
                    }
                    sign_job_order(&mut next, jo.status, sign_off, actor, ctx)
                }
                None => None,
            };
            Ok(Transition::new(next, notification))
        }
        JobOrderCommand::SubmitCanvass { materials } => {
            submit_canvass(&mut next, materials, ctx)?;
            let notification: NotificationEvent = notify::canvass_completed(&next, ctx.now);
            Ok(Transition::new(next, Some(notification)))
        }
        JobOrderCommand::UpdateDetails(details) => {
            update_details(&mut next, details)?;
            Ok(Transition::new(next, None))
        }
        JobOrderCommand::Execute { step, milestone } => {
            let notification: Option<NotificationEvent> =
                execute(&mut next, step, milestone, actor, ctx)?;
            Ok(Transition::new(next, notification))
        }
        JobOrderCommand::Accept { remarks } => {
            if jo.status != JobOrderStatus::Completed {
                return Err(invalid_jo_state(jo, "COMPLETED").into());
            }
            if jo.acceptance.is_some() {
                return Err(DomainError::AlreadyDecided {
                    kind: DocumentKind::JobOrder,
                    number: jo.number.clone(),
                    status: String::from("accepted"),
                }
                .into());
            }
            next.acceptance = Some(Acceptance {
                accepted_by: actor.name.clone(),
                accepted_at: ctx.now,
                remarks,
            });
            let notification: NotificationEvent = notify::job_order_accepted(&next, ctx.now);
            Ok(Transition::new(next, Some(notification)))
        }
        JobOrderCommand::ChangeStatus { status } => {
            validate_job_order_status_change(jo.status, status)?;
            next.status = status;
            let notification: Option<NotificationEvent> = match status {
                JobOrderStatus::InProgress => {
                    next.execution.actual_start_date.get_or_insert(ctx.now);
                    None
                }
                JobOrderStatus::Completed if jo.status != JobOrderStatus::Completed => {
                    next.execution.actual_completion_date.get_or_insert(ctx.now);
                    Some(notify::job_order_completed(&next, ctx.now))
                }
                JobOrderStatus::Rejected if jo.status != JobOrderStatus::Rejected => {
                    Some(notify::job_order_rejected(&next, ctx.now))
                }
                _ => None,
            };
            Ok(Transition::new(next, notification))
        }
    }
}

/// Records a sign-off, re-derives the status and routes the notification.
fn sign_job_order(
    jo: &mut JobOrder,
    previous: JobOrderStatus,
    sign_off: SignOff,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Option<NotificationEvent> {
    let action: ApprovalAction = sign_off.action;
    jo.approvals
        .record(&ReplaceSameRole, approval_record(sign_off, actor, ctx));
    jo.status = reduce_job_order(jo.job_type, jo.status, &jo.approvals);
    notify::job_order_after_sign_off(jo, previous, action, ctx.now)
}

fn merge_budget(jo: &mut JobOrder, update: BudgetUpdate) -> Result<(), DomainError> {
    if let Some(total) = update.estimated_total_cost {
        validate_amount("estimated_total_cost", total)?;
        jo.budget.estimated_total_cost = total;
        jo.budget.cost_override = true;
    }
    if update.budget_source.is_some() {
        jo.budget.budget_source = update.budget_source;
    }
    if update.cost_center.is_some() {
        jo.budget.cost_center = update.cost_center;
    }
    if update.remarks.is_some() {
        jo.budget.remarks = update.remarks;
    }
    Ok(())
}

fn submit_canvass(
    jo: &mut JobOrder,
    materials: Vec<MaterialItem>,
    ctx: &WorkflowContext,
) -> Result<(), DomainError> {
    if jo.job_type != JobOrderType::MaterialRequisition {
        return Err(DomainError::WrongJobOrderType {
            number: jo.number.clone(),
            expected: JobOrderType::MaterialRequisition.as_str().to_string(),
            actual: jo.job_type.as_str().to_string(),
        });
    }

    let (allowed, required): (bool, &str) = match ctx.config.canvass_policy {
        CanvassPolicy::Strict | CanvassPolicy::EnterOnCreation => (
            jo.status == JobOrderStatus::PendingCanvass,
            "PENDING_CANVASS",
        ),
        CanvassPolicy::AllowFromDraft => (
            matches!(
                jo.status,
                JobOrderStatus::Draft | JobOrderStatus::PendingCanvass
            ),
            "DRAFT or PENDING_CANVASS",
        ),
    };
    if !allowed {
        return Err(invalid_jo_state(jo, required));
    }

    validate_materials(&materials)?;
    jo.budget.estimated_total_cost = canvass_total(&materials)?;
    jo.budget.cost_override = false;
    jo.materials = materials;
    jo.status = JobOrderStatus::Draft;
    Ok(())
}

fn update_details(jo: &mut JobOrder, details: JobOrderDetails) -> Result<(), DomainError> {
    if !jo.status.is_approval_phase() {
        return Err(invalid_jo_state(
            jo,
            "DRAFT, PENDING_CANVASS, BUDGET_CLEARED or APPROVED",
        ));
    }

    let mut recompute: bool = false;
    if let Some(materials) = details.materials {
        validate_materials(&materials)?;
        jo.materials = materials;
        recompute = true;
    }
    if let Some(manpower) = details.manpower {
        if let Some(price) = manpower.outsource_price {
            validate_amount("manpower.outsource_price", price)?;
        }
        recompute |= manpower.outsource_price != jo.manpower.outsource_price;
        jo.manpower = manpower;
    }
    if let Some(description) = details.work_description {
        jo.work_description = description;
    }
    if details.target_date.is_some() {
        jo.target_date = details.target_date;
    }

    if recompute && !jo.budget.cost_override {
        jo.budget.estimated_total_cost =
            budget_estimate(&jo.materials, jo.manpower.outsource_price)?;
    }
    Ok(())
}

fn execute(
    jo: &mut JobOrder,
    step: ExecutionStep,
    milestone: Option<String>,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Result<Option<NotificationEvent>, DomainError> {
    jo.status = step.apply(&jo.number, jo.status)?;

    let notification: Option<NotificationEvent> = match step {
        ExecutionStep::Start => {
            jo.execution.actual_start_date = Some(ctx.now);
            None
        }
        ExecutionStep::UpdateMilestone => {
            let description: String = milestone.unwrap_or_default();
            require_text("milestone", &description)?;
            jo.execution.milestones.push(Milestone {
                description,
                recorded_by: actor.name.clone(),
                recorded_at: ctx.now,
            });
            None
        }
        ExecutionStep::Complete => {
            if let Some(description) = milestone.filter(|m| !m.trim().is_empty()) {
                jo.execution.milestones.push(Milestone {
                    description,
                    recorded_by: actor.name.clone(),
                    recorded_at: ctx.now,
                });
            }
            jo.execution.actual_completion_date = Some(ctx.now);
            Some(notify::job_order_completed(jo, ctx.now))
        }
    };
    Ok(notification)
}

/// Posts material-transfer records against a job order and optionally
/// completes the transfer.
///
/// For material requisitions the purchase order must exist and be
/// RECEIVED. Completing the transfer completes a material requisition and
/// starts a SERVICE job order.
///
/// # Arguments
///
/// * `jo` - The current job order
/// * `purchase_order` - The job order's purchase order, if one was raised
/// * `update` - The records to append
/// * `actor` - The authorized caller
/// * `ctx` - The workflow context
///
/// # Errors
///
/// Returns an error if:
/// - A material requisition has no purchase order
/// - The purchase order is not RECEIVED
/// - A record has an empty description or negative quantity
pub fn apply_material_transfer(
    jo: &JobOrder,
    purchase_order: Option<&PurchaseOrder>,
    update: MaterialTransferUpdate,
    actor: &Actor,
    ctx: &WorkflowContext,
) -> Result<Transition<JobOrder>, CoreError> {
    if jo.job_type == JobOrderType::MaterialRequisition {
        let po: &PurchaseOrder = purchase_order.ok_or_else(|| DomainError::PurchaseOrderMissing {
            job_order: jo.number.clone(),
        })?;
        if po.status != PurchaseOrderStatus::Received {
            return Err(DomainError::InvalidState {
                kind: DocumentKind::PurchaseOrder,
                number: po.number.clone(),
                current: po.status.as_str().to_string(),
                required: PurchaseOrderStatus::Received.as_str().to_string(),
            }
            .into());
        }
    }

    let mut next: JobOrder = jo.clone();
    next.updated_at = ctx.now;

    for entry in update.entries {
        require_text("transfer.description", &entry.description)?;
        validate_amount("transfer.quantity", entry.quantity)?;
        next.transfer.records.push(TransferRecord {
            description: entry.description,
            quantity: entry.quantity,
            transferred_by: actor.name.clone(),
            transferred_at: ctx.now,
            remarks: entry.remarks,
        });
    }

    let mut notification: Option<NotificationEvent> = None;
    if update.complete && !jo.transfer.completed {
        next.transfer.completed = true;
        next.transfer.completed_at = Some(ctx.now);

        match advance_on_transfer(jo.job_type, jo.status) {
            Some(JobOrderStatus::Completed) => {
                next.status = JobOrderStatus::Completed;
                next.execution.actual_completion_date = Some(ctx.now);
                notification = Some(notify::job_order_completed(&next, ctx.now));
            }
            Some(status) => {
                next.status = status;
                next.execution.actual_start_date.get_or_insert(ctx.now);
                notification = Some(notify::job_order_started(
                    &next,
                    "materials transferred",
                    ctx.now,
                ));
            }
            None => {}
        }
    }

    Ok(Transition::new(next, notification))
}
