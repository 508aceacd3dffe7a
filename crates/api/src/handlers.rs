// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler authorizes the caller, loads the documents it needs, runs
//! the pure workflow step, writes the primary document and only then hands
//! the step's notification to the sink. Cross-document steps are returned
//! as follow-ups for the caller to run through `execute_follow_up`.

use std::str::FromStr;

use procura::{
    BudgetUpdate, FollowUp, JobOrderCommand, JobOrderDetails, JobOrderDraft,
    MaterialTransferUpdate, NewDocument, PurchaseOrderCommand, PurchaseOrderDraft, ReceivedLine,
    ReceivingReportCommand, ReceivingReportDraft, ServiceRequestCommand, ServiceRequestDraft,
    ServiceRequestEdit, SignOff, TransferEntry, Transition, WorkflowContext,
    advance_job_order_on_receipt,
};
use procura_domain::{
    ApprovalAction, Capability, Department, Document, DocumentKind, DomainError, ExecutionStep,
    JobOrder, JobOrderStatus, JobOrderType, LedgerRole, Priority, PurchaseOrder,
    PurchaseOrderStatus, ReceivingReport, ReceivingReportStatus, ServiceCategory, ServiceRequest,
};
use procura_persistence::{Persistence, PersistenceError};
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::notification::{NotificationSink, dispatch};
use crate::request_response::{
    AcceptanceRequest, ApiResult, ApprovalRequest, CanvassRequest, CreateJobOrderRequest,
    CreatePurchaseOrderRequest, CreateReceivingReportRequest, CreateServiceRequestRequest,
    EditServiceRequestRequest, ExecutionRequest, MaterialTransferRequest, StatusChangeRequest,
    UpdateBudgetRequest, UpdateJobOrderRequest,
};

fn internal(context: &'static str) -> impl Fn(PersistenceError) -> ApiError {
    move |err| translate_persistence_error(context, &err)
}

fn parse_label<T: FromStr<Err = DomainError>>(value: &str) -> Result<T, ApiError> {
    value.parse().map_err(translate_domain_error)
}

fn not_found<D: Document>(id: &str) -> ApiError {
    translate_domain_error(DomainError::DocumentNotFound {
        kind: D::KIND,
        id: id.to_string(),
    })
}

fn load<D: Document>(persistence: &mut Persistence, id: &str) -> Result<D, ApiError> {
    persistence
        .get::<D>(id)
        .map_err(internal("Failed to load document"))?
        .ok_or_else(|| not_found::<D>(id))
}

/// Allocates the id and number of a new document.
fn allocate(
    persistence: &mut Persistence,
    kind: DocumentKind,
    ctx: &WorkflowContext,
) -> Result<NewDocument, ApiError> {
    let number: String = persistence
        .next_number(kind, ctx.now.year())
        .map_err(internal("Failed to allocate document number"))?;
    let id: String = format!(
        "{}-{:016x}",
        kind.number_prefix().to_lowercase(),
        rand::random::<u64>()
    );
    Ok(NewDocument::new(id, number))
}

/// Persists a newly created document, then notifies.
fn commit_new<D: Document>(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    transition: Transition<D>,
    message: String,
) -> Result<ApiResult<D>, ApiError> {
    persistence
        .insert(&transition.document)
        .map_err(internal("Failed to store document"))?;
    info!(
        kind = D::KIND.as_str(),
        number = transition.document.number(),
        "Document created"
    );

    dispatch(sink, transition.notification.as_ref());
    let mut result: ApiResult<D> = ApiResult::new(transition.document, message);
    result.follow_ups = transition.follow_ups;
    Ok(result)
}

/// Overwrites an existing document, then notifies.
fn commit<D: Document>(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    transition: Transition<D>,
    message: String,
) -> Result<ApiResult<D>, ApiError> {
    persistence
        .save(&transition.document)
        .map_err(internal("Failed to save document"))?;
    debug!(
        kind = D::KIND.as_str(),
        number = transition.document.number(),
        "Document saved"
    );

    dispatch(sink, transition.notification.as_ref());
    let mut result: ApiResult<D> = ApiResult::new(transition.document, message);
    result.follow_ups = transition.follow_ups;
    Ok(result)
}

/// Retrieves one document by id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no document of this kind has the id.
pub fn get_document<D: Document>(persistence: &mut Persistence, id: &str) -> Result<D, ApiError> {
    load(persistence, id)
}

/// Lists every document of a kind, newest first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_documents<D: Document>(persistence: &mut Persistence) -> Result<Vec<D>, ApiError> {
    persistence
        .list::<D>()
        .map_err(internal("Failed to list documents"))
}

// ============================================================================
// Service requests
// ============================================================================

/// Raises a service request on behalf of the caller.
///
/// # Arguments
///
/// * `persistence` - The document store
/// * `sink` - The notification sink
/// * `ctx` - The workflow context
/// * `actor` - The authenticated caller, who becomes the requester
/// * `request` - The request fields
///
/// # Errors
///
/// Returns an error if a label is invalid, the title is empty or the store
/// fails.
pub fn create_service_request(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    request: CreateServiceRequestRequest,
) -> Result<ApiResult<ServiceRequest>, ApiError> {
    let category: ServiceCategory = parse_label(&request.category)?;
    let priority: Priority = match request.priority.as_deref() {
        Some(label) => parse_label(label)?,
        None => Priority::Medium,
    };
    let department: Department = match request.department.as_deref() {
        Some(label) => Department::parse(label).map_err(translate_domain_error)?,
        None => actor.department.clone(),
    };

    let draft: ServiceRequestDraft = ServiceRequestDraft {
        department,
        category,
        priority,
        title: request.title,
        description: request.description,
        requested_date: None,
        target_date: request.target_date,
        budget_source: request.budget_source,
        save_as_draft: request.save_as_draft,
    };

    let identity: NewDocument = allocate(persistence, DocumentKind::ServiceRequest, ctx)?;
    let transition: Transition<ServiceRequest> =
        procura::create_service_request(identity, draft, &actor.to_actor(), ctx)
            .map_err(translate_core_error)?;

    let message: String = format!(
        "Service request {} created ({})",
        transition.document.number, transition.document.status
    );
    commit_new(persistence, sink, transition, message)
}

/// Submits a draft service request.
///
/// # Errors
///
/// Returns an error if the caller is not the requester, or the request is
/// not a DRAFT.
pub fn submit_service_request(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
) -> Result<ApiResult<ServiceRequest>, ApiError> {
    let sr: ServiceRequest = load(persistence, id)?;
    AuthorizationService::authorize_requester(actor, &sr.requester_id, "submit_service_request")?;

    let transition: Transition<ServiceRequest> = procura::apply_service_request(
        &sr,
        ServiceRequestCommand::Submit,
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    let message: String = format!("Service request {} submitted", sr.number);
    commit(persistence, sink, transition, message)
}

/// Edits an open service request.
///
/// # Errors
///
/// Returns an error if the caller is not the requester, a label is
/// invalid, or the request is already decided.
pub fn edit_service_request(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: EditServiceRequestRequest,
) -> Result<ApiResult<ServiceRequest>, ApiError> {
    let sr: ServiceRequest = load(persistence, id)?;
    AuthorizationService::authorize_requester(actor, &sr.requester_id, "edit_service_request")?;

    let edit: ServiceRequestEdit = ServiceRequestEdit {
        title: request.title,
        description: request.description,
        priority: request.priority.as_deref().map(parse_label).transpose()?,
        category: request.category.as_deref().map(parse_label).transpose()?,
        target_date: request.target_date,
        budget_source: request.budget_source,
    };

    let transition: Transition<ServiceRequest> = procura::apply_service_request(
        &sr,
        ServiceRequestCommand::Edit(edit),
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    let message: String = format!("Service request {} updated", sr.number);
    commit(persistence, sink, transition, message)
}

/// Records a department head decision on a service request.
///
/// # Errors
///
/// Returns an error if the caller is not a department head of the
/// request's department, the action is not APPROVED/REJECTED, the caller
/// already acted, or the request is already decided.
pub fn decide_service_request(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: ApprovalRequest,
) -> Result<ApiResult<ServiceRequest>, ApiError> {
    let sr: ServiceRequest = load(persistence, id)?;
    let role: LedgerRole = AuthorizationService::authorize(
        actor,
        &Capability::ApproveServiceRequest {
            department: &sr.department,
        },
    )?;
    let action: ApprovalAction = parse_label(&request.action)?;

    let transition: Transition<ServiceRequest> = procura::apply_service_request(
        &sr,
        ServiceRequestCommand::Decide(SignOff::new(role, action, request.comments)),
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    info!(
        sr = %sr.number,
        actor_id = %actor.id,
        %action,
        status = %transition.document.status,
        "Service request decided"
    );
    let message: String = format!(
        "Service request {} is {}",
        sr.number, transition.document.status
    );
    commit(persistence, sink, transition, message)
}

// ============================================================================
// Job orders
// ============================================================================

/// Raises the job order for an approved service request.
///
/// # Errors
///
/// Returns an error if the service request is missing or not approved, a
/// job order already exists for it, or the caller's department does not
/// handle its category.
pub fn create_job_order(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    request: CreateJobOrderRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let sr: ServiceRequest = load(persistence, &request.service_request_id)?;
    AuthorizationService::authorize(
        actor,
        &Capability::CreateJobOrder {
            category: sr.category,
        },
    )?;
    let job_type: JobOrderType = parse_label(&request.job_type)?;

    let existing: Option<JobOrder> = persistence
        .find_by_parent::<JobOrder>(&sr.id)
        .map_err(internal("Failed to look up job order"))?;

    let draft: JobOrderDraft = JobOrderDraft {
        job_type,
        work_description: request.work_description,
        materials: request.materials,
        manpower: request.manpower,
        estimated_total_cost: request.estimated_total_cost,
        target_date: request.target_date,
    };

    let identity: NewDocument = allocate(persistence, DocumentKind::JobOrder, ctx)?;
    let transition: Transition<JobOrder> =
        procura::create_job_order(identity, &sr, existing.as_ref(), draft, ctx)
            .map_err(translate_core_error)?;

    let message: String = format!(
        "Job order {} created for service request {}",
        transition.document.number, sr.number
    );
    commit_new(persistence, sink, transition, message)
}

/// Records an approval on a job order.
///
/// The caller may name the ledger role to act as; otherwise it is inferred
/// from their role and department.
///
/// # Errors
///
/// Returns an error if the caller may not act as the ledger role, or a
/// label is invalid.
pub fn approve_job_order(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: ApprovalRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let jo: JobOrder = load(persistence, id)?;
    let requested: LedgerRole = match request.role.as_deref() {
        Some(label) => parse_label(label)?,
        None => AuthorizationService::default_ledger_role(actor),
    };
    let role: LedgerRole = AuthorizationService::authorize(
        actor,
        &Capability::ApproveJobOrder {
            requested,
            category: jo.category,
        },
    )?;
    let action: ApprovalAction = parse_label(&request.action)?;

    let transition: Transition<JobOrder> = procura::apply_job_order(
        &jo,
        JobOrderCommand::Approve(SignOff::new(role, action, request.comments)),
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    info!(
        jo = %jo.number,
        actor_id = %actor.id,
        %role,
        %action,
        status = %transition.document.status,
        "Job order approval recorded"
    );
    let message: String = format!(
        "Job order {} is {}",
        jo.number, transition.document.status
    );
    commit(persistence, sink, transition, message)
}

/// Updates a job order budget and optionally records a budget sign-off.
///
/// # Errors
///
/// Returns an error if the caller is neither Finance nor the President, an
/// amount is negative, or the sign-off is not a budget action.
pub fn update_job_order_budget(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: UpdateBudgetRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let jo: JobOrder = load(persistence, id)?;
    let role: LedgerRole = AuthorizationService::authorize(actor, &Capability::ReviewBudget)?;

    let sign_off: Option<SignOff> = match request.action.as_deref() {
        Some(label) => Some(SignOff::new(role, parse_label(label)?, request.comments)),
        None => None,
    };
    let update: BudgetUpdate = BudgetUpdate {
        estimated_total_cost: request.estimated_total_cost,
        budget_source: request.budget_source,
        cost_center: request.cost_center,
        remarks: request.remarks,
    };

    let transition: Transition<JobOrder> = procura::apply_job_order(
        &jo,
        JobOrderCommand::UpdateBudget { update, sign_off },
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    let message: String = format!(
        "Budget for job order {} updated (estimated total {})",
        jo.number, transition.document.budget.estimated_total_cost
    );
    commit(persistence, sink, transition, message)
}

/// Records canvassed prices for a material requisition.
///
/// # Errors
///
/// Returns an error if the caller is not in Purchasing, the job order is
/// not a material requisition, or the canvass policy rejects its status.
pub fn submit_canvass(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: CanvassRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let jo: JobOrder = load(persistence, id)?;
    AuthorizationService::authorize(actor, &Capability::SubmitCanvass)?;

    let transition: Transition<JobOrder> = procura::apply_job_order(
        &jo,
        JobOrderCommand::SubmitCanvass {
            materials: request.materials,
        },
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    let message: String = format!(
        "Canvass for job order {} recorded (estimated total {})",
        jo.number, transition.document.budget.estimated_total_cost
    );
    commit(persistence, sink, transition, message)
}

/// Edits job order details before work starts.
///
/// # Errors
///
/// Returns an error if the caller's department does not handle the job
/// order, or work has already started.
pub fn update_job_order_details(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: UpdateJobOrderRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let jo: JobOrder = load(persistence, id)?;
    AuthorizationService::authorize(
        actor,
        &Capability::HandleJobOrder {
            category: jo.category,
        },
    )?;

    let details: JobOrderDetails = JobOrderDetails {
        work_description: request.work_description,
        materials: request.materials,
        manpower: request.manpower,
        target_date: request.target_date,
    };
    let transition: Transition<JobOrder> = procura::apply_job_order(
        &jo,
        JobOrderCommand::UpdateDetails(details),
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    let message: String = format!("Job order {} updated", jo.number);
    commit(persistence, sink, transition, message)
}

/// Runs an execution step (start, milestone, complete).
///
/// # Errors
///
/// Returns an error if the caller's department does not handle the job
/// order, or the job order is not in the status the step requires.
pub fn execute_job_order(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: ExecutionRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let jo: JobOrder = load(persistence, id)?;
    AuthorizationService::authorize(
        actor,
        &Capability::HandleJobOrder {
            category: jo.category,
        },
    )?;
    let step: ExecutionStep = parse_label(&request.step)?;

    let transition: Transition<JobOrder> = procura::apply_job_order(
        &jo,
        JobOrderCommand::Execute {
            step,
            milestone: request.milestone,
        },
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    info!(jo = %jo.number, %step, status = %transition.document.status, "Execution step applied");
    let message: String = format!(
        "Job order {} is {}",
        jo.number, transition.document.status
    );
    commit(persistence, sink, transition, message)
}

/// Records the requester's acceptance of completed work.
///
/// # Errors
///
/// Returns an error if the caller is not the requester, or the job order
/// is not COMPLETED or already accepted.
pub fn accept_job_order(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: AcceptanceRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let jo: JobOrder = load(persistence, id)?;
    AuthorizationService::authorize_requester(actor, &jo.requester_id, "accept_job_order")?;

    let transition: Transition<JobOrder> = procura::apply_job_order(
        &jo,
        JobOrderCommand::Accept {
            remarks: request.remarks,
        },
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    let message: String = format!("Job order {} accepted", jo.number);
    commit(persistence, sink, transition, message)
}

/// Sets a job order status explicitly.
///
/// # Errors
///
/// Returns an error if the caller's department does not handle the job
/// order, the label is invalid, or the job order is CLOSED.
pub fn change_job_order_status(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: StatusChangeRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let jo: JobOrder = load(persistence, id)?;
    AuthorizationService::authorize(
        actor,
        &Capability::HandleJobOrder {
            category: jo.category,
        },
    )?;
    let status: JobOrderStatus = parse_label(&request.status)?;

    let transition: Transition<JobOrder> = procura::apply_job_order(
        &jo,
        JobOrderCommand::ChangeStatus { status },
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    info!(jo = %jo.number, from = %jo.status, to = %status, "Job order status changed");
    let message: String = format!("Job order {} is {status}", jo.number);
    commit(persistence, sink, transition, message)
}

/// Posts material transfers against a job order.
///
/// # Errors
///
/// Returns an error if a material requisition has no purchase order, the
/// purchase order is not RECEIVED, or a line is invalid.
pub fn transfer_materials(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: MaterialTransferRequest,
) -> Result<ApiResult<JobOrder>, ApiError> {
    let jo: JobOrder = load(persistence, id)?;
    let po: Option<PurchaseOrder> = persistence
        .find_by_parent::<PurchaseOrder>(&jo.id)
        .map_err(internal("Failed to look up purchase order"))?;

    let update: MaterialTransferUpdate = MaterialTransferUpdate {
        entries: request
            .entries
            .into_iter()
            .map(|line| TransferEntry {
                description: line.description,
                quantity: line.quantity,
                remarks: line.remarks,
            })
            .collect(),
        complete: request.complete,
    };

    let transition: Transition<JobOrder> =
        procura::apply_material_transfer(&jo, po.as_ref(), update, &actor.to_actor(), ctx)
            .map_err(translate_core_error)?;

    let message: String = format!(
        "Material transfer for job order {} recorded ({})",
        jo.number, transition.document.status
    );
    commit(persistence, sink, transition, message)
}

// ============================================================================
// Purchase orders and receiving reports
// ============================================================================

/// Raises the purchase order for a material requisition.
///
/// # Errors
///
/// Returns an error if the caller is not in Purchasing, the job order is
/// not a material requisition, or it already has a purchase order.
pub fn create_purchase_order(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    request: CreatePurchaseOrderRequest,
) -> Result<ApiResult<PurchaseOrder>, ApiError> {
    let jo: JobOrder = load(persistence, &request.job_order_id)?;
    let role: LedgerRole = AuthorizationService::authorize(actor, &Capability::Procure)?;

    let existing: Option<PurchaseOrder> = persistence
        .find_by_parent::<PurchaseOrder>(&jo.id)
        .map_err(internal("Failed to look up purchase order"))?;

    let draft: PurchaseOrderDraft = PurchaseOrderDraft {
        items: request.items,
        supplier: request.supplier,
        tax_amount: request.tax_amount,
        submit_as: request.submit.then_some(role),
    };

    let identity: NewDocument = allocate(persistence, DocumentKind::PurchaseOrder, ctx)?;
    let transition: Transition<PurchaseOrder> = procura::create_purchase_order(
        identity,
        &jo,
        existing.as_ref(),
        draft,
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    let message: String = format!(
        "Purchase order {} created for job order {} (total {})",
        transition.document.number, jo.number, transition.document.total_amount
    );
    commit_new(persistence, sink, transition, message)
}

/// Records a submission or decision on a purchase order.
///
/// Submitting is a Purchasing action; approving or rejecting requires the
/// President, with Finance recording a review.
///
/// # Errors
///
/// Returns an error if the caller lacks the capability for the action, the
/// caller already acted, or the purchase order is already decided.
pub fn decide_purchase_order(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: ApprovalRequest,
) -> Result<ApiResult<PurchaseOrder>, ApiError> {
    let po: PurchaseOrder = load(persistence, id)?;
    let action: ApprovalAction = parse_label(&request.action)?;
    let capability: Capability<'_> = if action == ApprovalAction::Submitted {
        Capability::Procure
    } else {
        Capability::ApprovePurchaseOrder
    };
    let role: LedgerRole = AuthorizationService::authorize(actor, &capability)?;

    let transition: Transition<PurchaseOrder> = procura::apply_purchase_order(
        &po,
        PurchaseOrderCommand::Decide(SignOff::new(role, action, request.comments)),
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    info!(
        po = %po.number,
        actor_id = %actor.id,
        %role,
        %action,
        status = %transition.document.status,
        "Purchase order decision recorded"
    );
    let message: String = format!(
        "Purchase order {} is {}",
        po.number, transition.document.status
    );
    commit(persistence, sink, transition, message)
}

/// Sets a purchase order status explicitly.
///
/// Marking a purchase order RECEIVED returns a follow-up that advances its
/// job order.
///
/// # Errors
///
/// Returns an error if the purchase order is missing or the label is
/// invalid.
pub fn change_purchase_order_status(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: StatusChangeRequest,
) -> Result<ApiResult<PurchaseOrder>, ApiError> {
    let po: PurchaseOrder = load(persistence, id)?;
    let status: PurchaseOrderStatus = parse_label(&request.status)?;

    let transition: Transition<PurchaseOrder> = procura::apply_purchase_order(
        &po,
        PurchaseOrderCommand::ChangeStatus { status },
        &actor.to_actor(),
        ctx,
    )
    .map_err(translate_core_error)?;

    info!(po = %po.number, from = %po.status, to = %status, "Purchase order status changed");
    let message: String = format!("Purchase order {} is {status}", po.number);
    commit(persistence, sink, transition, message)
}

/// Files a receiving report for a received purchase order.
///
/// # Errors
///
/// Returns an error if the caller is not in Purchasing or the purchase
/// order is not RECEIVED.
pub fn create_receiving_report(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    request: CreateReceivingReportRequest,
) -> Result<ApiResult<ReceivingReport>, ApiError> {
    let po: PurchaseOrder = load(persistence, &request.purchase_order_id)?;
    AuthorizationService::authorize(actor, &Capability::Procure)?;

    let draft: ReceivingReportDraft = ReceivingReportDraft {
        lines: request
            .items
            .into_iter()
            .map(|line| ReceivedLine {
                description: line.description,
                quantity_received: line.quantity_received,
                quantity_ordered: line.quantity_ordered,
                unit_price: line.unit_price,
                supplier: line.supplier,
            })
            .collect(),
        remarks: request.remarks,
    };

    let identity: NewDocument = allocate(persistence, DocumentKind::ReceivingReport, ctx)?;
    let transition: Transition<ReceivingReport> =
        procura::create_receiving_report(identity, &po, draft, &actor.to_actor(), ctx)
            .map_err(translate_core_error)?;

    let message: String = format!(
        "Receiving report {} filed for purchase order {}",
        transition.document.number, po.number
    );
    commit_new(persistence, sink, transition, message)
}

/// Moves a receiving report one step forward.
///
/// # Errors
///
/// Returns an error if the caller is not in Purchasing or the change is not
/// a single forward step.
pub fn change_receiving_report_status(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    actor: &AuthenticatedActor,
    id: &str,
    request: StatusChangeRequest,
) -> Result<ApiResult<ReceivingReport>, ApiError> {
    let rr: ReceivingReport = load(persistence, id)?;
    AuthorizationService::authorize(actor, &Capability::Procure)?;
    let status: ReceivingReportStatus = parse_label(&request.status)?;

    let transition: Transition<ReceivingReport> =
        procura::apply_receiving_report(&rr, ReceivingReportCommand::ChangeStatus { status }, ctx)
            .map_err(translate_core_error)?;

    let message: String = format!("Receiving report {} is {status}", rr.number);
    commit(persistence, sink, transition, message)
}

// ============================================================================
// Follow-ups
// ============================================================================

/// Runs one follow-up step.
///
/// Returns the updated job order, or `None` when the step had nothing to
/// do. Each step is independent: a failure here never undoes the primary
/// write that issued it.
///
/// # Errors
///
/// Returns an error if the dependent document is missing or cannot be
/// saved.
pub fn execute_follow_up(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    ctx: &WorkflowContext,
    follow_up: &FollowUp,
) -> Result<Option<JobOrder>, ApiError> {
    match follow_up {
        FollowUp::AdvanceJobOrderOnReceipt {
            job_order_id,
            purchase_order_number,
        } => {
            let jo: JobOrder = load(persistence, job_order_id)?;
            let Some(transition) = advance_job_order_on_receipt(&jo, purchase_order_number, ctx)
            else {
                debug!(jo = %jo.number, status = %jo.status, "Job order already advanced");
                return Ok(None);
            };

            let message: String = format!(
                "Job order {} advanced after purchase order {purchase_order_number} was received",
                jo.number
            );
            let result: ApiResult<JobOrder> = commit(persistence, sink, transition, message)?;
            info!(jo = %jo.number, po = %purchase_order_number, "Job order advanced on receipt");
            Ok(Some(result.response.document))
        }
    }
}
