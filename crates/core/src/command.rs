// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commands represent caller intent as data only.
//!
//! Authorization happens before a command is built: every command that
//! appends to a ledger already carries the ledger role the caller was
//! resolved to.

use procura_domain::{
    ApprovalAction, Department, ExecutionStep, JobOrderStatus, JobOrderType, LedgerRole, Manpower,
    MaterialItem, Priority, PurchaseOrderItem, PurchaseOrderStatus, ReceivingReportStatus,
    ServiceCategory, SupplierInfo,
};
use rust_decimal::Decimal;
use time::OffsetDateTime;

/// The id and number allocated for a document about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    /// The opaque storage id.
    pub id: String,
    /// The human-readable number, e.g. `SR-2025-0001`.
    pub number: String,
}

impl NewDocument {
    #[must_use]
    pub const fn new(id: String, number: String) -> Self {
        Self { id, number }
    }
}

/// Fields supplied when raising a service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequestDraft {
    pub department: Department,
    pub category: ServiceCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Defaults to the creation time.
    pub requested_date: Option<OffsetDateTime>,
    pub target_date: Option<OffsetDateTime>,
    pub budget_source: Option<String>,
    /// Keep the request as a DRAFT instead of submitting it immediately.
    pub save_as_draft: bool,
}

/// Field edits on a service request. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRequestEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<ServiceCategory>,
    pub target_date: Option<OffsetDateTime>,
    pub budget_source: Option<String>,
}

/// A ledger entry requested by an authorized caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOff {
    /// The ledger role the caller was resolved to.
    pub role: LedgerRole,
    pub action: ApprovalAction,
    pub comments: Option<String>,
}

impl SignOff {
    #[must_use]
    pub const fn new(role: LedgerRole, action: ApprovalAction, comments: Option<String>) -> Self {
        Self {
            role,
            action,
            comments,
        }
    }
}

/// Commands on an existing service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRequestCommand {
    /// Submit a DRAFT request for department head review.
    Submit,
    /// Edit fields while the request is DRAFT or SUBMITTED.
    Edit(ServiceRequestEdit),
    /// Approve or reject the request.
    Decide(SignOff),
}

/// Fields supplied when creating a job order from a service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOrderDraft {
    pub job_type: JobOrderType,
    pub work_description: String,
    pub materials: Vec<MaterialItem>,
    pub manpower: Manpower,
    /// An explicit estimate that suppresses recomputation.
    pub estimated_total_cost: Option<Decimal>,
    /// Overrides the target date inherited from the service request.
    pub target_date: Option<OffsetDateTime>,
}

/// Budget fields merged by Finance or the President. `None` leaves a field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetUpdate {
    /// An explicit estimate; setting one marks the budget as overridden.
    pub estimated_total_cost: Option<Decimal>,
    pub budget_source: Option<String>,
    pub cost_center: Option<String>,
    pub remarks: Option<String>,
}

/// Job order fields editable before work starts. `None` leaves a field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOrderDetails {
    pub work_description: Option<String>,
    pub materials: Option<Vec<MaterialItem>>,
    pub manpower: Option<Manpower>,
    pub target_date: Option<OffsetDateTime>,
}

/// Commands on an existing job order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOrderCommand {
    /// Record an approval, rejection, note or budget sign-off.
    Approve(SignOff),
    /// Merge budget fields and optionally sign the budget off.
    UpdateBudget {
        update: BudgetUpdate,
        sign_off: Option<SignOff>,
    },
    /// Attach canvassed prices to a material requisition.
    SubmitCanvass { materials: Vec<MaterialItem> },
    /// Replace work details before execution starts.
    UpdateDetails(JobOrderDetails),
    /// Run a fulfillment step.
    Execute {
        step: ExecutionStep,
        /// Required for `UpdateMilestone`, optional otherwise.
        milestone: Option<String>,
    },
    /// Requester sign-off on completed work.
    Accept { remarks: Option<String> },
    /// Explicit status change, e.g. to CLOSED or REJECTED.
    ChangeStatus { status: JobOrderStatus },
}

/// One material hand-over posted against a job order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEntry {
    pub description: String,
    pub quantity: Decimal,
    pub remarks: Option<String>,
}

/// Material-transfer records to append, optionally completing the transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialTransferUpdate {
    pub entries: Vec<TransferEntry>,
    pub complete: bool,
}

/// Fields supplied when raising a purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrderDraft {
    pub items: Vec<PurchaseOrderItem>,
    pub supplier: SupplierInfo,
    pub tax_amount: Decimal,
    /// The Purchasing stamp to record when the order is submitted at once.
    pub submit_as: Option<LedgerRole>,
}

/// Commands on an existing purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOrderCommand {
    /// Record a submission, approval or rejection.
    Decide(SignOff),
    /// Set the status explicitly. RECEIVED schedules the job order advance.
    ChangeStatus { status: PurchaseOrderStatus },
}

/// One received line supplied when raising a receiving report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedLine {
    pub description: String,
    pub quantity_received: Decimal,
    /// Defaults to the matching purchase order line.
    pub quantity_ordered: Option<Decimal>,
    /// Defaults to the matching purchase order line.
    pub unit_price: Option<Decimal>,
    /// Defaults to the purchase order's supplier chain.
    pub supplier: Option<String>,
}

/// Fields supplied when raising a receiving report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceivingReportDraft {
    /// When empty every purchase order line is received in full.
    pub lines: Vec<ReceivedLine>,
    pub remarks: Option<String>,
}

/// Commands on an existing receiving report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceivingReportCommand {
    ChangeStatus { status: ReceivingReportStatus },
}
