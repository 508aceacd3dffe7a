// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status reducers.
//!
//! Each reducer is a pure function of the document type, its current
//! status and a ledger snapshot (or the record just admitted). None of them
//! touch storage. Explicit lifecycle commands (execution steps, manual
//! status changes, receipt and transfer side effects) are validated here as
//! well so that every status rule lives in one place.

use crate::error::DomainError;
use crate::ledger::{ApprovalLedger, ApprovalRecord};
use crate::types::{
    ApprovalAction, DocumentKind, JobOrderStatus, JobOrderType, LedgerRole, PurchaseOrderStatus,
    ServiceRequestStatus,
};
use std::fmt;
use std::str::FromStr;

/// Derives a service request status from the action just recorded.
///
/// Terminal statuses are never left.
#[must_use]
pub const fn reduce_service_request(
    current: ServiceRequestStatus,
    action: ApprovalAction,
) -> ServiceRequestStatus {
    if current.is_terminal() {
        return current;
    }
    match action {
        ApprovalAction::Approved => ServiceRequestStatus::Approved,
        ApprovalAction::Rejected => ServiceRequestStatus::Rejected,
        ApprovalAction::Submitted => ServiceRequestStatus::Submitted,
        _ => current,
    }
}

/// Derives a job order status from its ledger.
///
/// Only the approval phase is governed by the ledger. A job order already
/// IN_PROGRESS, COMPLETED, REJECTED or CLOSED keeps its status.
///
/// For SERVICE job orders only a MANAGEMENT approval counts. For material
/// requisitions an explicit APPROVED from any role approves directly;
/// otherwise both a FINANCE and a MANAGEMENT budget sign-off are needed,
/// and a NOTED record clears the budget.
#[must_use]
pub fn reduce_job_order(
    job_type: JobOrderType,
    current: JobOrderStatus,
    ledger: &ApprovalLedger,
) -> JobOrderStatus {
    if !current.is_approval_phase() {
        return current;
    }

    let base: JobOrderStatus = if current == JobOrderStatus::PendingCanvass {
        JobOrderStatus::PendingCanvass
    } else {
        JobOrderStatus::Draft
    };

    match job_type {
        JobOrderType::Service => {
            if ledger.contains(LedgerRole::Management, ApprovalAction::Approved) {
                JobOrderStatus::Approved
            } else {
                base
            }
        }
        JobOrderType::MaterialRequisition => {
            if ledger.has_action(ApprovalAction::Approved) || has_dual_budget_sign_off(ledger) {
                JobOrderStatus::Approved
            } else if ledger.has_action(ApprovalAction::Noted) {
                JobOrderStatus::BudgetCleared
            } else {
                base
            }
        }
    }
}

/// Returns true when both FINANCE and MANAGEMENT approved the budget.
#[must_use]
pub fn has_dual_budget_sign_off(ledger: &ApprovalLedger) -> bool {
    ledger.contains(LedgerRole::Finance, ApprovalAction::BudgetApproved)
        && ledger.contains(LedgerRole::Management, ApprovalAction::BudgetApproved)
}

/// Derives a purchase order status from the record just admitted.
///
/// Only a MANAGEMENT approval approves; any rejection rejects. A SUBMITTED
/// record moves a DRAFT order to SUBMITTED.
#[must_use]
pub fn reduce_purchase_order(
    current: PurchaseOrderStatus,
    record: &ApprovalRecord,
) -> PurchaseOrderStatus {
    match (record.action, record.role) {
        (ApprovalAction::Rejected, _) => PurchaseOrderStatus::Rejected,
        (ApprovalAction::Approved, LedgerRole::Management) => PurchaseOrderStatus::Approved,
        (ApprovalAction::Submitted, _) if current == PurchaseOrderStatus::Draft => {
            PurchaseOrderStatus::Submitted
        }
        _ => current,
    }
}

/// An explicit fulfillment step on a job order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStep {
    Start,
    UpdateMilestone,
    Complete,
}

impl ExecutionStep {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::UpdateMilestone => "UPDATE_MILESTONE",
            Self::Complete => "COMPLETE",
        }
    }

    /// Validates the step against the current status and returns the status
    /// the job order moves to.
    ///
    /// # Arguments
    ///
    /// * `number` - The job order number, used in the error message
    /// * `current` - The current job order status
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` naming the required status.
    pub fn apply(
        &self,
        number: &str,
        current: JobOrderStatus,
    ) -> Result<JobOrderStatus, DomainError> {
        let (allowed, required, next): (bool, &str, JobOrderStatus) = match self {
            Self::Start => (
                matches!(
                    current,
                    JobOrderStatus::Approved | JobOrderStatus::BudgetCleared
                ),
                "APPROVED or BUDGET_CLEARED",
                JobOrderStatus::InProgress,
            ),
            Self::UpdateMilestone => (
                current == JobOrderStatus::InProgress,
                "IN_PROGRESS",
                JobOrderStatus::InProgress,
            ),
            Self::Complete => (
                current == JobOrderStatus::InProgress,
                "IN_PROGRESS",
                JobOrderStatus::Completed,
            ),
        };

        if allowed {
            Ok(next)
        } else {
            Err(DomainError::InvalidState {
                kind: DocumentKind::JobOrder,
                number: number.to_string(),
                current: current.as_str().to_string(),
                required: required.to_string(),
            })
        }
    }
}

impl FromStr for ExecutionStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "START" => Ok(Self::Start),
            "UPDATE_MILESTONE" => Ok(Self::UpdateMilestone),
            "COMPLETE" => Ok(Self::Complete),
            _ => Err(DomainError::InvalidStatus {
                kind: DocumentKind::JobOrder,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExecutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates an explicit job order status change.
///
/// CLOSED is terminal. Setting the current status again is a no-op and is
/// accepted.
///
/// # Errors
///
/// Returns `DomainError::InvalidStatusTransition` when leaving CLOSED.
pub fn validate_job_order_status_change(
    from: JobOrderStatus,
    to: JobOrderStatus,
) -> Result<(), DomainError> {
    if from == JobOrderStatus::Closed && to != JobOrderStatus::Closed {
        return Err(DomainError::InvalidStatusTransition {
            kind: DocumentKind::JobOrder,
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
            reason: String::from("closed job orders cannot be reopened"),
        });
    }
    Ok(())
}

/// The status a job order moves to when its purchase order is received.
///
/// Returns `None` when the job order is already IN_PROGRESS or beyond, or
/// was closed or rejected, so repeated receipts are no-ops.
#[must_use]
pub const fn advance_on_receipt(current: JobOrderStatus) -> Option<JobOrderStatus> {
    match current {
        JobOrderStatus::InProgress
        | JobOrderStatus::Completed
        | JobOrderStatus::Rejected
        | JobOrderStatus::Closed => None,
        _ => Some(JobOrderStatus::InProgress),
    }
}

/// The status a job order moves to when its material transfer completes.
///
/// Material requisitions complete; service job orders start unless already
/// IN_PROGRESS or COMPLETED. Closed and rejected job orders are left alone.
#[must_use]
pub const fn advance_on_transfer(
    job_type: JobOrderType,
    current: JobOrderStatus,
) -> Option<JobOrderStatus> {
    match (job_type, current) {
        (_, JobOrderStatus::Closed | JobOrderStatus::Rejected)
        | (JobOrderType::Service, JobOrderStatus::InProgress | JobOrderStatus::Completed) => {
            None
        }
        (JobOrderType::MaterialRequisition, _) => Some(JobOrderStatus::Completed),
        (JobOrderType::Service, _) => Some(JobOrderStatus::InProgress),
    }
}
