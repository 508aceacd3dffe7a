// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ApprovalAction, DocumentKind};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Account role label is not recognized.
    InvalidRole(String),
    /// Department label is blank.
    InvalidDepartment(String),
    /// Service category label is not recognized.
    InvalidServiceCategory(String),
    /// Priority label is not recognized.
    InvalidPriority(String),
    /// Ledger role label is not recognized.
    InvalidLedgerRole(String),
    /// Approval action label is not recognized.
    InvalidApprovalAction(String),
    /// Job order type label is not recognized.
    InvalidJobOrderType(String),
    /// Status label is not recognized for the document kind.
    InvalidStatus {
        /// The document kind.
        kind: DocumentKind,
        /// The rejected label.
        value: String,
    },
    /// A required text field is empty.
    EmptyField(&'static str),
    /// A quantity or amount is negative or otherwise unusable.
    InvalidAmount {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// The action is not meaningful for the document kind.
    ActionNotAllowed {
        /// The document kind.
        kind: DocumentKind,
        /// The rejected action.
        action: ApprovalAction,
    },
    /// The referenced document does not exist.
    DocumentNotFound {
        /// The document kind.
        kind: DocumentKind,
        /// The identifier that was looked up.
        id: String,
    },
    /// The document is not in a status that permits the action.
    InvalidState {
        /// The document kind.
        kind: DocumentKind,
        /// The document number.
        number: String,
        /// The current status.
        current: String,
        /// The status (or statuses) the action requires.
        required: String,
    },
    /// A status change is not permitted by the document lifecycle.
    InvalidStatusTransition {
        /// The document kind.
        kind: DocumentKind,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// The same user already recorded the same action on this document.
    AlreadyActed {
        /// The document number.
        number: String,
        /// The user who acted.
        user_id: String,
        /// The duplicated action.
        action: ApprovalAction,
    },
    /// The approval decision for this document has already been made.
    AlreadyDecided {
        /// The document kind.
        kind: DocumentKind,
        /// The document number.
        number: String,
        /// The terminal status already reached.
        status: String,
    },
    /// A job order already exists for the service request.
    JobOrderExists {
        /// The service request number.
        service_request: String,
        /// The existing job order number.
        job_order: String,
    },
    /// A purchase order already exists for the job order.
    PurchaseOrderExists {
        /// The job order number.
        job_order: String,
        /// The existing purchase order number.
        purchase_order: String,
    },
    /// A material requisition has no purchase order yet.
    PurchaseOrderMissing {
        /// The job order number.
        job_order: String,
    },
    /// The job order type does not permit the operation.
    WrongJobOrderType {
        /// The job order number.
        number: String,
        /// The type the operation requires.
        expected: String,
        /// The type found on the job order.
        actual: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(value) => write!(f, "Invalid role: '{value}'"),
            Self::InvalidDepartment(value) => write!(f, "Invalid department: '{value}'"),
            Self::InvalidServiceCategory(value) => {
                write!(f, "Invalid service category: '{value}'")
            }
            Self::InvalidPriority(value) => write!(f, "Invalid priority: '{value}'"),
            Self::InvalidLedgerRole(value) => write!(f, "Invalid approval role: '{value}'"),
            Self::InvalidApprovalAction(value) => {
                write!(f, "Invalid approval action: '{value}'")
            }
            Self::InvalidJobOrderType(value) => write!(f, "Invalid job order type: '{value}'"),
            Self::InvalidStatus { kind, value } => {
                write!(f, "Invalid {} status: '{value}'", kind.label().to_lowercase())
            }
            Self::EmptyField(field) => write!(f, "Field '{field}' must not be empty"),
            Self::InvalidAmount { field, reason } => {
                write!(f, "Invalid value for '{field}': {reason}")
            }
            Self::ActionNotAllowed { kind, action } => {
                write!(
                    f,
                    "Action {action} is not allowed on a {}",
                    kind.label().to_lowercase()
                )
            }
            Self::DocumentNotFound { kind, id } => {
                write!(f, "{} '{id}' not found", kind.label())
            }
            Self::InvalidState {
                kind,
                number,
                current,
                required,
            } => {
                write!(
                    f,
                    "{} {number} must be {required} (current status: {current})",
                    kind.label()
                )
            }
            Self::InvalidStatusTransition {
                kind,
                from,
                to,
                reason,
            } => {
                write!(
                    f,
                    "{} cannot move from {from} to {to}: {reason}",
                    kind.label()
                )
            }
            Self::AlreadyActed {
                number,
                user_id,
                action,
            } => {
                write!(f, "User '{user_id}' has already acted ({action}) on {number}")
            }
            Self::AlreadyDecided {
                kind,
                number,
                status,
            } => {
                write!(f, "{} {number} has already been {status}", kind.label())
            }
            Self::JobOrderExists {
                service_request,
                job_order,
            } => {
                write!(
                    f,
                    "Service request {service_request} already has job order {job_order}"
                )
            }
            Self::PurchaseOrderExists {
                job_order,
                purchase_order,
            } => {
                write!(
                    f,
                    "Job order {job_order} already has purchase order {purchase_order}"
                )
            }
            Self::PurchaseOrderMissing { job_order } => {
                write!(f, "Job order {job_order} has no purchase order")
            }
            Self::WrongJobOrderType {
                number,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Job order {number} must be of type {expected}, but is {actual}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
