// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role and department resolution.
//!
//! Given the acting user's account role and department plus the context of
//! the operation (a target department or a service category), decides
//! whether the user holds the requested capability and which ledger role
//! they act as. The resolver is pure; callers turn a `Denial` into a
//! Forbidden response.
//!
//! ADMIN and SUPER_ADMIN bypass every department check. The President gate
//! (PO approval, budget sign-off as MANAGEMENT) is additionally satisfied by
//! the MANAGEMENT account role and by members of the President department.

use crate::types::{Department, LedgerRole, Role, ServiceCategory};
use std::fmt;

/// A capability requested by an operation, with the context it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability<'a> {
    /// Approve or reject a service request of `department`.
    ApproveServiceRequest {
        /// The service request's department.
        department: &'a Department,
    },
    /// Create a job order for an approved request of `category`.
    CreateJobOrder {
        /// The service request's category.
        category: ServiceCategory,
    },
    /// Start, progress, complete, edit, or re-status a job order of `category`.
    HandleJobOrder {
        /// The job order's category.
        category: ServiceCategory,
    },
    /// Record a job order approval stamped as `requested`.
    ApproveJobOrder {
        /// The ledger role the caller asks to be stamped as.
        requested: LedgerRole,
        /// The job order's category.
        category: ServiceCategory,
    },
    /// Update a job order budget and optionally sign it off.
    ReviewBudget,
    /// Submit canvassed prices for a material requisition.
    SubmitCanvass,
    /// Create or submit a purchase order, or manage receiving reports.
    Procure,
    /// Approve or reject a purchase order.
    ApprovePurchaseOrder,
}

impl Capability<'_> {
    /// Short name used in denial messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ApproveServiceRequest { .. } => "approve_service_request",
            Self::CreateJobOrder { .. } => "create_job_order",
            Self::HandleJobOrder { .. } => "handle_job_order",
            Self::ApproveJobOrder { .. } => "approve_job_order",
            Self::ReviewBudget => "review_budget",
            Self::SubmitCanvass => "submit_canvass",
            Self::Procure => "procure",
            Self::ApprovePurchaseOrder => "approve_purchase_order",
        }
    }
}

/// Why a capability was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// Only a department head of the document's department may act.
    NotDepartmentHead {
        /// The department that owns the document.
        required: Department,
        /// The caller's department.
        actual: Department,
        /// The caller's role.
        role: Role,
    },
    /// The caller's department does not handle the service category.
    NotHandlingDepartment {
        /// The category of the document.
        category: ServiceCategory,
        /// The caller's department.
        actual: Department,
    },
    /// Only members of a specific department may act.
    WrongDepartment {
        /// The department required.
        required: Department,
        /// The caller's department.
        actual: Department,
    },
    /// Only the President (or ADMIN/SUPER_ADMIN) may act.
    NotPresident,
    /// Only Finance or the President may act.
    NotBudgetReviewer {
        /// The caller's department.
        actual: Department,
    },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDepartmentHead {
                required,
                actual,
                role,
            } => write!(
                f,
                "requires the {required} department head (caller is {role} in {actual})"
            ),
            Self::NotHandlingDepartment { category, actual } => write!(
                f,
                "{actual} is not authorized for {category} (handled by {})",
                category.handling_department()
            ),
            Self::WrongDepartment { required, actual } => {
                write!(f, "requires the {required} department (caller is in {actual})")
            }
            Self::NotPresident => f.write_str("requires the President or an administrator"),
            Self::NotBudgetReviewer { actual } => write!(
                f,
                "requires Finance or the President (caller is in {actual})"
            ),
        }
    }
}

/// Returns true if the caller satisfies the President gate.
#[must_use]
pub fn is_president(role: Role, department: &Department) -> bool {
    role.is_admin() || role == Role::Management || *department == Department::President
}

/// Resolves a capability for `(role, department)`.
///
/// On success returns the ledger role the caller acts as.
///
/// # Errors
///
/// Returns a `Denial` describing why the caller lacks the capability.
pub fn resolve(
    role: Role,
    department: &Department,
    capability: &Capability<'_>,
) -> Result<LedgerRole, Denial> {
    match *capability {
        Capability::ApproveServiceRequest { department: owner } => {
            if role.is_admin() || (role == Role::Approver && department == owner) {
                Ok(LedgerRole::DepartmentHead)
            } else {
                Err(Denial::NotDepartmentHead {
                    required: owner.clone(),
                    actual: department.clone(),
                    role,
                })
            }
        }
        Capability::CreateJobOrder { category } | Capability::HandleJobOrder { category } => {
            if role.is_admin() || department.is_authorized_for(category) {
                Ok(LedgerRole::Operations)
            } else {
                Err(Denial::NotHandlingDepartment {
                    category,
                    actual: department.clone(),
                })
            }
        }
        Capability::ApproveJobOrder {
            requested,
            category,
        } => resolve_job_order_stamp(role, department, requested, category),
        Capability::ReviewBudget => {
            if is_president(role, department) {
                Ok(LedgerRole::Management)
            } else if *department == Department::Finance {
                Ok(LedgerRole::Finance)
            } else {
                Err(Denial::NotBudgetReviewer {
                    actual: department.clone(),
                })
            }
        }
        Capability::SubmitCanvass | Capability::Procure => {
            require_department(role, department, &Department::Purchasing)
                .map(|()| LedgerRole::Purchasing)
        }
        Capability::ApprovePurchaseOrder => {
            if is_president(role, department) {
                Ok(LedgerRole::Management)
            } else if *department == Department::Finance {
                Ok(LedgerRole::Finance)
            } else {
                Err(Denial::NotPresident)
            }
        }
    }
}

/// Checks that the caller may be stamped as `requested` on a job order.
fn resolve_job_order_stamp(
    role: Role,
    department: &Department,
    requested: LedgerRole,
    category: ServiceCategory,
) -> Result<LedgerRole, Denial> {
    if role.is_admin() {
        return Ok(requested);
    }
    match requested {
        LedgerRole::Management => {
            if is_president(role, department) {
                Ok(requested)
            } else {
                Err(Denial::NotPresident)
            }
        }
        LedgerRole::Finance => {
            require_department(role, department, &Department::Finance).map(|()| requested)
        }
        LedgerRole::Purchasing => {
            require_department(role, department, &Department::Purchasing).map(|()| requested)
        }
        LedgerRole::DepartmentHead | LedgerRole::Operations => {
            if !department.is_authorized_for(category) {
                Err(Denial::NotHandlingDepartment {
                    category,
                    actual: department.clone(),
                })
            } else if role == Role::Approver {
                Ok(requested)
            } else {
                Err(Denial::NotDepartmentHead {
                    required: category.handling_department(),
                    actual: department.clone(),
                    role,
                })
            }
        }
    }
}

fn require_department(
    role: Role,
    department: &Department,
    required: &Department,
) -> Result<(), Denial> {
    if role.is_admin() || department == required {
        Ok(())
    } else {
        Err(Denial::WrongDepartment {
            required: required.clone(),
            actual: department.clone(),
        })
    }
}
