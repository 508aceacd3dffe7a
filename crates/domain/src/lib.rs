// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod budget;
mod documents;
mod error;
mod ledger;
mod resolver;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use budget::{
    budget_estimate, canvass_total, purchase_order_subtotal, purchase_order_total,
    validate_amount, validate_materials, validate_purchase_order_items,
};
pub use documents::{
    Acceptance, Budget, Document, Execution, JobOrder, Manpower, MaterialItem, MaterialTransfer,
    Milestone, PurchaseOrder, PurchaseOrderItem, ReceivedItem, ReceivingReport, ServiceRequest,
    SupplierInfo, TransferRecord, UNKNOWN_SUPPLIER,
};
pub use error::DomainError;
pub use ledger::{
    Admission, AdmissionPolicy, ApprovalLedger, ApprovalRecord, RejectDuplicate, ReplaceSameRole,
};
pub use resolver::{Capability, Denial, is_president, resolve};
pub use status::{
    ExecutionStep, advance_on_receipt, advance_on_transfer, has_dual_budget_sign_off,
    reduce_job_order, reduce_purchase_order, reduce_service_request,
    validate_job_order_status_change,
};

// Re-export public types
pub use types::{
    ApprovalAction, Department, DocumentKind, JobOrderStatus, JobOrderType, LedgerRole, Priority,
    PurchaseOrderStatus, ReceivingReportStatus, Role, ServiceCategory, ServiceRequestStatus,
    format_document_number, normalize_department,
};
