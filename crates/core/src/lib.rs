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

mod apply;
mod command;
mod config;
mod error;
mod notify;
mod procurement;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{
    apply_job_order, apply_material_transfer, apply_service_request, create_job_order,
    create_service_request,
};
pub use command::{
    BudgetUpdate, JobOrderCommand, JobOrderDetails, JobOrderDraft, MaterialTransferUpdate,
    NewDocument, PurchaseOrderCommand, PurchaseOrderDraft, ReceivedLine, ReceivingReportCommand,
    ReceivingReportDraft, ServiceRequestCommand, ServiceRequestDraft, ServiceRequestEdit, SignOff,
    TransferEntry,
};
pub use config::{CanvassPolicy, WorkflowConfig, WorkflowContext};
pub use error::CoreError;
pub use procurement::{
    advance_job_order_on_receipt, apply_purchase_order, apply_receiving_report,
    create_purchase_order, create_receiving_report,
};
pub use state::{FollowUp, Transition};
