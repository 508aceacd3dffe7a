// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the procurement approval workflow.
//!
//! This crate authenticates callers, checks their capabilities, loads and
//! stores documents, and delivers the notifications that each workflow
//! step produces. It is transport-agnostic; the server maps it onto HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod notification;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, authenticate};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    accept_job_order, approve_job_order, change_job_order_status, change_purchase_order_status,
    change_receiving_report_status, create_job_order, create_purchase_order,
    create_receiving_report, create_service_request, decide_purchase_order,
    decide_service_request, edit_service_request, execute_follow_up, execute_job_order,
    get_document, list_documents, submit_canvass, submit_service_request, transfer_materials,
    update_job_order_budget, update_job_order_details,
};
pub use notification::{
    NotificationError, NotificationSink, RecordingNotificationSink, dispatch,
};
pub use request_response::{
    AcceptanceRequest, ApiResult, ApprovalRequest, CanvassRequest, CreateJobOrderRequest,
    CreatePurchaseOrderRequest, CreateReceivingReportRequest, CreateServiceRequestRequest,
    EditServiceRequestRequest, ExecutionRequest, MaterialTransferRequest, ReceivedLineRequest,
    StatusChangeRequest, TransferLine, UpdateBudgetRequest, UpdateJobOrderRequest,
    WorkflowResponse,
};
