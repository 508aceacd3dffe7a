// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Labels (roles, actions, statuses, categories) arrive as strings and are
//! parsed in the handlers so that a bad label is reported as invalid input
//! on the field that carried it.

use procura::FollowUp;
use procura_domain::{Manpower, MaterialItem, PurchaseOrderItem, SupplierInfo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API request to raise a service request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateServiceRequestRequest {
    /// The requesting department; defaults to the caller's department.
    #[serde(default)]
    pub department: Option<String>,
    /// The service category label.
    pub category: String,
    /// The priority label; defaults to MEDIUM.
    #[serde(default)]
    pub priority: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub budget_source: Option<String>,
    /// Keep the request in DRAFT instead of submitting it.
    #[serde(default)]
    pub save_as_draft: bool,
}

/// API request to edit an open service request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditServiceRequestRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub budget_source: Option<String>,
}

/// API request to record an approval decision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApprovalRequest {
    /// The approval action label, e.g. `APPROVED`.
    pub action: String,
    /// The ledger role to act as (job orders only); inferred when absent.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// API request to raise a job order for an approved service request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateJobOrderRequest {
    pub service_request_id: String,
    /// `SERVICE` or `MATERIAL_REQUISITION`.
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub work_description: String,
    #[serde(default)]
    pub materials: Vec<MaterialItem>,
    #[serde(default)]
    pub manpower: Manpower,
    /// An explicit estimate; overrides the computed one.
    #[serde(default)]
    pub estimated_total_cost: Option<Decimal>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
}

/// API request to update a job order budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateBudgetRequest {
    #[serde(default)]
    pub estimated_total_cost: Option<Decimal>,
    #[serde(default)]
    pub budget_source: Option<String>,
    #[serde(default)]
    pub cost_center: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    /// `BUDGET_APPROVED`, `BUDGET_REJECTED` or `NOTED`.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// API request carrying canvassed material prices.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CanvassRequest {
    pub materials: Vec<MaterialItem>,
}

/// API request to edit job order details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateJobOrderRequest {
    #[serde(default)]
    pub work_description: Option<String>,
    #[serde(default)]
    pub materials: Option<Vec<MaterialItem>>,
    #[serde(default)]
    pub manpower: Option<Manpower>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
}

/// API request for an execution step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutionRequest {
    /// `START`, `UPDATE_MILESTONE` or `COMPLETE`.
    pub step: String,
    #[serde(default)]
    pub milestone: Option<String>,
}

/// API request to accept completed work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AcceptanceRequest {
    #[serde(default)]
    pub remarks: Option<String>,
}

/// API request for an explicit status change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

/// One line of a material transfer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransferLine {
    pub description: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// API request to post material transfers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MaterialTransferRequest {
    #[serde(default)]
    pub entries: Vec<TransferLine>,
    /// Mark the transfer complete.
    #[serde(default)]
    pub complete: bool,
}

/// API request to raise a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePurchaseOrderRequest {
    pub job_order_id: String,
    pub items: Vec<PurchaseOrderItem>,
    #[serde(default)]
    pub supplier: SupplierInfo,
    #[serde(default)]
    pub tax_amount: Decimal,
    /// Submit for approval immediately.
    #[serde(default)]
    pub submit: bool,
}

/// One received line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReceivedLineRequest {
    pub description: String,
    pub quantity_received: Decimal,
    #[serde(default)]
    pub quantity_ordered: Option<Decimal>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub supplier: Option<String>,
}

/// API request to file a receiving report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateReceivingReportRequest {
    pub purchase_order_id: String,
    /// Received lines; empty means every ordered line arrived in full.
    #[serde(default)]
    pub items: Vec<ReceivedLineRequest>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// API response for any workflow action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResponse<D> {
    /// The document after the action.
    pub document: D,
    /// A success message.
    pub message: String,
}

/// Internal result of a handler.
///
/// Follow-ups are cross-document steps the caller runs after releasing the
/// store, one at a time, through `execute_follow_up`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<D> {
    /// The response for the caller.
    pub response: WorkflowResponse<D>,
    /// Dependent steps still to run.
    pub follow_ups: Vec<FollowUp>,
}

impl<D> ApiResult<D> {
    pub(crate) fn new(document: D, message: String) -> Self {
        Self {
            response: WorkflowResponse { document, message },
            follow_ups: Vec::new(),
        }
    }
}
