// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The four workflow documents.
//!
//! Documents are plain data. Every mutation goes through the orchestrator
//! in the core crate, and every status derivation through the reducers in
//! `status`.

use crate::ledger::ApprovalLedger;
use crate::types::{
    Department, DocumentKind, JobOrderStatus, JobOrderType, Priority, PurchaseOrderStatus,
    ReceivingReportStatus, ServiceCategory, ServiceRequestStatus,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Supplier label used on receiving reports when no supplier is known.
pub const UNKNOWN_SUPPLIER: &str = "Unknown Supplier";

/// Behaviour shared by every stored document.
pub trait Document: Serialize + DeserializeOwned {
    /// The document kind, used as the storage discriminator.
    const KIND: DocumentKind;

    fn id(&self) -> &str;

    fn number(&self) -> &str;

    /// The id of the document this one was created from, if any.
    fn parent_id(&self) -> Option<&str>;

    fn created_at(&self) -> OffsetDateTime;

    fn updated_at(&self) -> OffsetDateTime;
}

/// A request for work raised by a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    pub number: String,
    pub requester_id: String,
    pub requester_name: String,
    pub department: Department,
    pub category: ServiceCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub budget_source: Option<String>,
    pub status: ServiceRequestStatus,
    #[serde(default)]
    pub approvals: ApprovalLedger,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Document for ServiceRequest {
    const KIND: DocumentKind = DocumentKind::ServiceRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn number(&self) -> &str {
        &self.number
    }

    fn parent_id(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

/// A material line on a job order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub description: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit: String,
    /// Estimated unit cost, or the canvassed price once Purchasing has
    /// priced the item.
    pub estimated_cost: Decimal,
    #[serde(default)]
    pub supplier: Option<String>,
}

/// Manpower assignment for a job order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manpower {
    #[serde(default)]
    pub assigned_personnel: Vec<String>,
    #[serde(default)]
    pub outsource: bool,
    #[serde(default)]
    pub outsource_price: Option<Decimal>,
}

/// Budget block of a job order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub estimated_total_cost: Decimal,
    /// When true the estimate was supplied explicitly and is not
    /// recomputed from materials and outsourcing.
    #[serde(default)]
    pub cost_override: bool,
    #[serde(default)]
    pub budget_source: Option<String>,
    #[serde(default)]
    pub cost_center: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub cleared_by: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub cleared_at: Option<OffsetDateTime>,
}

/// A progress note recorded while a job order is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub description: String,
    pub recorded_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

/// Execution block of a job order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub actual_start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub actual_completion_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Requester sign-off on completed work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceptance {
    pub accepted_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub accepted_at: OffsetDateTime,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// One hand-over of received materials to the requesting department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub description: String,
    pub quantity: Decimal,
    pub transferred_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub transferred_at: OffsetDateTime,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Material-transfer block of a job order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialTransfer {
    #[serde(default)]
    pub records: Vec<TransferRecord>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

/// Work authorized by an approved service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOrder {
    pub id: String,
    pub number: String,
    pub service_request_id: String,
    pub service_request_number: String,
    #[serde(rename = "type")]
    pub job_type: JobOrderType,
    pub status: JobOrderStatus,
    pub requester_id: String,
    pub requester_name: String,
    pub department: Department,
    pub category: ServiceCategory,
    pub priority: Priority,
    pub handling_department: Department,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub work_description: String,
    #[serde(default)]
    pub materials: Vec<MaterialItem>,
    #[serde(default)]
    pub manpower: Manpower,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub execution: Execution,
    #[serde(default)]
    pub acceptance: Option<Acceptance>,
    #[serde(default)]
    pub transfer: MaterialTransfer,
    #[serde(default)]
    pub approvals: ApprovalLedger,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Document for JobOrder {
    const KIND: DocumentKind = DocumentKind::JobOrder;

    fn id(&self) -> &str {
        &self.id
    }

    fn number(&self) -> &str {
        &self.number
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.service_request_id)
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

/// PO-level supplier details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

/// A line on a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    pub description: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub supplier_contact: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub delivery_date: Option<OffsetDateTime>,
}

/// Procurement of materials for a material requisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub number: String,
    pub job_order_id: String,
    pub job_order_number: String,
    pub items: Vec<PurchaseOrderItem>,
    #[serde(default)]
    pub supplier: SupplierInfo,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub status: PurchaseOrderStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub received_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub approvals: ApprovalLedger,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl PurchaseOrder {
    /// Resolves the supplier for a line: the item's own supplier, then the
    /// PO-level supplier, then `UNKNOWN_SUPPLIER`. Blank names are skipped.
    #[must_use]
    pub fn supplier_for(&self, item: Option<&PurchaseOrderItem>) -> String {
        item.and_then(|i| non_blank(i.supplier_name.as_deref()))
            .or_else(|| non_blank(self.supplier.name.as_deref()))
            .unwrap_or(UNKNOWN_SUPPLIER)
            .to_string()
    }

    /// Finds the line whose description matches, ignoring case.
    #[must_use]
    pub fn item_by_description(&self, description: &str) -> Option<&PurchaseOrderItem> {
        let wanted: String = description.trim().to_lowercase();
        self.items
            .iter()
            .find(|i| i.description.trim().to_lowercase() == wanted)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Document for PurchaseOrder {
    const KIND: DocumentKind = DocumentKind::PurchaseOrder;

    fn id(&self) -> &str {
        &self.id
    }

    fn number(&self) -> &str {
        &self.number
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.job_order_id)
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

/// A received line on a receiving report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedItem {
    pub description: String,
    pub quantity_ordered: Decimal,
    pub quantity_received: Decimal,
    pub unit_price: Decimal,
    pub supplier: String,
}

/// Confirmation that purchase order items arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivingReport {
    pub id: String,
    pub number: String,
    pub purchase_order_id: String,
    pub purchase_order_number: String,
    pub items: Vec<ReceivedItem>,
    pub received_by: String,
    #[serde(default)]
    pub remarks: Option<String>,
    pub status: ReceivingReportStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Document for ReceivingReport {
    const KIND: DocumentKind = DocumentKind::ReceivingReport;

    fn id(&self) -> &str {
        &self.id
    }

    fn number(&self) -> &str {
        &self.number
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.purchase_order_id)
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}
