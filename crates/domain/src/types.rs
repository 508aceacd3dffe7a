// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enumerated vocabulary shared by every workflow document.
//!
//! All free-text labels that arrive from callers (roles, departments,
//! service categories, statuses) are canonicalized here, at the ingress
//! boundary, so the rest of the system only ever compares enum values.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role of the acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Submits service requests and accepts completed work.
    Requester,
    /// Acts on documents within their own department.
    Approver,
    /// Bypasses department checks.
    Admin,
    /// Bypasses department checks.
    SuperAdmin,
    /// Legacy account role that satisfies the President gate.
    Management,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "REQUESTER",
            Self::Approver => "APPROVER",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Management => "MANAGEMENT",
        }
    }

    /// Returns true for ADMIN and SUPER_ADMIN, the roles that bypass
    /// department checks.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "REQUESTER" => Ok(Self::Requester),
            "APPROVER" => Ok(Self::Approver),
            "ADMIN" => Ok(Self::Admin),
            "SUPER_ADMIN" | "SUPERADMIN" => Ok(Self::SuperAdmin),
            "MANAGEMENT" => Ok(Self::Management),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonicalizes a free-text department label.
///
/// Lowercases, trims, and strips a trailing literal `department` suffix,
/// so `"IT"`, `" it "` and `"IT Department"` all produce `"it"`.
#[must_use]
pub fn normalize_department(label: &str) -> String {
    let lowered: String = label.trim().to_lowercase();
    lowered
        .strip_suffix("department")
        .unwrap_or(lowered.as_str())
        .trim()
        .to_string()
}

/// An organizational department.
///
/// Departments outside the known table are kept as `Other` holding the
/// normalized label, so equality is still suffix- and case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Department {
    It,
    Maintenance,
    Accounting,
    GeneralServices,
    Operations,
    Finance,
    Purchasing,
    President,
    Other(String),
}

impl Department {
    /// Parses a department label after normalization.
    #[must_use]
    pub fn canonical(label: &str) -> Self {
        match normalize_department(label).as_str() {
            "it" => Self::It,
            "maintenance" => Self::Maintenance,
            "accounting" => Self::Accounting,
            "general services" => Self::GeneralServices,
            "operations" => Self::Operations,
            "finance" => Self::Finance,
            "purchasing" => Self::Purchasing,
            "president" | "office of the president" => Self::President,
            other => Self::Other(other.to_string()),
        }
    }

    /// Parses a department label, rejecting labels that normalize to nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDepartment` if the label is blank.
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        if normalize_department(label).is_empty() {
            return Err(DomainError::InvalidDepartment(label.to_string()));
        }
        Ok(Self::canonical(label))
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::It => "IT",
            Self::Maintenance => "Maintenance",
            Self::Accounting => "Accounting",
            Self::GeneralServices => "General Services",
            Self::Operations => "Operations",
            Self::Finance => "Finance",
            Self::Purchasing => "Purchasing",
            Self::President => "President",
            Self::Other(label) => label,
        }
    }

    /// Returns true if this department may handle documents of the category.
    ///
    /// The President department is authorized for every category.
    #[must_use]
    pub fn is_authorized_for(&self, category: ServiceCategory) -> bool {
        *self == Self::President || *self == category.handling_department()
    }
}

impl From<String> for Department {
    fn from(value: String) -> Self {
        Self::canonical(&value)
    }
}

impl From<Department> for String {
    fn from(value: Department) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of work a service request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ServiceCategory {
    TechnicalSupport,
    FacilityMaintenance,
    AccountBillingInquiry,
    GeneralInquiry,
    Other,
}

impl ServiceCategory {
    /// Human-readable label, as used on forms.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TechnicalSupport => "Technical Support",
            Self::FacilityMaintenance => "Facility Maintenance",
            Self::AccountBillingInquiry => "Account/Billing Inquiry",
            Self::GeneralInquiry => "General Inquiry",
            Self::Other => "Other",
        }
    }

    /// The department that handles this category.
    #[must_use]
    pub const fn handling_department(&self) -> Department {
        match self {
            Self::TechnicalSupport => Department::It,
            Self::FacilityMaintenance => Department::Maintenance,
            Self::AccountBillingInquiry => Department::Accounting,
            Self::GeneralInquiry => Department::GeneralServices,
            Self::Other => Department::Operations,
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical support" | "technical_support" => Ok(Self::TechnicalSupport),
            "facility maintenance" | "facility_maintenance" => Ok(Self::FacilityMaintenance),
            "account/billing inquiry" | "account_billing_inquiry" => {
                Ok(Self::AccountBillingInquiry)
            }
            "general inquiry" | "general_inquiry" => Ok(Self::GeneralInquiry),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidServiceCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for ServiceCategory {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServiceCategory> for String {
    fn from(value: ServiceCategory) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            _ => Err(DomainError::InvalidPriority(s.to_string())),
        }
    }
}

/// Canonical role label stamped on an approval record.
///
/// Distinct from the acting user's account `Role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerRole {
    DepartmentHead,
    Finance,
    Management,
    Purchasing,
    Operations,
}

impl LedgerRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DepartmentHead => "DEPARTMENT_HEAD",
            Self::Finance => "FINANCE",
            Self::Management => "MANAGEMENT",
            Self::Purchasing => "PURCHASING",
            Self::Operations => "OPERATIONS",
        }
    }
}

impl FromStr for LedgerRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "DEPARTMENT_HEAD" => Ok(Self::DepartmentHead),
            "FINANCE" => Ok(Self::Finance),
            "MANAGEMENT" | "PRESIDENT" => Ok(Self::Management),
            "PURCHASING" => Ok(Self::Purchasing),
            "OPERATIONS" => Ok(Self::Operations),
            _ => Err(DomainError::InvalidLedgerRole(s.to_string())),
        }
    }
}

impl fmt::Display for LedgerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action recorded by an approval record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalAction {
    Submitted,
    Approved,
    Rejected,
    Noted,
    BudgetApproved,
    BudgetRejected,
}

impl ApprovalAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Noted => "NOTED",
            Self::BudgetApproved => "BUDGET_APPROVED",
            Self::BudgetRejected => "BUDGET_REJECTED",
        }
    }

    /// Budget sign-off actions, accepted only on job orders.
    #[must_use]
    pub const fn is_budget_action(&self) -> bool {
        matches!(self, Self::BudgetApproved | Self::BudgetRejected | Self::Noted)
    }
}

impl FromStr for ApprovalAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "SUBMITTED" => Ok(Self::Submitted),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "NOTED" => Ok(Self::Noted),
            "BUDGET_APPROVED" => Ok(Self::BudgetApproved),
            "BUDGET_REJECTED" => Ok(Self::BudgetRejected),
            _ => Err(DomainError::InvalidApprovalAction(s.to_string())),
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four workflow document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    ServiceRequest,
    JobOrder,
    PurchaseOrder,
    ReceivingReport,
}

impl DocumentKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceRequest => "SERVICE_REQUEST",
            Self::JobOrder => "JOB_ORDER",
            Self::PurchaseOrder => "PURCHASE_ORDER",
            Self::ReceivingReport => "RECEIVING_REPORT",
        }
    }

    /// Prefix of the human-readable document number, e.g. `SR` in `SR-2025-0001`.
    #[must_use]
    pub const fn number_prefix(&self) -> &'static str {
        match self {
            Self::ServiceRequest => "SR",
            Self::JobOrder => "JO",
            Self::PurchaseOrder => "PO",
            Self::ReceivingReport => "RR",
        }
    }

    /// Human-readable label used in messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ServiceRequest => "Service request",
            Self::JobOrder => "Job order",
            Self::PurchaseOrder => "Purchase order",
            Self::ReceivingReport => "Receiving report",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a document number, e.g. `SR-2025-0001`.
#[must_use]
pub fn format_document_number(kind: DocumentKind, year: i32, sequence: u32) -> String {
    format!("{}-{year}-{sequence:04}", kind.number_prefix())
}

/// Service request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceRequestStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl ServiceRequestStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// APPROVED and REJECTED are both terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ServiceRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobOrderType {
    Service,
    MaterialRequisition,
}

impl JobOrderType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "SERVICE",
            Self::MaterialRequisition => "MATERIAL_REQUISITION",
        }
    }
}

impl FromStr for JobOrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "SERVICE" => Ok(Self::Service),
            "MATERIAL_REQUISITION" => Ok(Self::MaterialRequisition),
            _ => Err(DomainError::InvalidJobOrderType(s.to_string())),
        }
    }
}

impl fmt::Display for JobOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobOrderStatus {
    Draft,
    PendingCanvass,
    BudgetCleared,
    Approved,
    InProgress,
    Completed,
    Rejected,
    Closed,
}

impl JobOrderStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingCanvass => "PENDING_CANVASS",
            Self::BudgetCleared => "BUDGET_CLEARED",
            Self::Approved => "APPROVED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Closed => "CLOSED",
        }
    }

    /// Statuses owned by the ledger reducer.
    ///
    /// Everything else is set by explicit commands and must never be
    /// regressed by a ledger mutation.
    #[must_use]
    pub const fn is_approval_phase(&self) -> bool {
        matches!(
            self,
            Self::Draft | Self::PendingCanvass | Self::BudgetCleared | Self::Approved
        )
    }
}

impl FromStr for JobOrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PENDING_CANVASS" => Ok(Self::PendingCanvass),
            "BUDGET_CLEARED" => Ok(Self::BudgetCleared),
            "APPROVED" => Ok(Self::Approved),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "REJECTED" => Ok(Self::Rejected),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidStatus {
                kind: DocumentKind::JobOrder,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for JobOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    Purchased,
    Received,
    Closed,
}

impl PurchaseOrderStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Purchased => "PURCHASED",
            Self::Received => "RECEIVED",
            Self::Closed => "CLOSED",
        }
    }

    /// Returns true while the approval decision is still open.
    #[must_use]
    pub const fn is_awaiting_decision(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted)
    }
}

impl FromStr for PurchaseOrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "SUBMITTED" => Ok(Self::Submitted),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "PURCHASED" => Ok(Self::Purchased),
            "RECEIVED" => Ok(Self::Received),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidStatus {
                kind: DocumentKind::PurchaseOrder,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiving report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceivingReportStatus {
    Draft,
    Submitted,
    Completed,
}

impl ReceivingReportStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Validates a forward-only transition: DRAFT → SUBMITTED → COMPLETED.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not permitted.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid: bool = matches!(
            (self, new_status),
            (Self::Draft, Self::Submitted) | (Self::Submitted, Self::Completed)
        );

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                kind: DocumentKind::ReceivingReport,
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("receiving reports only move forward one step at a time"),
            })
        }
    }
}

impl FromStr for ReceivingReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "SUBMITTED" => Ok(Self::Submitted),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus {
                kind: DocumentKind::ReceivingReport,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReceivingReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
