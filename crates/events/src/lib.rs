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
    clippy::all
)]

use procura_domain::{Department, DocumentKind, LedgerRole, Role};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// The authenticated user performing a workflow action.
///
/// Every approval record and notification is attributed to an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The actor's display name, stamped on approval records.
    pub name: String,
    /// The actor's account role.
    pub role: Role,
    /// The actor's canonicalized department.
    pub department: Department,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `name` - The display name
    /// * `role` - The account role
    /// * `department` - The canonicalized department
    #[must_use]
    pub const fn new(id: String, name: String, role: Role, department: Department) -> Self {
        Self {
            id,
            name,
            role,
            department,
        }
    }

    /// Returns this actor as a notification recipient.
    #[must_use]
    pub fn as_recipient(&self) -> Recipient {
        Recipient::User {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Who a notification is addressed to.
///
/// Resolving a recipient to addresses is the delivery channel's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recipient {
    /// Everyone acting as the given ledger role.
    LedgerRole {
        /// The ledger role addressed.
        role: LedgerRole,
    },
    /// The approvers of a department.
    Department {
        /// The department addressed.
        department: Department,
    },
    /// A single user, usually the requester.
    User {
        /// The user's id.
        id: String,
        /// The user's display name.
        name: String,
    },
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LedgerRole { role } => write!(f, "role:{role}"),
            Self::Department { department } => write!(f, "department:{department}"),
            Self::User { id, .. } => write!(f, "user:{id}"),
        }
    }
}

/// The workflow step a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    ServiceRequestSubmitted,
    ServiceRequestApproved,
    ServiceRequestRejected,
    JobOrderCreated,
    JobOrderAwaitingApproval,
    JobOrderApproved,
    JobOrderRejected,
    CanvassCompleted,
    JobOrderStarted,
    JobOrderCompleted,
    JobOrderAccepted,
    PurchaseOrderCreated,
    PurchaseOrderSubmitted,
    PurchaseOrderApproved,
    PurchaseOrderRejected,
    PurchaseOrderReceived,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceRequestSubmitted => "SERVICE_REQUEST_SUBMITTED",
            Self::ServiceRequestApproved => "SERVICE_REQUEST_APPROVED",
            Self::ServiceRequestRejected => "SERVICE_REQUEST_REJECTED",
            Self::JobOrderCreated => "JOB_ORDER_CREATED",
            Self::JobOrderAwaitingApproval => "JOB_ORDER_AWAITING_APPROVAL",
            Self::JobOrderApproved => "JOB_ORDER_APPROVED",
            Self::JobOrderRejected => "JOB_ORDER_REJECTED",
            Self::CanvassCompleted => "CANVASS_COMPLETED",
            Self::JobOrderStarted => "JOB_ORDER_STARTED",
            Self::JobOrderCompleted => "JOB_ORDER_COMPLETED",
            Self::JobOrderAccepted => "JOB_ORDER_ACCEPTED",
            Self::PurchaseOrderCreated => "PURCHASE_ORDER_CREATED",
            Self::PurchaseOrderSubmitted => "PURCHASE_ORDER_SUBMITTED",
            Self::PurchaseOrderApproved => "PURCHASE_ORDER_APPROVED",
            Self::PurchaseOrderRejected => "PURCHASE_ORDER_REJECTED",
            Self::PurchaseOrderReceived => "PURCHASE_ORDER_RECEIVED",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable notification emitted by a workflow step.
///
/// At most one event is emitted per step. Events are handed to the
/// notification sink after the primary document has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// What happened.
    pub kind: NotificationKind,
    /// The kind of the document concerned.
    pub entity_type: DocumentKind,
    /// The document id.
    pub entity_id: String,
    /// The human-readable document number.
    pub entity_number: String,
    /// Who should be told.
    pub recipient: Recipient,
    /// A short human-readable description.
    pub label: String,
    /// When the step happened.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

impl NotificationEvent {
    /// Creates a new `NotificationEvent`.
    ///
    /// # Arguments
    ///
    /// * `kind` - The workflow step
    /// * `entity_type` - The document kind
    /// * `entity_id` - The document id
    /// * `entity_number` - The document number
    /// * `recipient` - Who should be told
    /// * `label` - A short description
    /// * `occurred_at` - When the step happened
    #[must_use]
    pub const fn new(
        kind: NotificationKind,
        entity_type: DocumentKind,
        entity_id: String,
        entity_number: String,
        recipient: Recipient,
        label: String,
        occurred_at: OffsetDateTime,
    ) -> Self {
        Self {
            kind,
            entity_type,
            entity_id,
            entity_number,
            recipient,
            label,
            occurred_at,
        }
    }
}
