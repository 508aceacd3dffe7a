// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only approval ledger.
//!
//! Every approvable document carries one `ApprovalLedger`. What happens when
//! a record collides with an earlier one is decided by an `AdmissionPolicy`
//! chosen per document type:
//!
//! - service requests and purchase orders reject a second record with the
//!   same `(user_id, action)`;
//! - job orders let a ledger role supersede its own earlier record with the
//!   same `(role, action)`.
//!
//! Records are never mutated after insertion. Insertion order is preserved
//! and only matters for oldest/latest lookups.

use crate::types::{ApprovalAction, LedgerRole};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One approval, rejection, or note recorded against a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    /// The canonical ledger role the actor acted as.
    pub role: LedgerRole,
    /// The acting user's identifier.
    pub user_id: String,
    /// The acting user's display name.
    pub user_name: String,
    /// What the actor did.
    pub action: ApprovalAction,
    /// When the record was made.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Optional free-text comments.
    #[serde(default)]
    pub comments: Option<String>,
}

/// The outcome of offering a record to a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The record is new; append it.
    Append,
    /// The record supersedes the records at these positions.
    Replace(Vec<usize>),
    /// The record duplicates an earlier one and must be refused.
    Reject,
}

/// Per-document-type rule for records that collide with earlier ones.
pub trait AdmissionPolicy {
    /// Decides whether `incoming` may join `existing`.
    fn admit(&self, existing: &[ApprovalRecord], incoming: &ApprovalRecord) -> Admission;
}

/// Refuses a second record with the same `(user_id, action)`.
///
/// Used by service requests and purchase orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectDuplicate;

impl AdmissionPolicy for RejectDuplicate {
    fn admit(&self, existing: &[ApprovalRecord], incoming: &ApprovalRecord) -> Admission {
        let duplicate: bool = existing
            .iter()
            .any(|r| r.user_id == incoming.user_id && r.action == incoming.action);
        if duplicate {
            Admission::Reject
        } else {
            Admission::Append
        }
    }
}

/// Removes earlier records with the same `(role, action)` before appending.
///
/// Used by job orders, where a role may re-approve or re-reject a budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceSameRole;

impl AdmissionPolicy for ReplaceSameRole {
    fn admit(&self, existing: &[ApprovalRecord], incoming: &ApprovalRecord) -> Admission {
        let superseded: Vec<usize> = existing
            .iter()
            .enumerate()
            .filter(|(_, r)| r.role == incoming.role && r.action == incoming.action)
            .map(|(i, _)| i)
            .collect();
        if superseded.is_empty() {
            Admission::Append
        } else {
            Admission::Replace(superseded)
        }
    }
}

/// Ordered list of approval records for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApprovalLedger {
    records: Vec<ApprovalRecord>,
}

impl ApprovalLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Offers a record to the ledger under `policy`.
    ///
    /// On `Append` and `Replace` the ledger is updated; on `Reject` it is left
    /// untouched and the caller decides how to report the conflict.
    pub fn record<P: AdmissionPolicy>(
        &mut self,
        policy: &P,
        record: ApprovalRecord,
    ) -> Admission {
        let admission: Admission = policy.admit(&self.records, &record);
        match &admission {
            Admission::Append => self.records.push(record),
            Admission::Replace(superseded) => {
                let mut index: usize = 0;
                self.records.retain(|_| {
                    let keep: bool = !superseded.contains(&index);
                    index += 1;
                    keep
                });
                self.records.push(record);
            }
            Admission::Reject => {}
        }
        admission
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ApprovalRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if any record carries `action`, regardless of role.
    #[must_use]
    pub fn has_action(&self, action: ApprovalAction) -> bool {
        self.records.iter().any(|r| r.action == action)
    }

    /// Returns true if a record with exactly this `(role, action)` exists.
    #[must_use]
    pub fn contains(&self, role: LedgerRole, action: ApprovalAction) -> bool {
        self.records
            .iter()
            .any(|r| r.role == role && r.action == action)
    }

    /// Returns true if any record was made by `role`.
    #[must_use]
    pub fn has_role(&self, role: LedgerRole) -> bool {
        self.records.iter().any(|r| r.role == role)
    }

    /// The oldest record carrying `action`.
    #[must_use]
    pub fn oldest(&self, action: ApprovalAction) -> Option<&ApprovalRecord> {
        self.records.iter().find(|r| r.action == action)
    }

    /// The most recently inserted record.
    #[must_use]
    pub fn latest(&self) -> Option<&ApprovalRecord> {
        self.records.last()
    }
}
