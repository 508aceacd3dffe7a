// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use procura_events::NotificationEvent;

/// A cross-document step scheduled by a transition.
///
/// Follow-ups run after the primary document is persisted. Each one is
/// best effort: a failure is logged and never undoes the primary write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Advance the owning job order after its purchase order was received.
    AdvanceJobOrderOnReceipt {
        /// The job order to advance.
        job_order_id: String,
        /// The purchase order that was received, for the notification label.
        purchase_order_number: String,
    },
}

/// The result of a successful transition.
///
/// Transitions are pure: the caller persists `document`, then dispatches
/// `notification`, then runs `follow_ups` in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<T> {
    /// The document after the transition.
    pub document: T,
    /// The event to hand to the notification sink, if any.
    pub notification: Option<NotificationEvent>,
    /// Dependent steps to run after persisting.
    pub follow_ups: Vec<FollowUp>,
}

impl<T> Transition<T> {
    pub(crate) const fn new(document: T, notification: Option<NotificationEvent>) -> Self {
        Self {
            document,
            notification,
            follow_ups: Vec::new(),
        }
    }

    pub(crate) fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_ups.push(follow_up);
        self
    }
}
