// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification delivery seam.
//!
//! Workflow steps emit `NotificationEvent`s; a `NotificationSink` turns
//! them into messages. Delivery is best effort: a failing sink is logged
//! and never fails the action that emitted the event.

use procura_events::NotificationEvent;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised by a notification sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// No address is known for the recipient.
    #[error("no address configured for recipient {recipient}")]
    NoAddress {
        /// The recipient that could not be resolved.
        recipient: String,
    },
    /// The channel refused or failed the delivery.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Delivers notification events.
pub trait NotificationSink: Send + Sync {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be delivered.
    fn deliver(&self, event: &NotificationEvent) -> Result<(), NotificationError>;
}

/// A sink that keeps every delivered event in memory.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotificationSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the delivered events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn deliver(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        self.events
            .lock()
            .map_err(|e| NotificationError::Delivery(e.to_string()))?
            .push(event.clone());
        Ok(())
    }
}

/// Hands an event to the sink, logging instead of failing.
pub fn dispatch(sink: &dyn NotificationSink, event: Option<&NotificationEvent>) {
    let Some(event) = event else {
        return;
    };

    match sink.deliver(event) {
        Ok(()) => info!(
            kind = %event.kind,
            entity = %event.entity_number,
            recipient = %event.recipient,
            "Notification delivered"
        ),
        Err(e) => warn!(
            kind = %event.kind,
            entity = %event.entity_number,
            recipient = %event.recipient,
            error = %e,
            "Notification delivery failed"
        ),
    }
}
