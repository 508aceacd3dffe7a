// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification delivery channels.
//!
//! Who approves for a department is static configuration: a JSON object
//! mapping recipient keys (`role:FINANCE`, `department:IT`, `user:req-1`)
//! to an address. Delivery itself is a structured log line; an outbound
//! mail or chat relay reads those.

use procura_api::{NotificationError, NotificationSink};
use procura_events::NotificationEvent;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Errors loading a recipient directory.
#[derive(Debug)]
pub enum DirectoryError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not a JSON object of strings.
    Parse(serde_json::Error),
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read recipient directory: {e}"),
            Self::Parse(e) => write!(f, "Invalid recipient directory: {e}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Logs every event without resolving an address.
#[derive(Debug, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn deliver(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        info!(
            kind = %event.kind,
            entity_type = %event.entity_type,
            entity = %event.entity_number,
            recipient = %event.recipient,
            label = %event.label,
            "Notification"
        );
        Ok(())
    }
}

/// Resolves recipients through a static directory before delivering.
#[derive(Debug, Default)]
pub struct DirectoryNotificationSink {
    addresses: HashMap<String, String>,
}

impl DirectoryNotificationSink {
    #[must_use]
    pub const fn new(addresses: HashMap<String, String>) -> Self {
        Self { addresses }
    }

    /// Loads the directory from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let raw: String = std::fs::read_to_string(path)?;
        let addresses: HashMap<String, String> = serde_json::from_str(&raw)?;
        Ok(Self::new(addresses))
    }

    /// The address configured for a recipient key, if any.
    #[must_use]
    pub fn address_for(&self, recipient: &str) -> Option<&str> {
        self.addresses.get(recipient).map(String::as_str)
    }
}

impl NotificationSink for DirectoryNotificationSink {
    fn deliver(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        let recipient: String = event.recipient.to_string();
        let address: &str =
            self.address_for(&recipient)
                .ok_or_else(|| NotificationError::NoAddress {
                    recipient: recipient.clone(),
                })?;

        info!(
            kind = %event.kind,
            entity = %event.entity_number,
            %recipient,
            %address,
            label = %event.label,
            "Notification sent"
        );
        Ok(())
    }
}
