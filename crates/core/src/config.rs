// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// How material requisitions reach the canvass step.
///
/// The creation path and the canvass gate disagree about PENDING_CANVASS,
/// so the resolution is explicit configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CanvassPolicy {
    /// Material requisitions are created DRAFT and canvass requires
    /// PENDING_CANVASS, which is only reachable through an explicit status
    /// change.
    #[default]
    Strict,
    /// Material requisitions are created PENDING_CANVASS.
    EnterOnCreation,
    /// Canvass is accepted from DRAFT as well as PENDING_CANVASS.
    AllowFromDraft,
}

impl CanvassPolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::EnterOnCreation => "enter-on-creation",
            Self::AllowFromDraft => "allow-from-draft",
        }
    }
}

impl FromStr for CanvassPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "strict" => Ok(Self::Strict),
            "enter-on-creation" => Ok(Self::EnterOnCreation),
            "allow-from-draft" => Ok(Self::AllowFromDraft),
            _ => Err(CoreError::InvalidConfiguration(format!(
                "unknown canvass policy '{s}' (expected strict, enter-on-creation or allow-from-draft)"
            ))),
        }
    }
}

impl fmt::Display for CanvassPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow behaviour selected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// How material requisitions reach the canvass step.
    pub canvass_policy: CanvassPolicy,
}

/// Per-request inputs every transition needs besides the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowContext {
    /// The time stamped on records and documents.
    pub now: OffsetDateTime,
    /// The active configuration.
    pub config: WorkflowConfig,
}

impl WorkflowContext {
    #[must_use]
    pub const fn new(now: OffsetDateTime, config: WorkflowConfig) -> Self {
        Self { now, config }
    }

    /// A context stamped with the current UTC time.
    #[must_use]
    pub fn now_utc(config: WorkflowConfig) -> Self {
        Self::new(OffsetDateTime::now_utc(), config)
    }
}
