// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use procura::CoreError;
use procura_domain::DomainError;
use procura_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Who may perform the action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Who may perform the action.
        required_role: String,
    },
    /// A workflow rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { message, .. } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

fn rule(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidRole(_) => invalid_input("actor_role", &err),
        DomainError::InvalidDepartment(_) => invalid_input("department", &err),
        DomainError::InvalidServiceCategory(_) => invalid_input("category", &err),
        DomainError::InvalidPriority(_) => invalid_input("priority", &err),
        DomainError::InvalidLedgerRole(_) => invalid_input("role", &err),
        DomainError::InvalidApprovalAction(_) | DomainError::ActionNotAllowed { .. } => {
            invalid_input("action", &err)
        }
        DomainError::InvalidJobOrderType(_) => invalid_input("type", &err),
        DomainError::InvalidStatus { .. } => invalid_input("status", &err),
        DomainError::EmptyField(field) | DomainError::InvalidAmount { field, .. } => {
            invalid_input(field, &err)
        }
        DomainError::DocumentNotFound { kind, .. } => ApiError::ResourceNotFound {
            resource_type: kind.label().to_string(),
            message: err.to_string(),
        },
        DomainError::PurchaseOrderMissing { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Purchase order"),
            message: err.to_string(),
        },
        DomainError::InvalidState { .. } => rule("required_status", &err),
        DomainError::InvalidStatusTransition { .. } => rule("status_transition", &err),
        DomainError::AlreadyActed { .. } => rule("unique_approval", &err),
        DomainError::AlreadyDecided { .. } => rule("decision_final", &err),
        DomainError::JobOrderExists { .. } => rule("one_job_order_per_request", &err),
        DomainError::PurchaseOrderExists { .. } => rule("one_purchase_order_per_job_order", &err),
        DomainError::WrongJobOrderType { .. } => rule("job_order_type", &err),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidConfiguration(msg) => ApiError::Internal {
            message: format!("Invalid configuration: {msg}"),
        },
    }
}

/// Translates a persistence failure into an internal API error.
#[must_use]
pub fn translate_persistence_error(context: &str, err: &PersistenceError) -> ApiError {
    ApiError::Internal {
        message: format!("{context}: {err}"),
    }
}
