// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use procura_domain::{Capability, Department, LedgerRole, Role, resolve};
use procura_events::Actor;
use tracing::debug;

use crate::error::AuthError;

/// An authenticated caller.
///
/// Identity is asserted by the upstream session layer; this crate only
/// checks that it is present and well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The display name stamped on approval records.
    pub name: String,
    /// The account role.
    pub role: Role,
    /// The canonicalized department.
    pub department: Department,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
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

    /// Converts this authenticated actor into the workflow `Actor` used for
    /// attribution.
    #[must_use]
    pub fn to_actor(&self) -> Actor {
        Actor::new(
            self.id.clone(),
            self.name.clone(),
            self.role,
            self.department.clone(),
        )
    }
}

/// Authenticates the identity presented with a request.
///
/// # Arguments
///
/// * `actor_id` - The caller's id (required)
/// * `actor_name` - The caller's display name; defaults to the id
/// * `role` - The caller's account role label
/// * `department` - The caller's department label
///
/// # Errors
///
/// Returns an error if the id is missing or the role or department label
/// is not recognized.
pub fn authenticate(
    actor_id: Option<&str>,
    actor_name: Option<&str>,
    role: Option<&str>,
    department: Option<&str>,
) -> Result<AuthenticatedActor, AuthError> {
    let id: &str = actor_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        })?;

    let role: Role = role
        .unwrap_or_default()
        .parse()
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("{e}"),
        })?;

    let department: Department =
        Department::parse(department.unwrap_or_default()).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("{e}"),
            }
        })?;

    let name: String = actor_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(id)
        .to_string();

    Ok(AuthenticatedActor::new(id.to_string(), name, role, department))
}

/// Authorization service for enforcing the role and department rules.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks a capability and returns the ledger role the actor acts as.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` carrying the denial reason.
    pub fn authorize(
        actor: &AuthenticatedActor,
        capability: &Capability<'_>,
    ) -> Result<LedgerRole, AuthError> {
        resolve(actor.role, &actor.department, capability).map_err(|denial| {
            debug!(
                actor_id = %actor.id,
                capability = capability.name(),
                %denial,
                "Capability denied"
            );
            AuthError::Unauthorized {
                action: capability.name().to_string(),
                required_role: denial.to_string(),
            }
        })
    }

    /// Checks that the actor is the document's requester, or an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither.
    pub fn authorize_requester(
        actor: &AuthenticatedActor,
        requester_id: &str,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.role.is_admin() || actor.id == requester_id {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("the requester or ADMIN/SUPER_ADMIN"),
            })
        }
    }

    /// The ledger role an approval is stamped as when the caller does not
    /// name one.
    #[must_use]
    pub fn default_ledger_role(actor: &AuthenticatedActor) -> LedgerRole {
        if procura_domain::is_president(actor.role, &actor.department) {
            LedgerRole::Management
        } else {
            match actor.department {
                Department::Finance => LedgerRole::Finance,
                Department::Purchasing => LedgerRole::Purchasing,
                _ => LedgerRole::DepartmentHead,
            }
        }
    }
}
