// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction for the server.
//!
//! Identity is asserted by the fronting session layer through request
//! headers. This module only reads and validates those headers; it never
//! looks anything up.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use procura_api::{ApiError, AuthenticatedActor, authenticate};
use tracing::debug;

use crate::HttpError;

/// Header carrying the caller's id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the caller's display name.
pub const ACTOR_NAME_HEADER: &str = "x-actor-name";
/// Header carrying the caller's account role.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
/// Header carrying the caller's department.
pub const ACTOR_DEPARTMENT_HEADER: &str = "x-actor-department";

/// Extractor for the authenticated caller.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionActor(actor): SessionActor,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if the id header is missing or the
/// role or department header is missing or not recognized.
pub struct SessionActor(pub AuthenticatedActor);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}

impl<S: Send + Sync> FromRequestParts<S> for SessionActor {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor: AuthenticatedActor = authenticate(
            header(parts, ACTOR_ID_HEADER),
            header(parts, ACTOR_NAME_HEADER),
            header(parts, ACTOR_ROLE_HEADER),
            header(parts, ACTOR_DEPARTMENT_HEADER),
        )
        .map_err(|e| {
            debug!(error = %e, "Caller identity rejected");
            HttpError {
                status: StatusCode::UNAUTHORIZED,
                message: ApiError::from(e).to_string(),
            }
        })?;

        debug!(
            actor_id = %actor.id,
            role = %actor.role,
            department = %actor.department,
            "Caller identified"
        );
        Ok(Self(actor))
    }
}
