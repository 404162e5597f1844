// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor extraction for the server.
//!
//! Callers identify themselves with two headers:
//!
//! - `x-actor-id`: the acting employee's numeric ID
//! - `x-actor-role`: `admin` or `sales`
//!
//! The headers are trusted as given. Whatever fronts this server is
//! responsible for having verified them.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use lead_desk_api::{AuthenticatedActor, authenticate_stub};
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Header carrying the acting employee's ID.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Header carrying the acting employee's role.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Extractor for the authenticated actor of a request.
///
/// # Errors
///
/// Rejects the request with HTTP 401 if either header is missing, not
/// valid text, or does not parse.
pub struct SessionActor(pub AuthenticatedActor);

fn header_value<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, SessionError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing actor header");
            SessionError::MissingHeader(name)
        })?
        .to_str()
        .map_err(|_| {
            warn!(header = name, "Invalid actor header encoding");
            SessionError::InvalidHeader(name)
        })
}

impl FromRequestParts<AppState> for SessionActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor_id: &str = header_value(parts, ACTOR_ID_HEADER)?;
        let role: &str = header_value(parts, ACTOR_ROLE_HEADER)?;

        let actor: AuthenticatedActor = authenticate_stub(actor_id, role).map_err(|e| {
            warn!(error = %e, "Actor authentication failed");
            SessionError::InvalidActor(e.to_string())
        })?;

        debug!(employee_id = actor.employee_id, role = %actor.role, "Actor authenticated");

        Ok(Self(actor))
    }
}

/// Actor extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// A required header is missing.
    MissingHeader(&'static str),
    /// A header is not valid text.
    InvalidHeader(&'static str),
    /// The headers did not describe a valid actor.
    InvalidActor(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header"),
            Self::InvalidActor(reason) => reason,
        };

        (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message))).into_response()
    }
}
