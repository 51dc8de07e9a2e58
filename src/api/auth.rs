// Session gate: shared-secret check in front of the session endpoint

use crate::error::GatewayError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

/// Compares `Authorization: Bearer <token>` against the configured secret
#[derive(Clone)]
pub struct SessionGate {
    secret: Arc<str>,
}

impl SessionGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), GatewayError> {
        let Some(authorization) = headers.typed_get::<Authorization<Bearer>>() else {
            return Err(GatewayError::Unauthorized);
        };

        // constant time; only the length can leak
        if bool::from(authorization.token().as_bytes().ct_eq(self.secret.as_bytes())) {
            Ok(())
        } else {
            Err(GatewayError::Unauthorized)
        }
    }
}

/// Rejects with 401 before the request reaches the session service or tool routes
pub(crate) async fn require_session_secret(
    State(gate): State<SessionGate>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(e) = gate.authorize(request.headers()) {
        warn!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            e
        );
        return e.into_response();
    }

    next.run(request).await
}
