//! axum integration.
//!
//! [`resolve_current_endpoint`] matches each request path against the
//! [`RouteTable`] and stores the result in request extensions, where the
//! [`CurrentEndpoint`] extractor picks it up for menu rendering.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::trace;

use crate::context::CurrentEndpoint;
use crate::error::RenderError;
use crate::routing::RouteTable;

/// Middleware: resolve the request's endpoint from its path.
pub async fn resolve_current_endpoint(
    State(routes): State<Arc<RouteTable>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let endpoint = routes
        .match_path(request.uri().path())
        .map(|m| m.endpoint);
    trace!(path = %request.uri().path(), endpoint = ?endpoint, "resolved endpoint");

    request.extensions_mut().insert(CurrentEndpoint(endpoint));
    next.run(request).await
}

impl<S> FromRequestParts<S> for CurrentEndpoint
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentEndpoint>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Errors surfaced by menu-rendering handlers.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("menu rendering failed")]
    Render(#[from] RenderError),

    #[error("template rendering failed")]
    Template(#[from] tera::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            WebError::Render(e) => tracing::error!(error = %e, "menu rendering failed"),
            WebError::Template(e) => tracing::error!(error = ?e, "template rendering failed"),
        }

        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
