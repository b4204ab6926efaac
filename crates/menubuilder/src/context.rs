//! Per-request inputs to menu rendering.
//!
//! The registry owns no request state. At render time the host supplies the
//! endpoint being handled and a way to turn endpoints back into URLs.

use crate::error::{RenderError, UrlError};
use crate::html::HtmlBuilder;

/// Exposes the route currently being handled.
pub trait RequestContext {
    /// Endpoint of the current request, if routing matched one.
    fn current_endpoint(&self) -> Option<&str>;
}

/// Reverses an endpoint into a path.
pub trait UrlResolver {
    fn url_for(&self, endpoint: &str) -> Result<String, UrlError>;
}

impl<F> UrlResolver for F
where
    F: Fn(&str) -> Result<String, UrlError>,
{
    fn url_for(&self, endpoint: &str) -> Result<String, UrlError> {
        self(endpoint)
    }
}

/// The endpoint resolved for a request.
///
/// Stored in request extensions by [`crate::web::resolve_current_endpoint`]
/// and usable directly as a [`RequestContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentEndpoint(pub Option<String>);

impl CurrentEndpoint {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(Some(endpoint.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl RequestContext for CurrentEndpoint {
    fn current_endpoint(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Everything an entry needs to render itself for one request.
pub struct RenderContext<'a> {
    current_endpoint: Option<&'a str>,
    urls: &'a dyn UrlResolver,
    html: HtmlBuilder,
}

impl<'a> RenderContext<'a> {
    pub fn new(request: &'a dyn RequestContext, urls: &'a dyn UrlResolver, html: HtmlBuilder) -> Self {
        Self {
            current_endpoint: request.current_endpoint(),
            urls,
            html,
        }
    }

    pub fn current_endpoint(&self) -> Option<&'a str> {
        self.current_endpoint
    }

    pub fn html(&self) -> HtmlBuilder {
        self.html
    }

    /// Resolve `endpoint` to a URL, tagging failures with the endpoint.
    pub fn url_for(&self, endpoint: &str) -> Result<String, RenderError> {
        self.urls
            .url_for(endpoint)
            .map_err(|source| RenderError::Url {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}
