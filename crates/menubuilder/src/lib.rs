//! Navigation menus for axum applications.
//!
//! Register menus and their entries once at startup on a
//! [`MenuRegistry`](menu::MenuRegistry), share it read-only across requests,
//! and render a menu per request as an ordered or unordered HTML list.
//! Entries are ordered by priority then title, can be hidden per request,
//! and carry an `active`/`inactive` class for the current route.

pub mod config;
pub mod context;
pub mod error;
pub mod html;
pub mod menu;
pub mod routing;
pub mod site;
pub mod web;

pub use config::{Config, MenuConfig};
pub use context::{CurrentEndpoint, RenderContext, RequestContext, UrlResolver};
pub use error::{ErrorKind, ErrorMode, RegistryError, RenderError, Severity};
pub use html::{Markup, OutputFormat};
pub use menu::{ContentEntry, ListKind, MenuEntry, MenuItem, MenuRegistry, Rule};
pub use routing::RouteTable;
