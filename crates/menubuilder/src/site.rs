//! Demo site: one page per route, each showing the rendered menu.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, extract::State, response::Html, routing::get};
use tera::{Context as TeraContext, Tera};

use crate::context::CurrentEndpoint;
use crate::menu::{ListKind, MenuRegistry};
use crate::routing::RouteTable;
use crate::web::{WebError, resolve_current_endpoint};

const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Shared state for the demo site. Cheap to clone.
#[derive(Clone)]
pub struct SiteState {
    inner: Arc<SiteInner>,
}

struct SiteInner {
    menus: MenuRegistry,
    routes: Arc<RouteTable>,
    templates: Tera,
    menu_name: String,
    list_kind: ListKind,
}

impl SiteState {
    /// Build site state rendering `menu_name` on every page.
    pub fn new(
        menus: MenuRegistry,
        routes: RouteTable,
        menu_name: impl Into<String>,
        list_kind: ListKind,
    ) -> Result<Self> {
        let mut templates = Tera::default();
        templates
            .add_raw_template("page.html", PAGE_TEMPLATE)
            .context("failed to parse page template")?;

        Ok(Self {
            inner: Arc::new(SiteInner {
                menus,
                routes: Arc::new(routes),
                templates,
                menu_name: menu_name.into(),
                list_kind,
            }),
        })
    }

    pub fn menus(&self) -> &MenuRegistry {
        &self.inner.menus
    }

    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.inner.routes
    }
}

/// Router serving a page at every pattern in the route table.
pub fn router(state: SiteState) -> Router {
    let patterns: BTreeSet<String> = state
        .routes()
        .iter()
        .map(|(_, pattern)| pattern.to_string())
        .collect();

    let mut router = Router::new();
    for pattern in &patterns {
        router = router.route(pattern, get(page));
    }

    router
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(state.routes()),
            resolve_current_endpoint,
        ))
        .with_state(state)
}

async fn page(
    State(state): State<SiteState>,
    current: CurrentEndpoint,
) -> Result<Html<String>, WebError> {
    let inner = &state.inner;
    let menu = inner.menus.render(
        &inner.menu_name,
        inner.list_kind,
        &current,
        &*inner.routes,
    )?;

    let title = current.0.as_deref().unwrap_or("Untitled");
    let mut context = TeraContext::new();
    context.insert("title", title);
    context.insert("endpoint", &current.0);
    context.insert("menu", menu.as_str());

    Ok(Html(inner.templates.render("page.html", &context)?))
}
