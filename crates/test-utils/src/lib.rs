//! Menubuilder test utilities.
//!
//! Fixtures shared by the integration tests: the demo route table, the
//! "main" menu used throughout, and helpers to render it for a given
//! current endpoint.

use serde_json::Value as JsonValue;

use menubuilder::{
    CurrentEndpoint, ErrorMode, ListKind, MenuEntry, MenuRegistry, RenderError, RouteTable, Rule,
    error::RegistryResult,
};

/// Routes for the fixture menu.
pub fn demo_routes() -> RouteTable {
    RouteTable::new()
        .route("root", "/")
        .route("one", "/one")
        .route("two", "/two")
        .route("visible", "/visible")
        .route("post", "/blog/{slug}")
}

/// The "main" menu: Root (-1), One (0), Two (0).
pub fn main_menu(mode: ErrorMode) -> RegistryResult<MenuRegistry> {
    let mut registry = MenuRegistry::new().with_mode(mode);
    for entry in [
        MenuEntry::new("Root", "root").with_priority(-1),
        MenuEntry::new("One", "one"),
        MenuEntry::new("Two", "two"),
    ] {
        registry.add_entry("main", entry)?;
    }
    Ok(registry)
}

/// The "main" menu plus an entry only visible, and active, on its own page.
pub fn main_menu_with_visible(mode: ErrorMode) -> RegistryResult<MenuRegistry> {
    let mut registry = main_menu(mode)?;
    let visible = MenuEntry::new("Visible under /visible only", "visible")
        .with_visible_when(Rule::on_endpoint("visible"))
        .with_active_when(Rule::on_endpoint("visible"));
    registry.add_entry("main", visible)?;
    Ok(registry)
}

/// Render `menu` as if handling a request for `current`.
pub fn render_for(
    registry: &MenuRegistry,
    menu: &str,
    kind: ListKind,
    current: &str,
) -> Result<String, RenderError> {
    let routes = demo_routes();
    registry
        .render(menu, kind, &CurrentEndpoint::new(current), &routes)
        .map(|markup| markup.into_string())
}

/// A JSON entry definition.
pub fn entry_json(title: &str, endpoint: &str, priority: i32) -> JsonValue {
    serde_json::json!({
        "title": title,
        "endpoint": endpoint,
        "priority": priority,
    })
}

/// Expected `<li>` for a plain entry.
pub fn expected_item(title: &str, href: &str, active: bool) -> String {
    let state = if active { "active" } else { "inactive" };
    format!("<li class=\"{state}\"><a class=\"{state}\" href=\"{href}\">{title}</a></li>")
}
