//! Menu registry - named menus of entries, rendered per request.
//!
//! Menus are registered once while the application starts and then shared
//! read-only (typically as `Arc<MenuRegistry>`) by every request.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::MenuConfig;
use crate::context::{RenderContext, RequestContext, UrlResolver};
use crate::error::{ErrorKind, ErrorMode, RegistryResult, RenderError};
use crate::html::{Attributes, ClassList, HtmlBuilder, Markup, OutputFormat};
use crate::menu::entry::{MenuItem, compare_items};
use crate::menu::rule::{ActiveState, Rule};

/// List element wrapping a rendered menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListKind {
    #[default]
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// The list element itself: its attributes, and when it is shown.
#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub id: Option<String>,
    pub classes: ClassList,
    pub attributes: Attributes,
    /// A hidden menu renders as empty markup.
    pub visible_when: Rule,
    /// Adds the `active`/`inactive` token to the list's class.
    pub active_when: Rule,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            id: None,
            classes: ClassList::new(),
            attributes: Attributes::new(),
            visible_when: Rule::Always,
            active_when: Rule::Always,
        }
    }
}

#[derive(Debug, Default)]
struct Menu {
    options: MenuOptions,
    items: Vec<Arc<dyn MenuItem>>,
    /// Index into `items` by endpoint.
    by_endpoint: HashMap<String, usize>,
}

impl Menu {
    fn with_options(options: MenuOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn has_id(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id() == Some(id))
    }
}

/// Registry of named menus.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: HashMap<String, Menu>,
    mode: ErrorMode,
    html: HtmlBuilder,
}

impl MenuRegistry {
    /// Create an empty, lenient, HTML-producing registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry honoring the configured mode and format.
    pub fn from_config(config: &MenuConfig) -> Self {
        Self::new().with_mode(config.mode).with_format(config.format)
    }

    pub fn with_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.html = HtmlBuilder::new(format);
        self
    }

    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    pub fn format(&self) -> OutputFormat {
        self.html.format()
    }

    /// Create an empty menu.
    pub fn create_menu(&mut self, name: &str) -> RegistryResult<()> {
        self.create_menu_with(name, MenuOptions::default())
    }

    /// Create an empty menu whose list element carries `options`.
    pub fn create_menu_with(&mut self, name: &str, options: MenuOptions) -> RegistryResult<()> {
        if self.menus.contains_key(name) {
            return Err(self.mode.raise_or_warn(ErrorKind::DuplicateMenu(name.to_string())));
        }
        self.menus
            .insert(name.to_string(), Menu::with_options(options));
        debug!(menu = %name, "created menu");
        Ok(())
    }

    pub fn has_menu(&self, name: &str) -> bool {
        self.menus.contains_key(name)
    }

    /// Add an entry, creating the menu if it does not exist yet.
    pub fn add_entry<I>(&mut self, menu: &str, item: I) -> RegistryResult<Arc<dyn MenuItem>>
    where
        I: MenuItem + 'static,
    {
        if !self.menus.contains_key(menu) {
            self.menus.insert(menu.to_string(), Menu::default());
            debug!(menu = %menu, "created menu on first entry");
        }
        self.add_item(menu, Arc::new(item))
    }

    /// Add a pre-built item to an existing menu.
    ///
    /// Fails with `UnknownMenu` if the menu was never created, and with
    /// `DuplicateEndpoint` if the menu already holds the item's endpoint.
    /// The registry is unchanged on failure.
    pub fn add_item(
        &mut self,
        menu: &str,
        item: Arc<dyn MenuItem>,
    ) -> RegistryResult<Arc<dyn MenuItem>> {
        let mode = self.mode;
        let Some(entries) = self.menus.get_mut(menu) else {
            return Err(mode.raise_or_warn(ErrorKind::UnknownMenu(menu.to_string())));
        };

        if let Some(endpoint) = item.endpoint() {
            if entries.by_endpoint.contains_key(endpoint) {
                return Err(mode.raise_or_warn(ErrorKind::DuplicateEndpoint {
                    menu: menu.to_string(),
                    endpoint: endpoint.to_string(),
                }));
            }
            entries
                .by_endpoint
                .insert(endpoint.to_string(), entries.items.len());
        }

        debug!(
            menu = %menu,
            endpoint = item.endpoint().unwrap_or("-"),
            priority = item.priority(),
            "registered menu entry"
        );
        entries.items.push(Arc::clone(&item));
        Ok(item)
    }

    /// Whether `endpoint` is registered in `menu`, or in any menu.
    pub fn has_endpoint(&self, endpoint: &str, menu: Option<&str>) -> RegistryResult<bool> {
        match menu {
            Some(name) => Ok(self.menu(name)?.by_endpoint.contains_key(endpoint)),
            None => Ok(self
                .menus
                .values()
                .any(|m| m.by_endpoint.contains_key(endpoint))),
        }
    }

    /// Whether an entry with DOM id `id` exists in `menu`, or in any menu.
    pub fn has_entry_by_id(&self, id: &str, menu: Option<&str>) -> RegistryResult<bool> {
        match menu {
            Some(name) => Ok(self.menu(name)?.has_id(id)),
            None => Ok(self.menus.values().any(|m| m.has_id(id))),
        }
    }

    /// Names of all menus, sorted.
    pub fn menu_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.menus.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of entries in `menu`.
    pub fn len(&self, menu: &str) -> RegistryResult<usize> {
        Ok(self.menu(menu)?.items.len())
    }

    /// Entries of `menu` in render order.
    pub fn sorted_items(&self, menu: &str) -> RegistryResult<Vec<Arc<dyn MenuItem>>> {
        let mut items = self.menu(menu)?.items.clone();
        items.sort_by(|a, b| compare_items(a.as_ref(), b.as_ref()));
        Ok(items)
    }

    /// Render `menu` for the current request.
    ///
    /// Entries are emitted in priority/title order, one per line, skipping
    /// those that are not visible for this request. A menu hidden by its own
    /// visibility rule renders as empty markup.
    pub fn render(
        &self,
        menu: &str,
        kind: ListKind,
        request: &dyn RequestContext,
        urls: &dyn UrlResolver,
    ) -> Result<Markup, RenderError> {
        let list = MenuList {
            name: menu,
            menu: self.menu(menu)?,
            kind,
        };
        let ctx = RenderContext::new(request, urls, self.html);

        match list.render(&ctx)? {
            Some(markup) => Ok(markup),
            None => {
                trace!(menu = %menu, "menu hidden");
                Ok(Markup::default())
            }
        }
    }

    fn menu(&self, name: &str) -> RegistryResult<&Menu> {
        self.menus
            .get(name)
            .ok_or_else(|| self.mode.raise_or_warn(ErrorKind::UnknownMenu(name.to_string())))
    }
}

/// A menu being rendered as a particular list kind.
///
/// Menu-level rules see this as their subject: no endpoint, the menu name
/// as title.
#[derive(Debug)]
struct MenuList<'a> {
    name: &'a str,
    menu: &'a Menu,
    kind: ListKind,
}

impl MenuItem for MenuList<'_> {
    fn endpoint(&self) -> Option<&str> {
        None
    }

    fn title(&self) -> Option<&str> {
        Some(self.name)
    }

    fn priority(&self) -> i32 {
        0
    }

    fn id(&self) -> Option<&str> {
        self.menu.options.id.as_deref()
    }

    fn active_state(&self, ctx: &RenderContext<'_>) -> ActiveState {
        ActiveState::resolve(&self.menu.options.active_when, ctx, self)
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Option<Markup>, RenderError> {
        let options = &self.menu.options;
        if !options.visible_when.evaluate(ctx, self) {
            return Ok(None);
        }

        let mut items = self.menu.items.clone();
        items.sort_by(|a, b| compare_items(a.as_ref(), b.as_ref()));

        let mut rendered = Vec::new();
        for item in &items {
            match item.render(ctx)? {
                Some(markup) => rendered.push(markup.into_string()),
                None => trace!(menu = %self.name, endpoint = ?item.endpoint(), "entry hidden"),
            }
        }

        let state = self.active_state(ctx);
        let mut attrs = Attributes::new();
        attrs.insert("class", options.classes.to_attr_with(state.as_str()));
        attrs.overlay(&options.attributes);
        if let Some(id) = &options.id {
            attrs.insert("id", id.as_str());
        }

        Ok(Some(ctx.html().element(
            self.kind.tag(),
            &Markup::raw(rendered.join("\n")),
            &attrs,
        )))
    }
}
