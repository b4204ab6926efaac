//! Navigational menu entries and their ordering.

use std::cmp::Ordering;
use std::fmt;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::html::{AttrValue, Attributes, ClassList, Markup};
use crate::menu::rule::{ActiveState, Rule};

/// Anything a menu can hold.
///
/// Implementors expose the fields the registry sorts and indexes by, and
/// render themselves to a list item. Returning `Ok(None)` from
/// [`MenuItem::render`] omits the item for the current request.
pub trait MenuItem: fmt::Debug + Send + Sync {
    /// Uniqueness key within a menu; `None` for decorative items.
    fn endpoint(&self) -> Option<&str>;

    /// Text used for ordering among equal priorities.
    fn title(&self) -> Option<&str>;

    /// Lower sorts first.
    fn priority(&self) -> i32;

    /// DOM id of the rendered element.
    fn id(&self) -> Option<&str>;

    /// Active-state class token for the current request.
    fn active_state(&self, ctx: &RenderContext<'_>) -> ActiveState;

    /// Render as a `<li>` element, or `None` when not visible.
    fn render(&self, ctx: &RenderContext<'_>) -> Result<Option<Markup>, RenderError>;
}

/// Total order over menu items: priority, then title, then endpoint.
pub fn compare_items(a: &dyn MenuItem, b: &dyn MenuItem) -> Ordering {
    a.priority()
        .cmp(&b.priority())
        .then_with(|| a.title().cmp(&b.title()))
        .then_with(|| a.endpoint().cmp(&b.endpoint()))
}

/// A link to an endpoint.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    title: String,
    endpoint: String,
    priority: i32,
    visible_when: Rule,
    active_when: Rule,
    classes: ClassList,
    container_classes: ClassList,
    id: Option<String>,
    attributes: Attributes,
}

impl MenuEntry {
    /// Create an always-visible entry that is active on its own endpoint.
    pub fn new(title: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            endpoint: endpoint.into(),
            priority: 0,
            visible_when: Rule::Always,
            active_when: Rule::matches_endpoint(),
            classes: ClassList::new(),
            container_classes: ClassList::new(),
            id: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_visible_when(mut self, rule: Rule) -> Self {
        self.visible_when = rule;
        self
    }

    pub fn with_active_when(mut self, rule: Rule) -> Self {
        self.active_when = rule;
        self
    }

    /// Classes for the anchor element.
    pub fn with_classes(mut self, classes: impl Into<ClassList>) -> Self {
        self.classes = classes.into();
        self
    }

    /// Classes for the wrapping `<li>`.
    pub fn with_container_classes(mut self, classes: impl Into<ClassList>) -> Self {
        self.container_classes = classes.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Extra anchor attribute; overrides computed `href` and `class`.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn visible_when(&self) -> &Rule {
        &self.visible_when
    }

    pub fn active_when(&self) -> &Rule {
        &self.active_when
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn container_classes(&self) -> &ClassList {
        &self.container_classes
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl MenuItem for MenuEntry {
    fn endpoint(&self) -> Option<&str> {
        Some(&self.endpoint)
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn active_state(&self, ctx: &RenderContext<'_>) -> ActiveState {
        ActiveState::resolve(&self.active_when, ctx, self)
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Option<Markup>, RenderError> {
        if !self.visible_when.evaluate(ctx, self) {
            return Ok(None);
        }

        let state = self.active_state(ctx);
        let mut attrs = Attributes::new();
        attrs.insert("href", ctx.url_for(&self.endpoint)?);
        attrs.insert("class", self.classes.to_attr_with(state.as_str()));
        attrs.overlay(&self.attributes);
        if let Some(id) = &self.id {
            attrs.insert("id", id.as_str());
        }

        let html = ctx.html();
        let anchor = html.element("a", &Markup::text(&self.title), &attrs);
        Ok(Some(list_item(ctx, &self.container_classes, state, &anchor)))
    }
}

/// Wrap rendered content in a `<li>` carrying the container classes.
pub(crate) fn list_item(
    ctx: &RenderContext<'_>,
    container_classes: &ClassList,
    state: ActiveState,
    content: &Markup,
) -> Markup {
    let mut attrs = Attributes::new();
    attrs.insert("class", container_classes.to_attr_with(state.as_str()));
    ctx.html().element("li", content, &attrs)
}
