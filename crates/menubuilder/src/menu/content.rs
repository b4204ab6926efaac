//! Content-bearing entries: custom markup, optionally linked.

use std::fmt;
use std::sync::Arc;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::html::{AttrValue, Attributes, ClassList, Markup};
use crate::menu::entry::{MenuItem, list_item};
use crate::menu::rule::{ActiveState, Rule};

/// Producer that computes an entry's content at render time.
pub type ContentProducer = Arc<dyn Fn(&ContentEntry) -> Markup + Send + Sync>;

/// What a [`ContentEntry`] displays.
#[derive(Clone)]
pub enum Content {
    /// Plain text, escaped on output.
    Text(String),
    /// Trusted markup, emitted verbatim.
    Markup(Markup),
    /// Computed lazily from the entry.
    Producer(ContentProducer),
}

impl Content {
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn(&ContentEntry) -> Markup + Send + Sync + 'static,
    {
        Self::Producer(Arc::new(f))
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Markup> for Content {
    fn from(markup: Markup) -> Self {
        Self::Markup(markup)
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Content::Markup(markup) => f.debug_tuple("Markup").field(markup).finish(),
            Content::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// A menu item rendering arbitrary content.
///
/// Linked entries render an `<a>` to their endpoint; unlinked or
/// endpoint-less ones render an inert `<span>`. Unlike [`MenuEntry`], the
/// default active rule is [`Rule::Never`], since most content items are
/// decorative.
///
/// [`MenuEntry`]: crate::menu::MenuEntry
#[derive(Debug, Clone)]
pub struct ContentEntry {
    content: Content,
    title: Option<String>,
    endpoint: Option<String>,
    is_link: bool,
    priority: i32,
    visible_when: Rule,
    active_when: Rule,
    classes: ClassList,
    container_classes: ClassList,
    id: Option<String>,
    attributes: Attributes,
}

impl ContentEntry {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            title: None,
            endpoint: None,
            is_link: true,
            priority: 0,
            visible_when: Rule::Always,
            active_when: Rule::Never,
            classes: ClassList::new(),
            container_classes: ClassList::new(),
            id: None,
            attributes: Attributes::new(),
        }
    }

    /// Content linking to `endpoint`.
    pub fn link(content: impl Into<Content>, endpoint: impl Into<String>) -> Self {
        Self::new(content).with_endpoint(endpoint)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Render as a `<span>` even when an endpoint is set.
    pub fn unlinked(mut self) -> Self {
        self.is_link = false;
        self
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

    pub fn with_classes(mut self, classes: impl Into<ClassList>) -> Self {
        self.classes = classes.into();
        self
    }

    pub fn with_container_classes(mut self, classes: impl Into<ClassList>) -> Self {
        self.container_classes = classes.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The endpoint this entry links to, if it renders as a link.
    pub fn link_target(&self) -> Option<&str> {
        if self.is_link {
            self.endpoint.as_deref()
        } else {
            None
        }
    }

    fn resolve_content(&self) -> Markup {
        match &self.content {
            Content::Text(text) => Markup::text(text),
            Content::Markup(markup) => markup.clone(),
            Content::Producer(produce) => produce(self),
        }
    }
}

impl MenuItem for ContentEntry {
    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
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
        attrs.insert("class", self.classes.to_attr_with(state.as_str()));

        let link = self.link_target();
        if let Some(endpoint) = link {
            attrs.insert("href", ctx.url_for(endpoint)?);
        }

        attrs.overlay(&self.attributes);
        if link.is_some()
            && let Some(title) = &self.title
        {
            attrs.insert("title", title.as_str());
            attrs.insert("alt", title.as_str());
        }
        if let Some(id) = &self.id {
            attrs.insert("id", id.as_str());
        }

        let tag = if link.is_some() { "a" } else { "span" };
        let element = ctx.html().element(tag, &self.resolve_content(), &attrs);
        Ok(Some(list_item(ctx, &self.container_classes, state, &element)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::context::CurrentEndpoint;
    use crate::error::UrlError;
    use crate::html::HtmlBuilder;

    fn urls(endpoint: &str) -> Result<String, UrlError> {
        Ok(format!("/{endpoint}"))
    }

    fn render_on(entry: &ContentEntry, current: &str) -> Option<String> {
        let request = CurrentEndpoint::new(current);
        let ctx = RenderContext::new(&request, &urls, HtmlBuilder::default());
        entry.render(&ctx).unwrap().map(Markup::into_string)
    }

    #[test]
    fn linked_content_gets_title_and_alt() {
        let entry = ContentEntry::link(Markup::raw("<img src=\"/logo.png\">"), "home")
            .with_title("Home");
        assert_eq!(
            render_on(&entry, "home").unwrap(),
            "<li class=\"inactive\"><a alt=\"Home\" class=\"inactive\" href=\"/home\" \
             title=\"Home\"><img src=\"/logo.png\"></a></li>"
        );
    }

    #[test]
    fn entry_title_wins_over_extra_title_attribute() {
        let entry = ContentEntry::link("Home", "home")
            .with_title("Home page")
            .with_attr("title", "ignored")
            .with_attr("rel", "home");
        assert_eq!(
            render_on(&entry, "root").unwrap(),
            "<li class=\"inactive\"><a alt=\"Home page\" class=\"inactive\" href=\"/home\" \
             rel=\"home\" title=\"Home page\">Home</a></li>"
        );
    }

    #[test]
    fn unlinked_content_renders_span_without_href() {
        let entry = ContentEntry::link("Account", "account").unlinked();
        assert_eq!(
            render_on(&entry, "root").unwrap(),
            "<li class=\"inactive\"><span class=\"inactive\">Account</span></li>"
        );
    }

    #[test]
    fn endpoint_less_content_renders_span() {
        let entry = ContentEntry::new("|").with_container_classes("divider");
        assert_eq!(
            render_on(&entry, "root").unwrap(),
            "<li class=\"divider inactive\"><span class=\"inactive\">|</span></li>"
        );
    }

    #[test]
    fn text_content_is_escaped() {
        let entry = ContentEntry::new("<b>");
        assert!(render_on(&entry, "root").unwrap().contains(">&lt;b&gt;</span>"));
    }

    #[test]
    fn producer_is_invoked_with_entry() {
        let entry = ContentEntry::link(
            Content::producer(|entry| {
                Markup::text(&format!("Go to {}", entry.link_target().unwrap_or("nowhere")))
            }),
            "profile",
        );
        assert!(render_on(&entry, "root").unwrap().contains(">Go to profile</a>"));
    }

    #[test]
    fn default_active_rule_is_never() {
        let entry = ContentEntry::link("Home", "home");
        assert!(render_on(&entry, "home").unwrap().starts_with("<li class=\"inactive\">"));

        let active = entry.with_active_when(Rule::matches_endpoint());
        assert!(render_on(&active, "home").unwrap().starts_with("<li class=\"active\">"));
    }

    #[test]
    fn hidden_content_is_omitted() {
        let entry = ContentEntry::new("secret").with_visible_when(Rule::Never);
        assert!(render_on(&entry, "root").is_none());
    }
}
