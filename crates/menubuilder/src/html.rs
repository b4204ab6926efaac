//! HTML element serialization.
//!
//! Menus never concatenate raw strings: text is escaped on the way in and
//! trusted markup travels as [`Markup`]. Elements are produced by
//! [`HtmlBuilder`], which knows whether it is writing HTML or XHTML.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Escape text for use in element content or a quoted attribute value.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Whether `name` is a well-formed attribute name.
///
/// Names are written unquoted, so they must be non-empty and free of
/// whitespace, control characters and the delimiters `" ' < > / =`.
pub fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// A fragment of HTML that is already safe to emit verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    /// Wrap trusted HTML without escaping it.
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape plain text into markup.
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

/// Serializer flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Xhtml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "xhtml" => Ok(Self::Xhtml),
            other => Err(format!("unknown output format {other:?} (expected html or xhtml)")),
        }
    }
}

/// Value of a single HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    /// Boolean attribute such as `disabled`; `false` omits it.
    Flag(bool),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Attribute map, emitted in ascending name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Copy every attribute of `other` over this map (last writer wins).
    pub fn overlay(&mut self, other: &Attributes) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A set of CSS class tokens.
///
/// Class lists are sets: duplicates collapse and output order is sorted so
/// rendering does not depend on how the tokens were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(BTreeSet<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one or more whitespace-separated tokens.
    pub fn add(&mut self, classes: &str) {
        self.0
            .extend(classes.split_whitespace().map(str::to_string));
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the class attribute value, appending `extra` last.
    pub fn to_attr_with(&self, extra: &str) -> String {
        let mut tokens: Vec<&str> = self
            .0
            .iter()
            .map(String::as_str)
            .filter(|c| *c != extra)
            .collect();
        if !extra.is_empty() {
            tokens.push(extra);
        }
        tokens.join(" ")
    }
}

impl From<&str> for ClassList {
    fn from(classes: &str) -> Self {
        let mut list = Self::new();
        list.add(classes);
        list
    }
}

impl From<String> for ClassList {
    fn from(classes: String) -> Self {
        Self::from(classes.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for classes in iter {
            list.add(classes.as_ref());
        }
        list
    }
}

impl<S: AsRef<str>> From<Vec<S>> for ClassList {
    fn from(classes: Vec<S>) -> Self {
        classes.into_iter().collect()
    }
}

/// Builds elements for the configured [`OutputFormat`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlBuilder {
    format: OutputFormat,
}

impl HtmlBuilder {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Serialize `<tag attrs>content</tag>`.
    pub fn element(&self, tag: &str, content: &Markup, attrs: &Attributes) -> Markup {
        Markup(format!(
            "<{tag}{}>{content}</{tag}>",
            self.attributes(attrs)
        ))
    }

    fn attributes(&self, attrs: &Attributes) -> String {
        attrs
            .iter()
            .filter(|(name, _)| {
                let valid = is_valid_attr_name(name);
                if !valid {
                    warn!(attribute = ?name, "dropping malformed attribute name");
                }
                valid
            })
            .map(|(name, value)| match value {
                AttrValue::Text(text) => format!(" {name}=\"{}\"", escape(text)),
                AttrValue::Flag(false) => String::new(),
                AttrValue::Flag(true) => match self.format {
                    OutputFormat::Html => format!(" {name}"),
                    OutputFormat::Xhtml => format!(" {name}=\"{name}\""),
                },
            })
            .collect()
    }
}
