//! Visibility and active-state rules.

use std::fmt;
use std::sync::Arc;

use crate::context::RenderContext;
use crate::menu::MenuItem;

/// A caller-supplied test evaluated once per entry per request.
pub type Predicate = Arc<dyn Fn(&RenderContext<'_>, &dyn MenuItem) -> bool + Send + Sync>;

/// When an entry is visible, or when it is active.
#[derive(Clone)]
pub enum Rule {
    Always,
    Never,
    When(Predicate),
}

impl Rule {
    /// Wrap a closure as a rule.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&RenderContext<'_>, &dyn MenuItem) -> bool + Send + Sync + 'static,
    {
        Self::When(Arc::new(predicate))
    }

    /// True iff the current request's endpoint is the entry's endpoint.
    pub fn matches_endpoint() -> Self {
        Self::when(|ctx, item| {
            matches!(
                (ctx.current_endpoint(), item.endpoint()),
                (Some(current), Some(endpoint)) if current == endpoint
            )
        })
    }

    /// True iff the current request's endpoint is `endpoint`.
    pub fn on_endpoint(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self::when(move |ctx, _| ctx.current_endpoint() == Some(endpoint.as_str()))
    }

    pub fn evaluate(&self, ctx: &RenderContext<'_>, item: &dyn MenuItem) -> bool {
        match self {
            Rule::Always => true,
            Rule::Never => false,
            Rule::When(predicate) => predicate(ctx, item),
        }
    }
}

impl From<bool> for Rule {
    fn from(value: bool) -> Self {
        if value { Rule::Always } else { Rule::Never }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Always => f.write_str("Always"),
            Rule::Never => f.write_str("Never"),
            Rule::When(_) => f.write_str("When(..)"),
        }
    }
}

/// Per-request active classification, rendered as a class token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveState {
    Active,
    Inactive,
}

impl ActiveState {
    pub fn as_str(self) -> &'static str {
        match self {
            ActiveState::Active => "active",
            ActiveState::Inactive => "inactive",
        }
    }

    pub(crate) fn resolve(rule: &Rule, ctx: &RenderContext<'_>, item: &dyn MenuItem) -> Self {
        if rule.evaluate(ctx, item) {
            ActiveState::Active
        } else {
            ActiveState::Inactive
        }
    }
}

impl fmt::Display for ActiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
