//! Menu error types.
//!
//! Registration and lookup failures carry a [`Severity`] chosen by the
//! process-wide [`ErrorMode`]. The registry never picks the severity itself;
//! it asks the mode through [`ErrorMode::raise_or_warn`].

use std::fmt;

use thiserror::Error;

/// What went wrong while registering or looking up menus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("there's already a menu named {0:?}")]
    DuplicateMenu(String),

    #[error("there's already an entry for endpoint {endpoint:?} in menu {menu:?}")]
    DuplicateEndpoint { menu: String, endpoint: String },

    #[error("the value added to menu {menu:?} is not a menu entry: {detail}")]
    TypeMismatch { menu: String, detail: String },

    #[error("menu {0:?} does not exist")]
    UnknownMenu(String),
}

/// How hard a registry error should hit the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The host should treat the error as unrecoverable.
    Fatal,
    /// The host may log the error and keep serving.
    Advisory,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => f.write_str("fatal"),
            Severity::Advisory => f.write_str("advisory"),
        }
    }
}

/// Process-wide severity toggle, supplied by the hosting application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Development: every registry error is fatal.
    Strict,
    /// Production: registry errors are advisory.
    #[default]
    Lenient,
}

impl ErrorMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    pub fn severity(self) -> Severity {
        match self {
            ErrorMode::Strict => Severity::Fatal,
            ErrorMode::Lenient => Severity::Advisory,
        }
    }

    /// Build the error for `kind` at this mode's severity and log it.
    pub fn raise_or_warn(self, kind: ErrorKind) -> RegistryError {
        let severity = self.severity();
        match severity {
            Severity::Fatal => tracing::error!(error = %kind, "menu registry error"),
            Severity::Advisory => tracing::warn!(error = %kind, "menu registry warning"),
        }
        RegistryError { kind, severity }
    }
}

/// A registration or lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{severity}: {kind}")]
pub struct RegistryError {
    pub kind: ErrorKind,
    pub severity: Severity,
}

impl RegistryError {
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

/// Failure to reverse an endpoint into a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("no route registered for endpoint {0:?}")]
    UnknownEndpoint(String),

    #[error("route {pattern:?} for endpoint {endpoint:?} needs parameters")]
    MissingParameters { endpoint: String, pattern: String },
}

/// Errors raised while rendering a menu.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("cannot build URL for endpoint {endpoint:?}")]
    Url {
        endpoint: String,
        #[source]
        source: UrlError,
    },
}

/// Errors raised while loading declarative menu definitions.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid TOML menu definitions")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON menu definitions")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
