//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::error::ErrorMode;
use crate::html::OutputFormat;

/// Menu rendering configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuConfig {
    /// Severity of registry errors (MENU_STRICT, falling back to APP_DEBUG).
    pub mode: ErrorMode,

    /// Serializer flavor (MENU_OUTPUT_FORMAT, default: html).
    pub format: OutputFormat,
}

impl MenuConfig {
    /// Load menu configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let strict = match env::var("MENU_STRICT") {
            Ok(v) => parse_flag(&v).context("MENU_STRICT must be a boolean")?,
            Err(_) => match env::var("APP_DEBUG") {
                Ok(v) => parse_flag(&v).context("APP_DEBUG must be a boolean")?,
                Err(_) => false,
            },
        };

        let format = env::var("MENU_OUTPUT_FORMAT")
            .unwrap_or_else(|_| "html".to_string())
            .parse::<OutputFormat>()
            .map_err(|e| anyhow!(e))
            .context("MENU_OUTPUT_FORMAT must be html or xhtml")?;

        Ok(Self {
            mode: ErrorMode::from_strict(strict),
            format,
        })
    }
}

/// Demo server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Optional TOML file with menu definitions (MENU_FILE).
    pub menu_file: Option<PathBuf>,

    pub menu: MenuConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let menu_file = env::var("MENU_FILE").ok().map(PathBuf::from);

        let menu = MenuConfig::from_env()?;

        Ok(Self {
            port,
            menu_file,
            menu,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("unrecognized boolean {other:?}")),
    }
}
