//! Menubuilder demo server.
//!
//! Serves a handful of pages that each render the "main" menu.

use std::fs;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use menubuilder::error::RegistryResult;
use menubuilder::site::{self, SiteState};
use menubuilder::{Config, ListKind, MenuEntry, MenuRegistry, RouteTable, Rule};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, mode = ?config.menu.mode, format = ?config.menu.format, "Configuration loaded");

    let routes = RouteTable::new()
        .route("root", "/")
        .route("one", "/one")
        .route("two", "/two")
        .route("visible", "/visible");

    let mut menus = MenuRegistry::from_config(&config.menu);
    admit(menus.add_entry("main", MenuEntry::new("Root", "root").with_priority(-1)))?;
    admit(menus.add_entry("main", MenuEntry::new("One", "one")))?;
    admit(menus.add_entry("main", MenuEntry::new("Two", "two")))?;
    admit(
        menus.add_entry(
            "main",
            MenuEntry::new("Visible under /visible only", "visible")
                .with_visible_when(Rule::on_endpoint("visible")),
        ),
    )?;

    if let Some(path) = &config.menu_file {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read menu file {}", path.display()))?;
        let added = menus
            .load_toml(&source)
            .with_context(|| format!("failed to load menu file {}", path.display()))?;
        info!(path = %path.display(), entries = added, "Menu definitions loaded");
    }

    let state = SiteState::new(menus, routes, "main", ListKind::Unordered)
        .context("failed to initialize site state")?;
    let app = site::router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Abort on fatal registry errors; advisory ones were already logged.
fn admit<T>(result: RegistryResult<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_fatal() => Err(e).context("menu registration failed"),
        Err(e) => {
            warn!(error = %e, "continuing after menu registration warning");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
