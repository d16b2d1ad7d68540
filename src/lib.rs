//! Flowboard: a Zellij plugin for browsing a categorized directory of
//! workflow links.
//!
//! The catalog is a JSON document listing categories and the flows
//! (name + URL) inside each. Flowboard shows it as a grid of cards grouped
//! by category, with a category tag bar, a search box that narrows cards by
//! name, and a light/dark theme toggle. Activating a card opens its URL with
//! an external command.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, actions                          │
//! │  - Load tickets                                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────┐                       ┌───────────────┐
//! │ UI Layer      │                       │ Worker Layer  │
//! │ (ui/)         │                       │ (worker/)     │
//! │ - Rendering   │                       │ - File reads  │
//! │ - Themes      │                       │ - IPC bridge  │
//! └───────────────┘                       └───────────────┘
//!         │                                       │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Catalog model, filters, icons (domain/)          │
//! │  - Sandbox paths, data source (infrastructure/)     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans exported to a JSON file      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/flowboard.wasm" {
//!         data_source "https://intranet.example.com/flows.json"
//!         title "Workflows"
//!         dark_theme "catppuccin-frappe"
//!         open_command "xdg-open"
//!         close_on_open "true"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Loading
//!
//! Remote catalogs are fetched with Zellij's `web_request`; file catalogs are
//! read by the background worker. Each load carries a ticket, and a result
//! whose ticket is not the one in flight is dropped.
//!
//! # Example
//!
//! ```rust
//! use flowboard::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! state.permitted = true;
//!
//! let (_, actions) = handle_event(&mut state, &Event::Reload)?;
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), flowboard::FlowboardError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{FlowboardError, Result};
pub use ui::Theme;

use infrastructure::{DataSource, DEFAULT_DATA_SOURCE};
use std::collections::BTreeMap;
use ui::theme::{DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME};
use ui::{ThemeController, ThemeMode};

/// Default header title.
pub const DEFAULT_TITLE: &str = "Workflows";

/// Default program used to open flow URLs.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL or path of the catalog document.
    pub data_source: String,

    /// Header title.
    pub title: String,

    /// Built-in theme used in light mode.
    pub light_theme: String,

    /// Built-in theme used in dark mode.
    pub dark_theme: String,

    /// TOML theme file for light mode. Takes precedence over `light_theme`.
    pub light_theme_file: Option<String>,

    /// TOML theme file for dark mode. Takes precedence over `dark_theme`.
    pub dark_theme_file: Option<String>,

    /// Program run with the flow URL as its only argument.
    pub open_command: String,

    /// Hide the plugin after a flow is opened.
    pub close_on_open: bool,

    /// `EnvFilter` directive, e.g. `info` or `flowboard=debug`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            light_theme: DEFAULT_LIGHT_THEME.to_string(),
            dark_theme: DEFAULT_DARK_THEME.to_string(),
            light_theme_file: None,
            dark_theme_file: None,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            close_on_open: true,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses the map Zellij passes to `load`.
    ///
    /// Missing or blank values keep their defaults; `close_on_open` accepts
    /// `true`/`false` (any other value keeps the default).
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use flowboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("title".to_string(), "审批中心".to_string());
    /// map.insert("close_on_open".to_string(), "false".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.title, "审批中心");
    /// assert!(!config.close_on_open);
    /// assert_eq!(config.open_command, "xdg-open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let close_on_open = match text("close_on_open").as_deref() {
            Some("true") => true,
            Some("false") => false,
            _ => defaults.close_on_open,
        };

        Self {
            data_source: text("data_source").unwrap_or(defaults.data_source),
            title: text("title").unwrap_or(defaults.title),
            light_theme: text("light_theme").unwrap_or(defaults.light_theme),
            dark_theme: text("dark_theme").unwrap_or(defaults.dark_theme),
            light_theme_file: text("light_theme_file"),
            dark_theme_file: text("dark_theme_file"),
            open_command: text("open_command").unwrap_or(defaults.open_command),
            close_on_open,
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
        }
    }
}

/// Resolves one mode's theme: file first, then built-in name, then `fallback`.
fn resolve_theme(file: Option<&str>, name: &str, fallback: &Theme) -> Theme {
    if let Some(file) = file {
        match Theme::from_file(file) {
            Ok(theme) => return theme,
            Err(e) => tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, trying theme name"),
        }
    }

    Theme::from_name(name).unwrap_or_else(|| {
        tracing::warn!(theme_name = %name, fallback = %fallback.name, "unknown theme, using default");
        fallback.clone()
    })
}

/// Builds the initial state from `config`.
///
/// The catalog is not requested here; the shim asks for permissions first
/// and starts the load once they are granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let defaults = ThemeController::default();
    let light = resolve_theme(
        config.light_theme_file.as_deref(),
        &config.light_theme,
        defaults.theme_for(ThemeMode::Light),
    );
    let dark = resolve_theme(
        config.dark_theme_file.as_deref(),
        &config.dark_theme,
        defaults.theme_for(ThemeMode::Dark),
    );

    let source = DataSource::parse(&config.data_source);
    tracing::debug!(source = %source, light = %light.name, dark = %dark.name, "plugin initialized");

    let mut state = AppState::new(source, ThemeController::new(light, dark), config.title.clone());
    state.close_on_open = config.close_on_open;
    state
}
