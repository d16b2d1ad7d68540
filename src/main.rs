//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Flowboard library and Zellij: it maps
//! host events to [`Event`]s, runs the returned [`Action`]s through the host
//! API, and hosts the worker that reads catalog files.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │───┼──▶ web_request (remote catalogs)
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ FlowboardWorker  │   │  ← catalog file reads
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`, request
//!    permissions, subscribe to events
//! 2. **Permissions granted**: first catalog load starts
//! 3. **Update**: map events, delegate to the library, run actions
//! 4. **Render**: print the frame built by the library
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: next / previous card
//! - `↓`/`→` and `↑`/`←`: next / previous card
//! - `Enter`: open the selected flow
//! - `Esc`: clear search
//!
//! Outside the search box:
//! - `j`/`l` and `k`/`h`: next / previous card
//! - `Tab` / `Shift+Tab`: next / previous category
//! - `0`: all categories, `1`-`9`: jump to that category tag
//! - `/`: search
//! - `t`: toggle theme, `r`: reload, `q`: hide
//!
//! While typing in the search box:
//! - printable keys edit the query, `Backspace` deletes
//! - `Tab`: move focus to the results

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use flowboard::worker::{FlowboardWorker, WorkerMessage, WorkerResponse};
use flowboard::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);
register_worker!(FlowboardWorker, flowboard_worker, FLOWBOARD_WORKER);

/// Context key carrying the load ticket through `web_request`.
const REQUEST_ID_KEY: &str = "request_id";

/// Context key marking `run_command` calls made to open a flow.
const OPENER_KEY: &str = "opener";

struct State {
    app: flowboard::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Program run with the flow URL as its only argument.
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: flowboard::initialize(&default_config),
            worker_name: "flowboard".to_string(),
            open_command: default_config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the state, requests permissions and
    /// subscribes to events. The catalog load starts once permissions are
    /// granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        flowboard::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(data_source = %config.data_source, title = %config.title, "parsed configuration");
        self.app = flowboard::initialize(&config);
        self.open_command.clone_from(&config.open_command);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                if !context.contains_key(OPENER_KEY) {
                    return false;
                }
                Event::OpenerFinished {
                    exit_code,
                    stderr: String::from_utf8_lossy(&stderr).into_owned(),
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        flowboard::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// Letters are query text while the search box has focus; arrows and
    /// `Ctrl+n`/`Ctrl+p` navigate in every mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        let typing = self.app.input_mode == InputMode::Search(SearchFocus::Typing);
        let normal = self.app.input_mode == InputMode::Normal;

        Some(match key.bare_key {
            BareKey::Down | BareKey::Right => Event::KeyDown,
            BareKey::Up | BareKey::Left => Event::KeyUp,
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevCategory,
            BareKey::Tab if typing => Event::FocusResults,
            BareKey::Tab => Event::NextCategory,
            BareKey::Enter => Event::ActivateCard,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if typing => Event::Char(c),
            BareKey::Char('/') => {
                if normal {
                    Event::SearchMode
                } else {
                    Event::FocusSearchBar
                }
            }
            BareKey::Char('j' | 'l') => Event::KeyDown,
            BareKey::Char('k' | 'h') => Event::KeyUp,
            BareKey::Char(digit @ '0'..='9') => {
                let position = digit.to_digit(10).map_or(0, |d| d as usize);
                Event::SelectCategory(self.app.category_at(position)?)
            }
            BareKey::Char('t') if normal => Event::ToggleTheme,
            BareKey::Char('r') if normal => Event::Reload,
            BareKey::Char('q') if normal => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps worker replies addressed to this plugin.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                Some(Event::WorkerResponse(WorkerResponse::Error {
                    message: format!("unreadable worker reply: {e}"),
                }))
            }
        }
    }

    /// Maps a `web_request` result back to the load it belongs to.
    fn map_web_request_event(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(ticket) = context.get(REQUEST_ID_KEY).and_then(|id| id.parse::<u64>().ok()) else {
            tracing::debug!(status, "web response without a request id");
            return None;
        };
        Some(Event::RemoteResponse { ticket, status, body })
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                hide_self();
            }
            Action::RequestPermissions => {
                request_permission(&[
                    PermissionType::WebAccess,
                    PermissionType::RunCommands,
                    PermissionType::FullHdAccess,
                ]);
            }
            Action::PostToWorker(message) => {
                self.post_worker_message(message);
            }
            Action::FetchRemote { url, ticket } => {
                let mut context = BTreeMap::new();
                context.insert(REQUEST_ID_KEY.to_string(), ticket.to_string());
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
            Action::OpenUrl { url } => {
                let mut context = BTreeMap::new();
                context.insert(OPENER_KEY.to_string(), url.clone());
                run_command(&[self.open_command.as_str(), url.as_str()], context);
            }
        }
    }
}
