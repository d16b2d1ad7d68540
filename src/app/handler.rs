//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It pattern-matches an
//! [`Event`], mutates [`AppState`], and returns whether a re-render is needed
//! together with the [`Action`]s the plugin shim must perform.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextCategory`, `PrevCategory`, `SelectCategory`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `Char`, `Backspace`
//! - **Commands**: `ActivateCard`, `ToggleTheme`, `Reload`, `CloseFocus`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `RemoteResponse`,
//!   `WorkerResponse`, `OpenerFinished`
//!
//! # Example
//!
//! ```rust
//! use flowboard::app::{handle_event, AppState, Event};
//! use flowboard::infrastructure::DataSource;
//! use flowboard::ui::ThemeController;
//!
//! let mut state = AppState::new(DataSource::default(), ThemeController::default(), "Workflows");
//! let (render, actions) = handle_event(&mut state, &Event::ToggleTheme)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), flowboard::domain::FlowboardError>(())
//! ```

use super::loader::{decode_response, request_for};
use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{CategorySelection, LoadError};
use crate::worker::WorkerResponse;

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the card cursor forward (wraps to the first card).
    KeyDown,
    /// Moves the card cursor back (wraps to the last card).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens the flow under the card cursor.
    ActivateCard,
    /// Activates the next category tag.
    NextCategory,
    /// Activates the previous category tag.
    PrevCategory,
    /// Activates a specific category tag.
    SelectCategory(CategorySelection),
    /// Enters search mode with typing focus.
    SearchMode,
    /// Returns focus to the search input while navigating results.
    FocusSearchBar,
    /// Moves focus from the search input to the results.
    FocusResults,
    /// Clears the search and returns to normal mode.
    ExitSearch,
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character of the search input.
    Backspace,
    /// Flips between light and dark mode.
    ToggleTheme,
    /// Starts a new load attempt (initial load and manual retry).
    Reload,

    /// The host granted every requested permission.
    PermissionsGranted,
    /// The host refused the requested permissions.
    PermissionsDenied,

    /// Result of a `web_request` issued for load `ticket`.
    ///
    /// `status` is 0 when the host could not perform the request at all.
    RemoteResponse {
        ticket: u64,
        status: u16,
        body: Vec<u8>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),

    /// The external opener exited.
    OpenerFinished {
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions run in order.
///
/// # Errors
///
/// Currently every event is handled in-state; the `Result` leaves room for
/// handler failures the shim should log.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_label(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::ActivateCard => {
            let Some(flow) = state.selected_flow() else {
                tracing::debug!("no card selected");
                if matches!(state.input_mode, InputMode::Search(_)) {
                    tracing::debug!("exiting search mode (no selection)");
                    exit_search(state);
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            };

            tracing::debug!(flow = %flow.name, url = %flow.url, "opening flow");
            let mut actions = vec![Action::OpenUrl { url: flow.url.clone() }];
            if state.close_on_open {
                actions.push(Action::CloseFocus);
            }
            Ok((false, actions))
        }
        Event::NextCategory => {
            state.cycle_category(true);
            Ok((true, vec![]))
        }
        Event::PrevCategory => {
            state.cycle_category(false);
            Ok((true, vec![]))
        }
        Event::SelectCategory(selection) => Ok((state.select_category(selection.clone()), vec![])),
        Event::SearchMode | Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                exit_search(state);
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_input, "exiting search mode");
            exit_search(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            let mut input = state.search_input.clone();
            input.push(*c);
            tracing::trace!(query = %input, char = %c, "search input updated");
            state.set_search_input(input);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            let mut input = state.search_input.clone();
            input.pop();
            state.set_search_input(input);
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            state.themes.toggle();
            Ok((true, vec![]))
        }
        Event::Reload => {
            if !state.permitted {
                tracing::debug!("reload requested without permissions, asking again");
                return Ok((false, vec![Action::RequestPermissions]));
            }
            match state.begin_load() {
                Some(ticket) => Ok((true, vec![request_for(&state.source, ticket)])),
                None => Ok((false, vec![])),
            }
        }
        Event::PermissionsGranted => {
            tracing::debug!("permissions granted, loading dataset");
            state.permitted = true;
            match state.begin_load() {
                Some(ticket) => Ok((true, vec![request_for(&state.source, ticket)])),
                None => Ok((false, vec![])),
            }
        }
        Event::PermissionsDenied => {
            tracing::warn!("permissions denied, dataset cannot be loaded");
            state.permitted = false;
            state.fail_load(LoadError::Permission(
                "web access, file access and command execution are required".to_string(),
            ));
            Ok((true, vec![]))
        }
        Event::RemoteResponse { ticket, status, body } => {
            tracing::debug!(ticket, status, body_len = body.len(), "remote response received");
            let outcome = decode_response(*status, body);
            Ok((state.complete_load(*ticket, outcome), vec![]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::DatasetLoaded { ticket, categories } => {
                Ok((state.complete_load(*ticket, Ok(categories.clone())), vec![]))
            }
            WorkerResponse::LoadFailed { ticket, error } => {
                Ok((state.complete_load(*ticket, Err(error.clone())), vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!(message = %message, "worker error");
                Ok((state.abandon_load(LoadError::Io(message.clone())), vec![]))
            }
        },
        Event::OpenerFinished { exit_code, stderr } => {
            if *exit_code == Some(0) {
                tracing::debug!("opener finished");
            } else {
                tracing::warn!(exit_code = ?exit_code, stderr = %stderr.trim(), "opener failed");
            }
            Ok((false, vec![]))
        }
    }
}

fn exit_search(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.set_search_input(String::new());
}

/// Event name for spans, without payloads such as response bodies.
const fn event_label(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::CloseFocus => "CloseFocus",
        Event::ActivateCard => "ActivateCard",
        Event::NextCategory => "NextCategory",
        Event::PrevCategory => "PrevCategory",
        Event::SelectCategory(_) => "SelectCategory",
        Event::SearchMode => "SearchMode",
        Event::FocusSearchBar => "FocusSearchBar",
        Event::FocusResults => "FocusResults",
        Event::ExitSearch => "ExitSearch",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ToggleTheme => "ToggleTheme",
        Event::Reload => "Reload",
        Event::PermissionsGranted => "PermissionsGranted",
        Event::PermissionsDenied => "PermissionsDenied",
        Event::RemoteResponse { .. } => "RemoteResponse",
        Event::WorkerResponse(_) => "WorkerResponse",
        Event::OpenerFinished { .. } => "OpenerFinished",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{LoadStatus, VisiblePanel};
    use crate::domain::{Category, Flow};
    use crate::infrastructure::DataSource;
    use crate::ui::{ThemeController, ThemeMode};
    use crate::worker::WorkerMessage;

    const URL: &str = "https://intranet.example/flows.json";
    const CATALOG: &str = r#"[
        {"categoryName": "行政", "flows": [
            {"name": "请假申请", "url": "https://oa.example/leave"},
            {"name": "会议室预订", "url": "https://oa.example/room"}
        ]},
        {"categoryName": "财务", "flows": [
            {"name": "报销单", "url": "https://oa.example/expense"}
        ]}
    ]"#;

    fn remote_state() -> AppState {
        AppState::new(DataSource::Remote(URL.into()), ThemeController::default(), "Workflows")
    }

    fn fetch_ticket(actions: &[Action]) -> u64 {
        match actions {
            [Action::FetchRemote { url, ticket }] => {
                assert_eq!(url, URL);
                *ticket
            }
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn loaded() -> AppState {
        let mut state = remote_state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let ticket = fetch_ticket(&actions);
        let response = Event::RemoteResponse {
            ticket,
            status: 200,
            body: CATALOG.as_bytes().to_vec(),
        };
        handle_event(&mut state, &response).unwrap();
        state
    }

    fn type_query(state: &mut AppState, query: &str) {
        handle_event(state, &Event::SearchMode).unwrap();
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn granted_permissions_start_the_first_fetch() {
        let state = loaded();
        assert_eq!(state.visible_panel(), VisiblePanel::Content);
        assert_eq!(state.category_names, vec!["行政", "财务"]);
    }

    #[test]
    fn not_found_shows_error_and_retry_fetches_again() {
        let mut state = remote_state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let first = fetch_ticket(&actions);

        let (render, _) = handle_event(
            &mut state,
            &Event::RemoteResponse { ticket: first, status: 404, body: b"Not Found".to_vec() },
        )
        .unwrap();
        assert!(render);
        assert_eq!(state.visible_panel(), VisiblePanel::Error);
        assert_eq!(state.load_status, LoadStatus::Failed(LoadError::Http { status: 404 }));

        let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        let second = fetch_ticket(&actions);
        assert_ne!(first, second);
        assert_eq!(state.visible_panel(), VisiblePanel::Loading);
    }

    #[test]
    fn reload_while_in_flight_is_ignored() {
        let mut state = remote_state();
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = loaded();
        let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        let current = fetch_ticket(&actions);

        let (render, _) = handle_event(
            &mut state,
            &Event::RemoteResponse { ticket: current - 1, status: 500, body: vec![] },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.load_status, LoadStatus::Loading);
    }

    #[test]
    fn malformed_body_is_a_load_error() {
        let mut state = remote_state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let ticket = fetch_ticket(&actions);
        handle_event(
            &mut state,
            &Event::RemoteResponse { ticket, status: 200, body: br#"{"flows": []}"#.to_vec() },
        )
        .unwrap();
        assert!(matches!(state.load_status, LoadStatus::Failed(LoadError::Malformed(_))));
    }

    #[test]
    fn file_sources_are_loaded_by_the_worker() {
        let mut state = AppState::new(DataSource::parse("flows.json"), ThemeController::default(), "Workflows");
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let ticket = match actions.as_slice() {
            [Action::PostToWorker(WorkerMessage::LoadDataset { path, ticket, .. })] => {
                assert_eq!(path, "/host/flows.json");
                *ticket
            }
            other => panic!("expected a worker load, got {other:?}"),
        };

        let response = WorkerResponse::DatasetLoaded {
            ticket,
            categories: vec![Category::new("HR", vec![Flow::new("人事变动", "/hr")])],
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert_eq!(state.selected_flow().unwrap().name, "人事变动");
    }

    #[test]
    fn worker_load_failure_shows_error() {
        let mut state = AppState::new(DataSource::parse("flows.json"), ThemeController::default(), "Workflows");
        state.permitted = true;
        let ticket = state.begin_load().unwrap();
        let response = WorkerResponse::LoadFailed {
            ticket,
            error: LoadError::Io("No such file or directory".into()),
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert_eq!(state.visible_panel(), VisiblePanel::Error);
    }

    #[test]
    fn worker_error_fails_the_pending_load_and_retry_works() {
        let mut state = AppState::new(DataSource::parse("flows.json"), ThemeController::default(), "Workflows");
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();

        let response = WorkerResponse::Error {
            message: "invalid worker message".into(),
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(render);
        assert_eq!(state.visible_panel(), VisiblePanel::Error);
        assert_eq!(state.loader.in_flight(), None);

        let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
        assert_eq!(state.visible_panel(), VisiblePanel::Loading);
    }

    #[test]
    fn worker_error_without_a_pending_load_changes_nothing() {
        let mut state = loaded();
        let response = WorkerResponse::Error { message: "late".into() };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(!render);
        assert_eq!(state.visible_panel(), VisiblePanel::Content);
    }

    #[test]
    fn denied_permissions_fail_and_retry_asks_again() {
        let mut state = remote_state();
        handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        assert!(matches!(state.load_status, LoadStatus::Failed(LoadError::Permission(_))));

        let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        assert_eq!(actions, vec![Action::RequestPermissions]);
    }

    #[test]
    fn typing_filters_and_backspace_restores() {
        let mut state = loaded();
        type_query(&mut state, "申请");
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.filtered[0].flows.len(), 1);

        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.filtered, state.dataset);
    }

    #[test]
    fn search_and_category_compose() {
        let mut state = loaded();
        handle_event(&mut state, &Event::SelectCategory(CategorySelection::Named("财务".into()))).unwrap();
        type_query(&mut state, "申请");
        assert_eq!(state.visible_panel(), VisiblePanel::NoResults);

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filtered[0].flows[0].name, "报销单");
    }

    #[test]
    fn chars_are_ignored_outside_typing_focus() {
        let mut state = loaded();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.search_input.is_empty());
    }

    #[test]
    fn focus_results_without_query_leaves_search() {
        let mut state = loaded();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::FocusResults).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);

        type_query(&mut state, "报销");
        handle_event(&mut state, &Event::FocusResults).unwrap();
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
    }

    #[test]
    fn activating_a_card_opens_its_url_and_closes() {
        let mut state = loaded();
        handle_event(&mut state, &Event::KeyDown).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ActivateCard).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::OpenUrl { url: "https://oa.example/room".into() },
                Action::CloseFocus
            ]
        );

        state.close_on_open = false;
        let (_, actions) = handle_event(&mut state, &Event::ActivateCard).unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn activating_with_no_results_exits_search() {
        let mut state = loaded();
        type_query(&mut state, "nothing");
        let (render, actions) = handle_event(&mut state, &Event::ActivateCard).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.visible_panel(), VisiblePanel::Content);
    }

    #[test]
    fn theme_toggle_round_trips() {
        let mut state = loaded();
        let before = state.themes.presentation();
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.themes.mode(), ThemeMode::Dark);
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.themes.presentation(), before);
    }

    #[test]
    fn reload_resets_search_and_selection_on_success() {
        let mut state = loaded();
        handle_event(&mut state, &Event::NextCategory).unwrap();
        type_query(&mut state, "请假");

        let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        let ticket = fetch_ticket(&actions);
        handle_event(
            &mut state,
            &Event::RemoteResponse { ticket, status: 200, body: CATALOG.as_bytes().to_vec() },
        )
        .unwrap();

        assert_eq!(state.selection, CategorySelection::All);
        assert!(state.search_input.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filtered, state.dataset);
    }
}
