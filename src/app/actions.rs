//! Side effects requested by the event handler.
//!
//! The handler never touches Zellij directly. It mutates [`AppState`] and
//! returns a list of [`Action`]s that the plugin shim executes in order.
//!
//! [`AppState`]: crate::app::AppState

use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Asks the host for the plugin's permissions again.
    RequestPermissions,

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Issues an HTTP GET for the catalog through the host.
    ///
    /// The ticket travels in the request context and comes back with the
    /// response so stale results can be recognized.
    FetchRemote {
        url: String,
        ticket: u64,
    },

    /// Opens a flow's link with the configured opener.
    OpenUrl {
        url: String,
    },
}
