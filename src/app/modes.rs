//! Input, load and panel state types.
//!
//! # State Machine
//!
//! Input is in one of two modes:
//! - **Normal**: navigation and commands
//! - **Search**: typing into the search box, or navigating its results
//!
//! The body shows exactly one [`VisiblePanel`], derived from the
//! [`LoadStatus`] and the current filtered view.

use crate::domain::LoadError;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes edit the query.
    Typing,

    /// Keystrokes move through the filtered cards; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default mode: j/k navigate, Tab cycles categories, Enter opens,
    /// t toggles theme, r reloads, / searches, q quits.
    Normal,

    /// Search mode with its focus state.
    Search(SearchFocus),
}

/// Outcome of the most recent load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A load is pending or in flight; no dataset is shown.
    Loading,
    /// The last attempt failed; the dataset is empty until a retry succeeds.
    Failed(LoadError),
    /// A dataset is loaded.
    Ready,
}

/// The one body panel visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisiblePanel {
    Loading,
    /// Load failure with a retry affordance.
    Error,
    /// Loaded, but the current filters leave nothing to show.
    NoResults,
    Content,
}
