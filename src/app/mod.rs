//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain, worker and UI
//! layers.
//!
//! ```text
//! Key / host event → Event → handle_event → AppState mutation → Actions → Zellij calls
//!                                ↑                                      ↓
//!                                └──── web responses / worker replies ──┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`loader`]: Load tickets, request construction and response decoding
//! - [`modes`]: Input, load and panel state types
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod handler;
pub mod loader;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use loader::LoadTracker;
pub use modes::{InputMode, LoadStatus, SearchFocus, VisiblePanel};
pub use state::{AppState, CardRef};
