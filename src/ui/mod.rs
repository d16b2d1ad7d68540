//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_frame → ANSI frame
//! ```
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Frame construction and output
//! - [`components`]: Header, tag bar, search box, grid, panels, footer
//! - [`helpers`]: Cell-width aware text fitting and highlighting
//! - [`theme`]: Themes, light/dark controller, ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_frame};
pub use theme::{Presentation, Theme, ThemeController, ThemeMode};
pub use viewmodel::{
    BodyRow, CardView, CategoryTag, EmptyState, FooterInfo, GridView, HeaderInfo, Panel, SearchBarInfo,
    SectionHeader, UIViewModel,
};
