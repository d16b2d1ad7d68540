//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry no business logic, only display-ready data:
//! selection flags, match ranges, reveal delays and the windowed body.
//!
//! # Example
//!
//! ```rust
//! use flowboard::ui::viewmodel::{EmptyState, Panel};
//!
//! let panel = Panel::Loading(EmptyState {
//!     message: "Loading workflows".to_string(),
//!     subtitle: String::new(),
//! });
//! assert!(panel.cards().next().is_none());
//! ```

use crate::domain::Icon;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Category tags, `All` first.
    pub category_bar: Vec<CategoryTag>,

    pub search_bar: SearchBarInfo,

    /// The one body panel visible in this frame.
    pub panel: Panel,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Number of flows in the filtered view.
    pub count: usize,
}

/// One entry of the category tag bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTag {
    pub label: String,
    pub is_active: bool,
}

/// Search box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Raw input as typed, before normalization.
    pub query: String,

    /// `true` while keystrokes edit the query.
    pub is_focused: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding hints for the current input mode.
    pub keybindings: String,

    /// Load status, e.g. "synced 5m ago".
    pub status: String,
}

/// Message shown instead of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Body panel. Exactly one is visible at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Loading(EmptyState),
    /// Load failure; the subtitle carries the retry hint.
    Error(EmptyState),
    NoResults(EmptyState),
    /// Windowed grid rows, top to bottom.
    Content(GridView),
}

impl Panel {
    /// Every card in the panel, in display order.
    pub fn cards(&self) -> impl Iterator<Item = &CardView> {
        let rows: &[BodyRow] = match self {
            Self::Content(grid) => &grid.rows,
            _ => &[],
        };
        rows.iter().flat_map(|row| match row {
            BodyRow::Cards(cards) => cards.as_slice(),
            BodyRow::Section(_) => [].as_slice(),
        })
    }
}

/// Card grid after windowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    /// Cards per row.
    pub columns: usize,

    pub rows: Vec<BodyRow>,

    /// `true` when rows above the window were cut.
    pub clipped_above: bool,

    /// `true` when rows below the window were cut.
    pub clipped_below: bool,
}

/// One visual row of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyRow {
    /// Category section header.
    Section(SectionHeader),
    /// Up to `columns` cards side by side.
    Cards(Vec<CardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub title: String,

    /// Index of the category in the filtered view.
    pub category_index: usize,
}

/// Display information for one flow card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub url: String,
    pub icon: Icon,
    pub is_selected: bool,

    /// Character range of the search match within `name`.
    pub highlight: Option<(usize, usize)>,

    /// Staggered entrance delay: `category_index * 100 + flow_index * 50`.
    pub reveal_delay_ms: u64,
}
