//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin knows: the
//! loaded dataset, the category selection and search query, the cached
//! filtered view, the card cursor, the load tracker and the theme controller.
//!
//! # Derived State
//!
//! `filtered` is a projection of `(dataset, selection, search_query)` and is
//! recomputed by [`AppState::apply_filters`] whenever one of them changes.
//! The card cursor indexes the flat list of rendered cards, which skips
//! categories without flows.
//!
//! # Example
//!
//! ```rust
//! use flowboard::app::AppState;
//! use flowboard::infrastructure::DataSource;
//! use flowboard::ui::ThemeController;
//!
//! let state = AppState::new(DataSource::default(), ThemeController::default(), "Workflows");
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.count, 0);
//! ```

use super::loader::{describe_age, LoadTracker};
use super::modes::{InputMode, LoadStatus, SearchFocus, VisiblePanel};
use crate::domain::{
    self, flow_count, is_no_results, match_range, normalize_query, select_icon, unique_category_names,
    Category, CategorySelection, Dataset, Flow, LoadError,
};
use crate::infrastructure::DataSource;
use crate::ui::components::{grid_columns, CARD_HEIGHT, CHROME_ROWS};
use crate::ui::theme::ThemeController;
use crate::ui::viewmodel::{
    BodyRow, CardView, CategoryTag, EmptyState, FooterInfo, GridView, HeaderInfo, Panel, SearchBarInfo,
    SectionHeader, UIViewModel,
};
use chrono::{DateTime, Utc};
use std::ops::Range;

const CATEGORY_REVEAL_STEP_MS: u64 = 100;
const FLOW_REVEAL_STEP_MS: u64 = 50;

/// Position of a rendered card within the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRef {
    pub category_index: usize,
    pub flow_index: usize,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authoritative copy of the last successful load.
    pub dataset: Dataset,

    /// Dataset filtered by `selection` and `search_query`.
    pub filtered: Vec<Category>,

    /// Tag bar entries, first-occurrence order.
    pub category_names: Vec<String>,

    pub selection: CategorySelection,

    /// Search box text exactly as typed.
    pub search_input: String,

    /// Normalized form of `search_input` used for matching.
    pub search_query: String,

    /// Index into the flat card list.
    pub selected_index: usize,

    pub input_mode: InputMode,
    pub load_status: LoadStatus,
    pub loader: LoadTracker,
    pub source: DataSource,
    pub themes: ThemeController,
    pub title: String,

    /// Hide the plugin after a flow is opened.
    pub close_on_open: bool,

    /// `true` once the host granted the requested permissions.
    pub permitted: bool,

    pub loaded_at: Option<DateTime<Utc>>,
}

impl AppState {
    /// Creates an empty state waiting for its first load.
    #[must_use]
    pub fn new(source: DataSource, themes: ThemeController, title: impl Into<String>) -> Self {
        Self {
            dataset: Vec::new(),
            filtered: Vec::new(),
            category_names: Vec::new(),
            selection: CategorySelection::All,
            search_input: String::new(),
            search_query: String::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            load_status: LoadStatus::Loading,
            loader: LoadTracker::new(),
            source,
            themes,
            title: title.into(),
            close_on_open: true,
            permitted: false,
            loaded_at: None,
        }
    }

    /// Rendered cards in display order; empty categories contribute nothing.
    #[must_use]
    pub fn cards(&self) -> Vec<CardRef> {
        self.filtered
            .iter()
            .enumerate()
            .flat_map(|(category_index, category)| {
                (0..category.flows.len()).map(move |flow_index| CardRef {
                    category_index,
                    flow_index,
                })
            })
            .collect()
    }

    fn flow_at(&self, card: CardRef) -> Option<&Flow> {
        self.filtered
            .get(card.category_index)
            .and_then(|category| category.flows.get(card.flow_index))
    }

    /// The flow under the card cursor, if any card is visible.
    #[must_use]
    pub fn selected_flow(&self) -> Option<&Flow> {
        if self.visible_panel() != VisiblePanel::Content {
            return None;
        }
        self.cards()
            .get(self.selected_index)
            .and_then(|&card| self.flow_at(card))
    }

    /// Moves the card cursor forward, wrapping to the first card.
    pub fn move_selection_down(&mut self) {
        let count = flow_count(&self.filtered);
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the card cursor back, wrapping to the last card.
    pub fn move_selection_up(&mut self) {
        let count = flow_count(&self.filtered);
        if count == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            count - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Recomputes the filtered view and clamps the card cursor.
    pub fn apply_filters(&mut self) {
        let _span = tracing::debug_span!("apply_filters",
            categories = self.dataset.len(),
            selection = %self.selection,
            query_len = self.search_query.len()
        )
        .entered();

        self.filtered = domain::apply_filters(&self.dataset, &self.selection, &self.search_query);

        let count = flow_count(&self.filtered);
        self.selected_index = if count == 0 {
            0
        } else {
            self.selected_index.min(count - 1)
        };

        tracing::debug!(
            filtered_categories = self.filtered.len(),
            filtered_flows = count,
            "filters applied"
        );
    }

    /// Replaces the search input and refilters.
    pub fn set_search_input(&mut self, raw: impl Into<String>) {
        self.search_input = raw.into();
        self.search_query = normalize_query(&self.search_input);
        self.apply_filters();
    }

    /// Activates a category tag and refilters. Returns `false` if it was
    /// already active.
    pub fn select_category(&mut self, selection: CategorySelection) -> bool {
        if self.selection == selection {
            return false;
        }
        tracing::debug!(category = %selection, "category selected");
        self.selection = selection;
        self.selected_index = 0;
        self.apply_filters();
        true
    }

    /// Steps through the tag bar (`All`, then each category), wrapping.
    pub fn cycle_category(&mut self, forward: bool) {
        let tags = self.category_names.len() + 1;
        let current = match &self.selection {
            CategorySelection::All => 0,
            CategorySelection::Named(name) => self
                .category_names
                .iter()
                .position(|candidate| candidate == name)
                .map_or(0, |index| index + 1),
        };
        let next = if forward {
            (current + 1) % tags
        } else {
            (current + tags - 1) % tags
        };
        let selection = match next {
            0 => CategorySelection::All,
            index => CategorySelection::Named(self.category_names[index - 1].clone()),
        };
        self.select_category(selection);
    }

    /// Tag at `position` in the tag bar, where 0 is `All`.
    #[must_use]
    pub fn category_at(&self, position: usize) -> Option<CategorySelection> {
        match position {
            0 => Some(CategorySelection::All),
            n => self.category_names.get(n - 1).cloned().map(CategorySelection::Named),
        }
    }

    /// Starts a load attempt. Returns its ticket, or `None` while another
    /// attempt is still in flight.
    pub fn begin_load(&mut self) -> Option<u64> {
        let Some(ticket) = self.loader.begin() else {
            tracing::debug!(in_flight = ?self.loader.in_flight(), "load already in flight, ignoring reload");
            return None;
        };
        tracing::debug!(ticket, source = %self.source, "load started");
        self.load_status = LoadStatus::Loading;
        Some(ticket)
    }

    /// Applies the outcome of load `ticket`. Returns `false` when the ticket
    /// is stale and the outcome was dropped.
    pub fn complete_load(&mut self, ticket: u64, outcome: Result<Dataset, LoadError>) -> bool {
        if !self.loader.finish(ticket) {
            tracing::debug!(ticket, in_flight = ?self.loader.in_flight(), "discarding stale load result");
            return false;
        }

        match outcome {
            Ok(dataset) => {
                tracing::info!(
                    ticket,
                    categories = dataset.len(),
                    flows = flow_count(&dataset),
                    "dataset loaded"
                );
                self.category_names = unique_category_names(&dataset);
                self.dataset = dataset;
                self.selection = CategorySelection::All;
                self.search_input.clear();
                self.search_query.clear();
                self.input_mode = InputMode::Normal;
                self.selected_index = 0;
                self.load_status = LoadStatus::Ready;
                self.loaded_at = Some(Utc::now());
                self.apply_filters();
            }
            Err(error) => {
                tracing::warn!(ticket, error = %error, "dataset load failed");
                self.fail_load(error);
            }
        }
        true
    }

    /// Fails whatever load is in flight with `error`, for replies that lost
    /// their ticket. Returns `false` when nothing was in flight.
    pub fn abandon_load(&mut self, error: LoadError) -> bool {
        match self.loader.in_flight() {
            Some(ticket) => self.complete_load(ticket, Err(error)),
            None => false,
        }
    }

    /// Puts the state into the error panel without touching the tracker.
    pub fn fail_load(&mut self, error: LoadError) {
        self.dataset.clear();
        self.filtered.clear();
        self.category_names.clear();
        self.selected_index = 0;
        self.load_status = LoadStatus::Failed(error);
    }

    /// Which body panel is showing.
    #[must_use]
    pub fn visible_panel(&self) -> VisiblePanel {
        match self.load_status {
            LoadStatus::Loading => VisiblePanel::Loading,
            LoadStatus::Failed(_) => VisiblePanel::Error,
            LoadStatus::Ready if is_no_results(&self.filtered) => VisiblePanel::NoResults,
            LoadStatus::Ready => VisiblePanel::Content,
        }
    }

    /// Computes a renderable view model for a `rows` by `cols` frame.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(rows, cols, Utc::now())
    }

    /// Same as [`compute_viewmodel`](Self::compute_viewmodel) with an explicit clock.
    #[must_use]
    pub fn compute_viewmodel_at(&self, rows: usize, cols: usize, now: DateTime<Utc>) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: self.title.clone(),
                count: flow_count(&self.filtered),
            },
            category_bar: self.compute_category_bar(),
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                is_focused: self.input_mode == InputMode::Search(SearchFocus::Typing),
            },
            panel: self.compute_panel(rows, cols),
            footer: self.compute_footer(now),
        }
    }

    fn compute_category_bar(&self) -> Vec<CategoryTag> {
        std::iter::once(CategoryTag {
            label: "All".to_string(),
            is_active: self.selection == CategorySelection::All,
        })
        .chain(self.category_names.iter().map(|name| CategoryTag {
            label: name.clone(),
            is_active: self.selection.admits(name) && self.selection != CategorySelection::All,
        }))
        .collect()
    }

    fn compute_panel(&self, rows: usize, cols: usize) -> Panel {
        match (&self.load_status, self.visible_panel()) {
            (LoadStatus::Failed(error), _) => Panel::Error(EmptyState {
                message: error.to_string(),
                subtitle: "Press r to retry".to_string(),
            }),
            (_, VisiblePanel::Loading) => Panel::Loading(EmptyState {
                message: "Loading workflows…".to_string(),
                subtitle: self.source.to_string(),
            }),
            (_, VisiblePanel::NoResults) => Panel::NoResults(EmptyState {
                message: "No matching workflows".to_string(),
                subtitle: if self.search_query.is_empty() {
                    "This category has no flows".to_string()
                } else {
                    format!("Nothing matches \"{}\"", self.search_input.trim())
                },
            }),
            _ => Panel::Content(self.compute_grid(rows, cols)),
        }
    }

    /// Lays the filtered view out as section headers and card rows, then
    /// windows the rows so the selected card is on screen.
    fn compute_grid(&self, rows: usize, cols: usize) -> GridView {
        let columns = grid_columns(cols);
        let mut body = Vec::new();
        let mut selected_row = 0;
        let mut card_number = 0;

        for (category_index, category) in self.filtered.iter().enumerate() {
            if category.flows.is_empty() {
                continue;
            }
            body.push(BodyRow::Section(SectionHeader {
                title: category.category_name.clone(),
                category_index,
            }));

            for (chunk_index, chunk) in category.flows.chunks(columns).enumerate() {
                let cards = chunk
                    .iter()
                    .enumerate()
                    .map(|(offset, flow)| {
                        let flow_index = chunk_index * columns + offset;
                        let is_selected = card_number + flow_index == self.selected_index;
                        if is_selected {
                            selected_row = body.len();
                        }
                        self.compute_card(flow, category_index, flow_index, is_selected)
                    })
                    .collect();
                body.push(BodyRow::Cards(cards));
            }
            card_number += category.flows.len();
        }

        let heights: Vec<usize> = body
            .iter()
            .map(|row| match row {
                BodyRow::Section(_) => 1,
                BodyRow::Cards(_) => CARD_HEIGHT,
            })
            .collect();
        let window = window_rows(&heights, selected_row, rows.saturating_sub(CHROME_ROWS));

        GridView {
            columns,
            clipped_above: window.start > 0,
            clipped_below: window.end < body.len(),
            rows: body.drain(window).collect(),
        }
    }

    fn compute_card(&self, flow: &Flow, category_index: usize, flow_index: usize, is_selected: bool) -> CardView {
        CardView {
            name: flow.name.clone(),
            url: flow.url.clone(),
            icon: select_icon(&flow.name),
            is_selected,
            highlight: match_range(&flow.name, &self.search_query),
            reveal_delay_ms: category_index as u64 * CATEGORY_REVEAL_STEP_MS
                + flow_index as u64 * FLOW_REVEAL_STEP_MS,
        }
    }

    fn compute_footer(&self, now: DateTime<Utc>) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: clear search  Enter: open  ↑/↓: navigate  Tab: results"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: clear search  /: edit query  j/k: navigate  Enter: open"
            }
            InputMode::Normal => match self.visible_panel() {
                VisiblePanel::Error => "r: retry  t: theme  q: quit",
                _ => "j/k: navigate  Tab/1-9: category  /: search  Enter: open  t: theme  r: reload  q: quit",
            },
        }
        .to_string();

        let status = match (&self.load_status, self.loaded_at) {
            (LoadStatus::Loading, _) => "loading…".to_string(),
            (LoadStatus::Failed(_), _) => "load failed".to_string(),
            (LoadStatus::Ready, Some(at)) => format!("synced {}", describe_age(at, now)),
            (LoadStatus::Ready, None) => String::new(),
        };

        FooterInfo { keybindings, status }
    }
}

/// Picks the contiguous range of rows to show in `available` lines so that
/// row `selected` is visible, roughly centered when there is room.
///
/// Rows are never cut in half. A row taller than the whole window is still
/// shown on its own.
fn window_rows(heights: &[usize], selected: usize, available: usize) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let selected = selected.min(heights.len() - 1);
    if heights.iter().sum::<usize>() <= available {
        return 0..heights.len();
    }

    let mut start = selected;
    let mut end = selected + 1;
    let mut used = heights[selected];

    // Up to half the space above the selection first, then fill below,
    // then give anything left back to the rows above.
    let above_budget = (available / 2 + heights[selected]).min(available);
    while start > 0 && used + heights[start - 1] <= above_budget {
        start -= 1;
        used += heights[start];
    }
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }

    start..end
}
