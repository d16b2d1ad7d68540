//! Composable UI component renderers.
//!
//! Each component draws one part of the frame into a shared buffer and
//! returns the next free row.
//!
//! - [`header`]: title, flow count, theme toggle icon
//! - [`categories`]: category tag bar
//! - [`search`]: search input box
//! - [`grid`]: section headers and card rows
//! - [`empty`]: loading, error and no-results messages
//! - [`footer`]: keybinding hints and load status
//!
//! # Layout
//!
//! ```text
//! row 1            [Header]
//! row 2            [Category tags]
//! rows 3-5         [Search box]
//! rows 6..=rows-2  [Body: grid or message panel]
//! row rows-1       [Border]
//! row rows         [Footer]
//! ```

mod categories;
mod empty;
mod footer;
mod grid;
mod header;
mod search;

pub use grid::{grid_columns, CARD_HEIGHT, CARD_WIDTH};

use crate::ui::helpers::{base_style, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Panel, UIViewModel};

use categories::render_category_bar;
use empty::render_message_panel;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use search::render_search_bar;

/// Rows used by everything except the body.
pub const CHROME_ROWS: usize = 7;

/// Renders a horizontal border line at `row`. Returns the next free row.
fn render_border(out: &mut String, row: usize, color: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(&base_style(theme));
    row + 1
}

/// Draws every component of `vm` in its place.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 1;
    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_category_bar(out, current_row, &vm.category_bar, theme, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);

    let body_height = rows.saturating_sub(CHROME_ROWS);
    match &vm.panel {
        Panel::Loading(empty) | Panel::NoResults(empty) => {
            render_message_panel(out, current_row, body_height, empty, &theme.colors.empty_state_fg, theme, cols);
        }
        Panel::Error(empty) => {
            render_message_panel(out, current_row, body_height, empty, &theme.colors.error_fg, theme, cols);
        }
        Panel::Content(grid) => {
            render_grid(out, current_row, body_height, grid, theme, cols);
        }
    }

    if rows >= CHROME_ROWS {
        let footer_row = rows;
        render_border(out, footer_row - 1, &theme.colors.border, theme, cols);
        render_footer(out, footer_row, &vm.footer, theme, cols);
    }
}
