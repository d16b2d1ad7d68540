//! Card grid: section headers followed by rows of bordered flow cards.
//!
//! ```text
//! ▌ 行政
//! ╭──────────────────────╮  ╭──────────────────────╮
//! │ 📅 请假申请          │  │ 🚗 用车申请          │
//! ╰──────────────────────╯  ╰──────────────────────╯
//! ```

use crate::ui::helpers::{
    base_style, display_width, fit_to_width, position_cursor, truncate_to_width, write_highlighted,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyRow, CardView, GridView, SectionHeader};

/// Cells per card slot, gap included.
pub const CARD_WIDTH: usize = 26;

/// Space between adjacent cards.
const CARD_GAP: usize = 2;

/// Lines per card row.
pub const CARD_HEIGHT: usize = 3;

const MAX_COLUMNS: usize = 6;

/// Left margin of the grid.
const GRID_INDENT: usize = 2;

/// Cards per row for a frame `cols` wide: `(cols - 2) / CARD_WIDTH`, kept
/// within `1..=6`.
#[must_use]
pub fn grid_columns(cols: usize) -> usize {
    (cols.saturating_sub(GRID_INDENT) / CARD_WIDTH).clamp(1, MAX_COLUMNS)
}

/// Renders the windowed grid into the `height` rows starting at `row`.
/// Rows that would not fit entirely are left out. Returns the next free row.
pub fn render_grid(out: &mut String, row: usize, height: usize, grid: &GridView, theme: &Theme, cols: usize) -> usize {
    let card_width = CARD_WIDTH - CARD_GAP;
    let bottom = row + height;
    let mut current_row = row;

    for body_row in &grid.rows {
        let needed = match body_row {
            BodyRow::Section(_) => 1,
            BodyRow::Cards(_) => CARD_HEIGHT,
        };
        if current_row + needed > bottom {
            break;
        }
        current_row = match body_row {
            BodyRow::Section(section) => render_section_header(out, current_row, section, theme, cols),
            BodyRow::Cards(cards) => render_card_row(out, current_row, cards, card_width, theme, cols),
        };
    }

    if current_row == row {
        return row;
    }
    if grid.clipped_above {
        write_marker(out, row, '▲', theme, cols);
    }
    if grid.clipped_below && current_row > row {
        write_marker(out, current_row - 1, '▼', theme, cols);
    }

    current_row
}

fn render_section_header(out: &mut String, row: usize, section: &SectionHeader, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&base_style(theme));
    out.push_str(&" ".repeat(GRID_INDENT.min(cols)));
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push('▌');
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.category_fg));
    let title = fit_to_width(&format!(" {}", section.title), cols.saturating_sub(GRID_INDENT + 1));
    out.push_str(&title);
    out.push_str(&base_style(theme));
    row + 1
}

fn render_card_row(
    out: &mut String,
    row: usize,
    cards: &[CardView],
    card_width: usize,
    theme: &Theme,
    cols: usize,
) -> usize {
    let inner_width = card_width.saturating_sub(2);

    for line in 0..CARD_HEIGHT {
        position_cursor(out, row + line, 1);
        out.push_str(&base_style(theme));
        out.push_str(&" ".repeat(GRID_INDENT.min(cols)));
        let mut used = GRID_INDENT;

        for (index, card) in cards.iter().enumerate() {
            if index > 0 {
                out.push_str(&" ".repeat(CARD_GAP));
                used += CARD_GAP;
            }
            render_card_line(out, line, card, inner_width, theme);
            used += card_width;
        }

        out.push_str(&" ".repeat(cols.saturating_sub(used)));
    }

    row + CARD_HEIGHT
}

/// Writes line `line` (0 = top border, 1 = content, 2 = bottom border) of one card.
fn render_card_line(out: &mut String, line: usize, card: &CardView, inner_width: usize, theme: &Theme) {
    let (fg, bg, border) = if card.is_selected {
        (&theme.colors.selection_fg, &theme.colors.selection_bg, &theme.colors.accent)
    } else {
        (&theme.colors.card_fg, &theme.colors.card_bg, &theme.colors.card_border)
    };
    let card_style = format!("{}{}", Theme::fg(fg), Theme::bg(bg));

    out.push_str(&Theme::fg(border));
    out.push_str(&Theme::bg(bg));
    match line {
        0 => out.push_str(&format!("╭{}╮", "─".repeat(inner_width))),
        2 => out.push_str(&format!("╰{}╯", "─".repeat(inner_width))),
        _ => {
            out.push('│');
            if card.is_selected {
                out.push_str(Theme::bold());
            } else {
                out.push_str(&Theme::fg(&theme.colors.icon_fg));
            }
            out.push(' ');
            let icon = card.icon.glyph();
            out.push_str(icon);
            out.push(' ');
            out.push_str(&card_style);

            let name_width = inner_width.saturating_sub(display_width(icon) + 2);
            let name = fit_to_width(&card.name, name_width);
            let highlight = if card.is_selected {
                None
            } else {
                visible_highlight(&card.name, name_width, card.highlight)
            };
            write_highlighted(out, &name, highlight, theme, &card_style);

            out.push_str(&Theme::fg(border));
            out.push('│');
        }
    }
    out.push_str(&base_style(theme));
}

/// Clamps a match range to the chars of `name` that stay visible in `width`
/// cells, so neither the `…` nor the padding is highlighted.
fn visible_highlight(name: &str, width: usize, range: Option<(usize, usize)>) -> Option<(usize, usize)> {
    let (start, end) = range?;
    let shown = truncate_to_width(name, width);
    let visible = if shown == name {
        name.chars().count()
    } else {
        shown.chars().count().saturating_sub(1)
    };
    let end = end.min(visible);
    (start < end).then_some((start, end))
}

fn write_marker(out: &mut String, row: usize, marker: char, theme: &Theme, cols: usize) {
    if cols == 0 {
        return;
    }
    position_cursor(out, row, cols);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push(marker);
    out.push_str(&base_style(theme));
}
