//! Search box. Always visible; its border switches color while it has focus.

use crate::ui::helpers::{base_style, fit_to_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

const PLACEHOLDER: &str = "Search workflows (/)";

/// Renders the 3-line search box at `row`. Returns the next free row.
///
/// ```text
/// [margin] ╭─────────────────╮ [margin]
/// [margin] │ Search: query▏  │ [margin]
/// [margin] ╰─────────────────╯ [margin]
/// ```
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN.min(cols));
    let border_color = if search.is_focused {
        &theme.colors.search_focus_border
    } else {
        &theme.colors.search_bar_border
    };
    let border = Theme::fg(border_color);

    position_cursor(out, row, 1);
    out.push_str(&base_style(theme));
    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("╭{}╮", "─".repeat(inner_width)));
    out.push_str(&base_style(theme));
    out.push_str(&margin);

    let (text, text_fg) = if search.query.is_empty() && !search.is_focused {
        (format!(" {PLACEHOLDER}"), &theme.colors.text_dim)
    } else {
        let cursor = if search.is_focused { "▏" } else { "" };
        (format!(" Search: {}{cursor}", search.query), &theme.colors.search_bar_fg)
    };

    position_cursor(out, row + 1, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(text_fg));
    out.push_str(&Theme::bg(&theme.colors.search_bar_bg));
    out.push_str(&fit_to_width(&text, inner_width));
    out.push_str(&base_style(theme));
    out.push_str(&border);
    out.push('│');
    out.push_str(&base_style(theme));
    out.push_str(&margin);

    position_cursor(out, row + 2, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("╰{}╯", "─".repeat(inner_width)));
    out.push_str(&base_style(theme));
    out.push_str(&margin);

    row + 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_box_uses_focus_border_and_cursor() {
        let theme = Theme::default();
        let mut out = String::new();
        let search = SearchBarInfo { query: "报销".into(), is_focused: true };
        let next = render_search_bar(&mut out, 3, &search, &theme, 40);

        assert_eq!(next, 6);
        assert!(out.contains(&Theme::fg(&theme.colors.search_focus_border)));
        assert!(out.contains("Search: 报销▏"));
    }

    #[test]
    fn idle_empty_box_shows_placeholder() {
        let mut out = String::new();
        let search = SearchBarInfo { query: String::new(), is_focused: false };
        render_search_bar(&mut out, 3, &search, &Theme::default(), 60);
        assert!(out.contains(PLACEHOLDER));
    }
}
