//! Category tag bar.

use crate::ui::helpers::{base_style, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CategoryTag;

/// Renders the tags left to right at `row`; tags that do not fit are
/// replaced by a trailing `…`. Returns the next free row.
pub fn render_category_bar(out: &mut String, row: usize, tags: &[CategoryTag], theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&base_style(theme));
    out.push(' ');
    let mut used = 1;

    for tag in tags {
        let label = format!(" {} ", tag.label);
        let width = display_width(&label);
        if used + width + 2 > cols {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push('…');
            used += 1;
            break;
        }

        let (fg, bg) = if tag.is_active {
            (&theme.colors.tag_active_fg, &theme.colors.tag_active_bg)
        } else {
            (&theme.colors.tag_fg, &theme.colors.tag_bg)
        };
        if tag.is_active {
            out.push_str(Theme::bold());
        }
        out.push_str(&Theme::fg(fg));
        out.push_str(&Theme::bg(bg));
        out.push_str(&label);
        out.push_str(&base_style(theme));
        out.push(' ');
        used += width + 1;
    }

    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    row + 1
}
