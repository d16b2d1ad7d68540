//! Header bar: title with visible-flow count on the left, theme toggle on the right.

use crate::ui::helpers::{base_style, display_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row`. Returns the next free row.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let toggle = format!(" {} ", theme.colors.toggle_icon);
    let toggle_width = display_width(&toggle);
    let title = truncate_to_width(
        &format!(" {} ({})", header.title, header.count),
        cols.saturating_sub(toggle_width),
    );

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    let bg = theme.colors.header_bg.as_ref().unwrap_or(&theme.colors.background);
    out.push_str(&Theme::bg(bg));
    out.push_str(&title);
    out.push_str(&" ".repeat(cols.saturating_sub(display_width(&title) + toggle_width)));

    out.push_str(&Theme::fg(&theme.colors.toggle_icon_fg));
    out.push_str(&toggle);
    out.push_str(&base_style(theme));
    row + 1
}
