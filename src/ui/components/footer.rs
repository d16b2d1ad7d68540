//! Footer: keybinding hints on the left, load status on the right.

use crate::ui::helpers::{base_style, display_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer at `row`. The status wins when space is short.
/// Returns the next free row.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let status = truncate_to_width(&footer.status, cols);
    let status_width = display_width(&status);
    let hints = truncate_to_width(
        &format!(" {}", footer.keybindings),
        cols.saturating_sub(status_width + 1),
    );
    let hints_width = display_width(&hints);

    position_cursor(out, row, 1);
    out.push_str(&base_style(theme));
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&hints);
    out.push_str(&" ".repeat(cols.saturating_sub(hints_width + status_width)));
    out.push_str(&status);
    out.push_str(&base_style(theme));
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_kept_when_hints_are_cut() {
        let footer = FooterInfo {
            keybindings: "j/k: navigate  Tab: category  /: search  Enter: open".into(),
            status: "synced just now".into(),
        };
        let mut out = String::new();
        render_footer(&mut out, 24, &footer, &Theme::default(), 30);

        assert!(out.contains("synced just now"));
        assert!(out.contains('…'));
    }
}
