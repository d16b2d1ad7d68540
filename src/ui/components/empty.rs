//! Centered message panels: loading, error, and no results.

use crate::ui::helpers::{base_style, display_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders `empty` vertically centered in the `height` rows starting at
/// `row`, with the message in `message_fg`.
pub fn render_message_panel(
    out: &mut String,
    row: usize,
    height: usize,
    empty: &EmptyState,
    message_fg: &str,
    theme: &Theme,
    cols: usize,
) {
    if height == 0 {
        return;
    }
    let message_row = row + height.saturating_sub(2) / 2;

    write_centered(out, message_row, &empty.message, &Theme::fg(message_fg), theme, cols);
    if height > 1 && !empty.subtitle.is_empty() {
        let style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        write_centered(out, message_row + 1, &empty.subtitle, &style, theme, cols);
    }
}

fn write_centered(out: &mut String, row: usize, text: &str, style: &str, theme: &Theme, cols: usize) {
    let text = truncate_to_width(text, cols);
    let width = display_width(&text);
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(out, row, 1);
    out.push_str(&base_style(theme));
    out.push_str(&" ".repeat(padding));
    out.push_str(style);
    out.push_str(&text);
    out.push_str(&base_style(theme));
    out.push_str(&" ".repeat(cols.saturating_sub(padding + width)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_and_subtitle_are_centered_in_the_body() {
        let theme = Theme::default();
        let empty = EmptyState { message: "HTTP error: 404".into(), subtitle: "Press r to retry".into() };
        let mut out = String::new();
        render_message_panel(&mut out, 6, 10, &empty, &theme.colors.error_fg, &theme, 40);

        assert!(out.contains("\u{1b}[10;1H"));
        assert!(out.contains("\u{1b}[11;1H"));
        assert!(out.contains("HTTP error: 404"));
        assert!(out.contains(&Theme::fg(&theme.colors.error_fg)));
    }

    #[test]
    fn zero_height_draws_nothing() {
        let mut out = String::new();
        let empty = EmptyState { message: "x".into(), subtitle: String::new() };
        render_message_panel(&mut out, 6, 0, &empty, "#000000", &Theme::default(), 40);
        assert!(out.is_empty());
    }
}
