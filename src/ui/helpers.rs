//! Shared rendering utilities.
//!
//! Components draw into a frame buffer (`&mut String`) instead of stdout so
//! a whole frame can be built, inspected in tests, and written once.
//!
//! Widths are terminal cells as reported by `unicode-width`: CJK characters
//! and emoji icons take two cells, so byte or char counts would misalign
//! every card.

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to truncated text.
const ELLIPSIS: char = '…';

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Terminal cell width of `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to at most `max_width` cells, ending in `…` when cut.
///
/// ```
/// use flowboard::ui::helpers::truncate_to_width;
///
/// assert_eq!(truncate_to_width("请假申请", 8), "请假申请");
/// assert_eq!(truncate_to_width("请假申请", 7), "请假申…");
/// ```
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut result = String::new();
    for c in text.chars() {
        let width = c.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        result.push(c);
    }
    result.push(ELLIPSIS);
    result
}

/// Truncates or right-pads `text` to exactly `width` cells.
#[must_use]
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut fitted = truncate_to_width(text, width);
    let used = display_width(&fitted);
    fitted.push_str(&" ".repeat(width.saturating_sub(used)));
    fitted
}

/// Escape sequence restoring the frame's base colors.
///
/// Used instead of a bare reset so the root background survives styled
/// segments.
#[must_use]
pub fn base_style(theme: &Theme) -> String {
    format!(
        "{}{}{}",
        Theme::reset(),
        Theme::fg(&theme.colors.text_normal),
        Theme::bg(&theme.colors.background)
    )
}

/// Writes `text` with the chars in `range` (end exclusive) highlighted, then
/// re-applies `restore` so the surrounding style continues.
pub fn write_highlighted(
    out: &mut String,
    text: &str,
    range: Option<(usize, usize)>,
    theme: &Theme,
    restore: &str,
) {
    let Some((start, end)) = range else {
        out.push_str(text);
        return;
    };

    let chars: Vec<char> = text.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    out.extend(&chars[..start]);
    out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
    out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
    out.extend(&chars[start..end]);
    out.push_str(restore);
    out.extend(&chars[end..]);
}
