//! Top-level rendering coordinator.
//!
//! Rendering is two steps: `AppState::compute_viewmodel` derives a
//! [`UIViewModel`], then [`render_frame`] turns it into one ANSI string.
//! Each frame repaints every row, so nothing from the previous frame
//! survives.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::{base_style, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    print!("{}", render_frame(&viewmodel, state.themes.active(), rows, cols));
}

/// Builds the complete frame for `vm` in `theme`.
#[must_use]
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render_frame", rows, cols, theme = %theme.name).entered();

    let mut out = String::new();
    let blank = " ".repeat(cols);
    out.push_str(&base_style(theme));
    for row in 1..=rows {
        position_cursor(&mut out, row, 1);
        out.push_str(&blank);
    }

    components::render_layout(&mut out, vm, theme, rows, cols);
    out.push_str(Theme::reset());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event};
    use crate::domain::{Category, Flow};
    use crate::infrastructure::DataSource;
    use crate::ui::ThemeController;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DataSource::default(), ThemeController::default(), "Workflows");
        let ticket = state.begin_load().unwrap();
        state.complete_load(
            ticket,
            Ok(vec![Category::new(
                "行政",
                vec![Flow::new("请假申请", "https://oa/leave"), Flow::new("合同审批", "https://oa/contract")],
            )]),
        );
        state
    }

    fn frame(state: &AppState) -> String {
        render_frame(&state.compute_viewmodel(24, 80), state.themes.active(), 24, 80)
    }

    #[test]
    fn frame_is_idempotent() {
        let state = loaded_state();
        assert_eq!(frame(&state), frame(&state));
    }

    #[test]
    fn content_frame_shows_sections_and_icons() {
        let out = frame(&loaded_state());
        assert!(out.contains("行政"));
        assert!(out.contains("📅"));
        assert!(out.contains("📑"));
        assert!(out.contains("Workflows (2)"));
    }

    #[test]
    fn every_row_is_painted_with_the_root_background() {
        let state = loaded_state();
        let out = frame(&state);
        assert!(out.starts_with(&base_style(state.themes.active())));
        assert!(out.contains("\u{1b}[24;1H"));
    }

    #[test]
    fn toggled_theme_repaints_cards_in_dark_colors() {
        let mut state = loaded_state();
        let light_card = Theme::bg(&state.themes.active().colors.card_bg);
        handle_event(&mut state, &Event::ToggleTheme).unwrap();

        let dark_card = Theme::bg(&state.themes.active().colors.card_bg);
        let out = frame(&state);
        assert_ne!(light_card, dark_card);
        assert!(out.contains(&dark_card));
        assert!(!out.contains(&light_card));
    }

    #[test]
    fn toggling_twice_renders_the_identical_frame() {
        let mut state = loaded_state();
        let before = frame(&state);

        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_ne!(frame(&state), before);
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(frame(&state), before);
    }

    #[test]
    fn frame_carries_the_presentation_of_each_mode() {
        let mut state = loaded_state();
        for _ in 0..2 {
            let presentation = state.themes.presentation();
            let out = frame(&state);

            assert!(out.contains(&Theme::bg(&presentation.root.bg)));
            assert!(out.contains(&Theme::fg(&presentation.root.fg)));
            assert!(out.contains(&format!(
                "{}{}",
                Theme::fg(&presentation.card.fg),
                Theme::bg(&presentation.card.bg)
            )));
            assert!(out.contains(&Theme::fg(&presentation.search_input.border)));
            assert!(out.contains(&Theme::bg(&presentation.search_input.bg)));
            assert!(out.contains(&format!(
                "{} {} ",
                Theme::fg(&presentation.toggle_icon.fg),
                presentation.toggle_icon.glyph
            )));

            handle_event(&mut state, &Event::ToggleTheme).unwrap();
        }
    }

    #[test]
    fn cards_never_spill_into_the_footer() {
        let state = loaded_state();
        let out = render_frame(&state.compute_viewmodel(9, 80), state.themes.active(), 9, 80);
        assert!(out.contains("Workflows (2)"));
        assert!(!out.contains("请假申请"));
        assert!(!out.contains("\u{1b}[10;"));
    }

    #[test]
    fn tiny_frames_do_not_panic() {
        let state = loaded_state();
        let vm = state.compute_viewmodel(2, 3);
        let _ = render_frame(&vm, state.themes.active(), 2, 3);
        let vm = state.compute_viewmodel(0, 0);
        let _ = render_frame(&vm, state.themes.active(), 0, 0);
    }
}
