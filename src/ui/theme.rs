//! Themes, the light/dark controller, and ANSI escape sequence generation.
//!
//! A [`Theme`] is a named color palette loaded from TOML. The
//! [`ThemeController`] owns one theme per [`ThemeMode`] and flips between
//! them; everything the renderer draws reads colors from
//! [`ThemeController::active`], so content rendered after a toggle always
//! comes out in the current mode.
//!
//! # Built-in Themes
//!
//! - `catppuccin-latte`: light (default light-mode theme)
//! - `catppuccin-mocha`: dark (default dark-mode theme)
//! - `catppuccin-frappe`, `catppuccin-macchiato`: dark alternatives
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! background = "#eff1f5"
//! text_normal = "#4c4f69"
//! text_dim = "#6c6f85"
//! header_fg = "#4c4f69"
//! border = "#ccd0da"
//! accent = "#1e66f5"
//! category_fg = "#4c4f69"
//! tag_fg = "#6c6f85"
//! tag_bg = "#ccd0da"
//! tag_active_fg = "#eff1f5"
//! tag_active_bg = "#1e66f5"
//! card_fg = "#4c4f69"
//! card_bg = "#e6e9ef"
//! card_border = "#bcc0cc"
//! icon_fg = "#1e66f5"
//! selection_fg = "#eff1f5"
//! selection_bg = "#7287fd"
//! search_bar_fg = "#4c4f69"
//! search_bar_bg = "#e6e9ef"
//! search_bar_border = "#bcc0cc"
//! search_focus_border = "#1e66f5"
//! match_highlight_fg = "#eff1f5"
//! match_highlight_bg = "#df8e1d"
//! empty_state_fg = "#1e66f5"
//! error_fg = "#d20f39"
//! toggle_icon = "☾"
//! toggle_icon_fg = "#6c6f85"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in theme used for light mode unless configured otherwise.
pub const DEFAULT_LIGHT_THEME: &str = "catppuccin-latte";

/// Built-in theme used for dark mode unless configured otherwise.
pub const DEFAULT_DARK_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Root container background.
    pub background: String,
    /// Root container text.
    pub text_normal: String,
    /// Footer and secondary text.
    pub text_dim: String,

    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Separator lines.
    pub border: String,
    /// Primary color: section markers, focused borders.
    pub accent: String,
    /// Section header text.
    pub category_fg: String,

    pub tag_fg: String,
    pub tag_bg: String,
    pub tag_active_fg: String,
    pub tag_active_bg: String,

    pub card_fg: String,
    pub card_bg: String,
    pub card_border: String,
    pub icon_fg: String,
    /// Selected card foreground.
    pub selection_fg: String,
    /// Selected card background.
    pub selection_bg: String,

    pub search_bar_fg: String,
    pub search_bar_bg: String,
    pub search_bar_border: String,
    /// Search box border while typing.
    pub search_focus_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Loading and no-results message color.
    pub empty_state_fg: String,
    /// Error panel message color.
    pub error_fg: String,

    /// Glyph of the theme toggle shown in the header.
    pub toggle_icon: String,
    pub toggle_icon_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    ///
    /// ```rust
    /// use flowboard::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML does not match
    /// [`ThemeColors`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {e}"))?;

        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse theme TOML: {e}"))
    }

    /// Parses `#rrggbb` into RGB, falling back to white on bad input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color escape sequence (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color escape sequence (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default light theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the unit tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_LIGHT_THEME)
            .expect("Built-in catppuccin-latte theme should always parse")
    }
}

/// Presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Foreground/background pair applied to one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub fg: String,
    pub bg: String,
}

/// Search input styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputStyle {
    pub fg: String,
    pub bg: String,
    pub border: String,
}

/// Theme toggle icon styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleIcon {
    pub glyph: String,
    pub fg: String,
}

/// Every attribute the mode controls, per element kind.
///
/// Produced by [`ThemeController::presentation`]; a pure function of the
/// mode and the two configured themes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub mode: ThemeMode,
    pub root: Surface,
    pub card: Surface,
    pub search_input: InputStyle,
    pub toggle_icon: ToggleIcon,
}

/// Two-state light/dark controller.
///
/// Starts in [`ThemeMode::Light`].
///
/// ```
/// use flowboard::ui::{ThemeController, ThemeMode};
///
/// let mut themes = ThemeController::default();
/// let light = themes.presentation();
///
/// assert_eq!(themes.toggle(), ThemeMode::Dark);
/// assert_ne!(themes.presentation(), light);
///
/// themes.toggle();
/// assert_eq!(themes.presentation(), light);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeController {
    mode: ThemeMode,
    light: Theme,
    dark: Theme,
}

impl ThemeController {
    #[must_use]
    pub const fn new(light: Theme, dark: Theme) -> Self {
        Self {
            mode: ThemeMode::Light,
            light,
            dark,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flips the mode and returns the new one.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = ?self.mode, theme = %self.active().name, "theme toggled");
        self.mode
    }

    /// Switches to `mode`. Returns `false` when it was already active.
    pub fn set_mode(&mut self, mode: ThemeMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Theme of the current mode.
    #[must_use]
    pub const fn active(&self) -> &Theme {
        self.theme_for(self.mode)
    }

    #[must_use]
    pub const fn theme_for(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Presentation attributes of the current mode.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        let colors = &self.active().colors;
        Presentation {
            mode: self.mode,
            root: Surface {
                fg: colors.text_normal.clone(),
                bg: colors.background.clone(),
            },
            card: Surface {
                fg: colors.card_fg.clone(),
                bg: colors.card_bg.clone(),
            },
            search_input: InputStyle {
                fg: colors.search_bar_fg.clone(),
                bg: colors.search_bar_bg.clone(),
                border: colors.search_bar_border.clone(),
            },
            toggle_icon: ToggleIcon {
                glyph: colors.toggle_icon.clone(),
                fg: colors.toggle_icon_fg.clone(),
            },
        }
    }
}

impl Default for ThemeController {
    /// Latte for light mode, Mocha for dark mode.
    ///
    /// # Panics
    ///
    /// Panics if an embedded theme fails to parse, which the unit tests rule out.
    fn default() -> Self {
        let dark = Theme::from_name(DEFAULT_DARK_THEME)
            .expect("Built-in catppuccin-mocha theme should always parse");
        Self::new(Theme::default(), dark)
    }
}
