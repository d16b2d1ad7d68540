//! Keyword-driven card icons.
//!
//! Icons are chosen from the flow name alone, never from the category, by
//! walking [`ICON_RULES`] in priority order. The first keyword contained in
//! the lowercased name wins; names matching nothing get [`Icon::Document`].

/// Card icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    CalendarCheck,
    ShoppingCart,
    Stamp,
    CreditCard,
    Plane,
    Users,
    Car,
    User,
    FileText,
    /// Fallback when no keyword matches.
    Document,
}

impl Icon {
    /// Stable identifier, also used in theme-independent snapshots.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CalendarCheck => "calendar-check",
            Self::ShoppingCart => "shopping-cart",
            Self::Stamp => "stamp",
            Self::CreditCard => "credit-card",
            Self::Plane => "plane",
            Self::Users => "users",
            Self::Car => "car",
            Self::User => "user",
            Self::FileText => "file-text",
            Self::Document => "document",
        }
    }

    /// Terminal glyph drawn on the card.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::CalendarCheck => "📅",
            Self::ShoppingCart => "🛒",
            Self::Stamp => "🔖",
            Self::CreditCard => "💳",
            Self::Plane => "🧳",
            Self::Users => "👥",
            Self::Car => "🚗",
            Self::User => "👤",
            Self::FileText => "📑",
            Self::Document => "📄",
        }
    }
}

/// Ordered `(keyword, icon)` rules; earlier rules take precedence.
pub const ICON_RULES: &[(&str, Icon)] = &[
    ("请假", Icon::CalendarCheck),
    ("采购", Icon::ShoppingCart),
    ("用印", Icon::Stamp),
    ("报销", Icon::CreditCard),
    ("出差", Icon::Plane),
    ("会议", Icon::Users),
    ("用车", Icon::Car),
    ("人事", Icon::User),
    ("合同", Icon::FileText),
];

/// Picks the icon for a flow name.
///
/// # Examples
///
/// ```
/// use flowboard::domain::{select_icon, Icon};
///
/// assert_eq!(select_icon("请假申请"), Icon::CalendarCheck);
/// assert_eq!(select_icon("Quarterly report"), Icon::Document);
/// ```
#[must_use]
pub fn select_icon(flow_name: &str) -> Icon {
    let lowered = flow_name.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(Icon::Document, |&(_, icon)| icon)
}
