//! Category and text filtering over the catalog.
//!
//! Filtering is a pure function of `(dataset, selection, query)`; the
//! application state caches its result and recomputes it whenever the
//! selection or the query changes.
//!
//! # Algorithm
//!
//! 1. A [`CategorySelection::Named`] selection keeps only categories with that
//!    exact name; [`CategorySelection::All`] keeps everything.
//! 2. A non-empty query keeps only flows whose lowercased name contains the
//!    query, then drops categories left without flows.
//! 3. Category and flow order are preserved.
//!
//! Without a query, categories that were already empty pass through; they
//! are skipped at render time instead.

use super::catalog::Category;
use std::fmt;

/// Which category tag is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// No category restriction.
    #[default]
    All,
    /// Only the category with this exact name.
    Named(String),
}

impl CategorySelection {
    /// Returns `true` if `name` passes this selection.
    #[must_use]
    pub fn admits(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(selected) => selected == name,
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Normalizes raw search input: trimmed and lowercased.
///
/// # Examples
///
/// ```
/// use flowboard::domain::normalize_query;
///
/// assert_eq!(normalize_query("  Leave "), "leave");
/// assert_eq!(normalize_query("   "), "");
/// ```
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derives the filtered view.
///
/// `query` must already be normalized (see [`normalize_query`]).
///
/// # Examples
///
/// ```
/// use flowboard::domain::{apply_filters, Category, CategorySelection, Flow};
///
/// let data = vec![Category::new("HR", vec![
///     Flow::new("请假申请", "/a"),
///     Flow::new("报销单", "/b"),
/// ])];
///
/// let view = apply_filters(&data, &CategorySelection::All, "假");
/// assert_eq!(view[0].flows, vec![Flow::new("请假申请", "/a")]);
/// ```
#[must_use]
pub fn apply_filters(dataset: &[Category], selection: &CategorySelection, query: &str) -> Vec<Category> {
    let selected = dataset
        .iter()
        .filter(|category| selection.admits(&category.category_name));

    if query.is_empty() {
        return selected.cloned().collect();
    }

    selected
        .filter_map(|category| {
            let flows: Vec<_> = category
                .flows
                .iter()
                .filter(|flow| flow.name.to_lowercase().contains(query))
                .cloned()
                .collect();

            if flows.is_empty() {
                None
            } else {
                Some(Category {
                    category_name: category.category_name.clone(),
                    flows,
                })
            }
        })
        .collect()
}

/// Returns `true` when a view has nothing to render.
///
/// Holds for an empty view and for a view whose categories are all empty.
/// This is the "no matches" condition, distinct from a load failure.
#[must_use]
pub fn is_no_results(view: &[Category]) -> bool {
    view.iter().all(|category| category.flows.is_empty())
}

/// Character range `(start, end)` of the first case-insensitive occurrence of
/// `query` in `name`, end exclusive.
///
/// Returns `None` for an empty query, for no match, and for names whose
/// lowercase form changes length (the indices would not line up with the
/// displayed text).
#[must_use]
pub fn match_range(name: &str, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }

    let lowered: Vec<char> = name.chars().flat_map(char::to_lowercase).collect();
    if lowered.len() != name.chars().count() {
        return None;
    }

    let needle: Vec<char> = query.chars().collect();
    lowered
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| (start, start + needle.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Flow;

    fn hr_dataset() -> Vec<Category> {
        vec![Category::new(
            "HR",
            vec![Flow::new("请假申请", "/a"), Flow::new("报销单", "/b")],
        )]
    }

    fn mixed_dataset() -> Vec<Category> {
        vec![
            Category::new(
                "HR",
                vec![Flow::new("Leave Request", "/hr/leave"), Flow::new("Onboarding", "/hr/onb")],
            ),
            Category::new("Empty", vec![]),
            Category::new(
                "Finance",
                vec![Flow::new("Expense Claim", "/fin/exp"), Flow::new("Purchase Request", "/fin/po")],
            ),
        ]
    }

    #[test]
    fn all_without_query_returns_dataset_unchanged() {
        let data = mixed_dataset();
        assert_eq!(apply_filters(&data, &CategorySelection::All, ""), data);
    }

    #[test]
    fn named_selection_keeps_only_that_category() {
        let data = mixed_dataset();
        let view = apply_filters(&data, &CategorySelection::Named("Finance".into()), "");
        assert_eq!(view, vec![data[2].clone()]);
    }

    #[test]
    fn unknown_category_yields_no_results() {
        let view = apply_filters(&hr_dataset(), &CategorySelection::Named("Finance".into()), "");
        assert!(view.is_empty());
        assert!(is_no_results(&view));
    }

    #[test]
    fn search_keeps_matching_flows_and_drops_empty_categories() {
        let data = mixed_dataset();
        let view = apply_filters(&data, &CategorySelection::All, "request");

        let names: Vec<_> = view.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["HR", "Finance"]);
        for category in &view {
            assert!(!category.flows.is_empty());
            for flow in &category.flows {
                assert!(flow.name.to_lowercase().contains("request"));
            }
        }
        assert_eq!(view[0].flows, vec![Flow::new("Leave Request", "/hr/leave")]);
    }

    #[test]
    fn search_is_case_insensitive_against_lowercased_query() {
        let view = apply_filters(&mixed_dataset(), &CategorySelection::All, &normalize_query(" EXPENSE "));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].flows[0].url, "/fin/exp");
    }

    #[test]
    fn category_and_search_combine() {
        let data = mixed_dataset();
        let view = apply_filters(&data, &CategorySelection::Named("HR".into()), "purchase");
        assert!(view.is_empty());

        let view = apply_filters(&data, &CategorySelection::Named("Finance".into()), "purchase");
        assert_eq!(view[0].flows, vec![Flow::new("Purchase Request", "/fin/po")]);
    }

    #[test]
    fn filtering_is_repeatable() {
        let data = mixed_dataset();
        let selection = CategorySelection::Named("HR".into());
        assert_eq!(
            apply_filters(&data, &selection, "on"),
            apply_filters(&data, &selection, "on")
        );
    }

    #[test]
    fn chinese_query_matches_leave_application_only() {
        let view = apply_filters(&hr_dataset(), &CategorySelection::All, "假");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].category_name, "HR");
        assert_eq!(view[0].flows, vec![Flow::new("请假申请", "/a")]);
    }

    #[test]
    fn all_empty_categories_count_as_no_results() {
        let data = vec![Category::new("HR", vec![])];
        let view = apply_filters(&data, &CategorySelection::All, "");
        assert_eq!(view, data);
        assert!(is_no_results(&view));
        assert!(!is_no_results(&hr_dataset()));
    }

    #[test]
    fn match_range_uses_character_indices() {
        assert_eq!(match_range("请假申请", "假"), Some((1, 2)));
        assert_eq!(match_range("Leave Request", "request"), Some((6, 13)));
        assert_eq!(match_range("Leave", "x"), None);
        assert_eq!(match_range("Leave", ""), None);
    }

    #[test]
    fn selection_displays_like_tag_keys() {
        assert_eq!(CategorySelection::All.to_string(), "all");
        assert_eq!(CategorySelection::Named("HR".into()).to_string(), "HR");
    }
}
