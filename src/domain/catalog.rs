//! Workflow catalog model: categories of named, linkable flows.
//!
//! The catalog document is a JSON array in which every element names a
//! category and lists its flows:
//!
//! ```json
//! [
//!   { "categoryName": "HR", "flows": [ { "name": "请假申请", "url": "/a" } ] }
//! ]
//! ```
//!
//! Parsing is strict about shape: a missing field or a wrong JSON type is a
//! [`LoadError::Malformed`], never a panic further down the pipeline.

use super::error::LoadError;
use serde::{Deserialize, Serialize};

/// A single navigable workflow entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    /// Display name, also the text searched by the filter engine.
    pub name: String,
    /// Link target opened when the card is activated. Not validated.
    pub url: String,
}

impl Flow {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A named group of flows, rendered as one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_name: String,
    pub flows: Vec<Flow>,
}

impl Category {
    #[must_use]
    pub fn new(category_name: impl Into<String>, flows: Vec<Flow>) -> Self {
        Self {
            category_name: category_name.into(),
            flows,
        }
    }
}

/// The full, ordered catalog as loaded. Replaced wholesale on reload.
pub type Dataset = Vec<Category>;

/// Parses a catalog document.
///
/// # Errors
///
/// Returns [`LoadError::Malformed`] when the bytes are not UTF-8 JSON, the
/// top-level value is not an array, or any category or flow lacks one of its
/// fields.
///
/// # Examples
///
/// ```
/// use flowboard::domain::parse_dataset;
///
/// let data = parse_dataset(br#"[{"categoryName":"HR","flows":[]}]"#).unwrap();
/// assert_eq!(data[0].category_name, "HR");
///
/// assert!(parse_dataset(br#"[{"categoryName":"HR"}]"#).is_err());
/// ```
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, LoadError> {
    serde_json::from_slice::<Dataset>(bytes).map_err(|e| LoadError::Malformed(e.to_string()))
}

/// Category names in first-occurrence order, without duplicates.
///
/// These become the category tags after the implicit "All" tag.
#[must_use]
pub fn unique_category_names(dataset: &[Category]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(dataset.len());
    for category in dataset {
        if !names.iter().any(|n| n == &category.category_name) {
            names.push(category.category_name.clone());
        }
    }
    names
}

/// Total number of flows across all categories.
#[must_use]
pub fn flow_count(categories: &[Category]) -> usize {
    categories.iter().map(|c| c.flows.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_document() {
        let json = r#"[
            {"categoryName": "HR", "flows": [
                {"name": "请假申请", "url": "/a"},
                {"name": "报销单", "url": "/b"}
            ]},
            {"categoryName": "Finance", "flows": []}
        ]"#;

        let data = parse_dataset(json.as_bytes()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].flows[1], Flow::new("报销单", "/b"));
        assert!(data[1].flows.is_empty());
    }

    #[test]
    fn missing_fields_are_malformed() {
        for doc in [
            r#"[{"flows": []}]"#,
            r#"[{"categoryName": "HR"}]"#,
            r#"[{"categoryName": "HR", "flows": [{"name": "x"}]}]"#,
            r#"[{"categoryName": "HR", "flows": [{"url": "/x"}]}]"#,
        ] {
            let err = parse_dataset(doc.as_bytes()).unwrap_err();
            assert!(matches!(err, LoadError::Malformed(_)), "{doc}");
        }
    }

    #[test]
    fn wrong_top_level_shape_is_malformed() {
        assert!(matches!(
            parse_dataset(br#"{"categoryName": "HR", "flows": []}"#),
            Err(LoadError::Malformed(_))
        ));
        assert!(matches!(parse_dataset(b"<html>"), Err(LoadError::Malformed(_))));
        assert!(matches!(parse_dataset(b""), Err(LoadError::Malformed(_))));
    }

    #[test]
    fn unique_names_keep_first_occurrence_order() {
        let data = vec![
            Category::new("HR", vec![]),
            Category::new("Finance", vec![]),
            Category::new("HR", vec![Flow::new("a", "/a")]),
            Category::new("IT", vec![]),
        ];
        assert_eq!(unique_category_names(&data), vec!["HR", "Finance", "IT"]);
        assert!(unique_category_names(&[]).is_empty());
    }

    #[test]
    fn counts_flows_across_categories() {
        let data = vec![
            Category::new("HR", vec![Flow::new("a", "/a"), Flow::new("b", "/b")]),
            Category::new("IT", vec![Flow::new("c", "/c")]),
        ];
        assert_eq!(flow_count(&data), 3);
    }
}
