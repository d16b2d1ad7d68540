//! Domain layer for the Flowboard plugin.
//!
//! Catalog types, the filter engine and icon selection, with no Zellij
//! dependency so everything here is testable on the host.
//!
//! # Organization
//!
//! - [`error`]: Load and plugin error types
//! - [`catalog`]: Category/Flow model and document parsing
//! - [`filter`]: Category selection and text search
//! - [`icons`]: Keyword table for card icons

pub mod catalog;
pub mod error;
pub mod filter;
pub mod icons;

pub use catalog::{flow_count, parse_dataset, unique_category_names, Category, Dataset, Flow};
pub use error::{FlowboardError, LoadError, Result};
pub use filter::{apply_filters, is_no_results, match_range, normalize_query, CategorySelection};
pub use icons::{select_icon, Icon, ICON_RULES};
