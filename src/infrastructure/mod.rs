//! Infrastructure layer for sandbox paths and catalog source resolution.

pub mod paths;
pub mod source;

pub use paths::{expand_tilde, get_data_dir, strip_host_prefix};
pub use source::{DataSource, DEFAULT_DATA_SOURCE};
