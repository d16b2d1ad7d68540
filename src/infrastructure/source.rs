//! Resolution of the configured catalog location.
//!
//! A `data_source` value is either fetched over HTTP through the host, or read
//! from the sandboxed filesystem by the background worker.

use super::paths::{expand_tilde, strip_host_prefix, HOST_ROOT};
use std::fmt;
use std::path::PathBuf;

/// Default catalog location, relative to the host working directory.
pub const DEFAULT_DATA_SOURCE: &str = "weaver-flows.json";

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// `http://` or `https://` URL, fetched with a GET request.
    Remote(String),
    /// Sandbox path read by the worker thread.
    File(PathBuf),
}

impl DataSource {
    /// Classifies a configured value.
    ///
    /// URLs are kept verbatim. `~` expands to the host root, relative paths
    /// resolve under it, and absolute paths are used as given. Blank values
    /// fall back to [`DEFAULT_DATA_SOURCE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flowboard::infrastructure::DataSource;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(
    ///     DataSource::parse("https://intranet/flows.json"),
    ///     DataSource::Remote("https://intranet/flows.json".into())
    /// );
    /// assert_eq!(
    ///     DataSource::parse("weaver-flows.json"),
    ///     DataSource::File(PathBuf::from("/host/weaver-flows.json"))
    /// );
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = if raw.is_empty() { DEFAULT_DATA_SOURCE } else { raw };

        let lowered = raw.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            return Self::Remote(raw.to_string());
        }

        let expanded = expand_tilde(raw);
        if expanded.starts_with('/') {
            Self::File(PathBuf::from(expanded))
        } else {
            let relative = expanded.trim_start_matches("./");
            Self::File(PathBuf::from(HOST_ROOT).join(relative))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::parse(DEFAULT_DATA_SOURCE)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::File(path) => f.write_str(&strip_host_prefix(&path.to_string_lossy())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_remote_regardless_of_scheme_case() {
        assert_eq!(
            DataSource::parse("HTTP://example.com/f.json"),
            DataSource::Remote("HTTP://example.com/f.json".into())
        );
        assert_eq!(
            DataSource::parse(" https://example.com/f.json "),
            DataSource::Remote("https://example.com/f.json".into())
        );
    }

    #[test]
    fn paths_resolve_inside_the_sandbox() {
        assert_eq!(
            DataSource::parse("~/data/flows.json"),
            DataSource::File(PathBuf::from("/host/data/flows.json"))
        );
        assert_eq!(
            DataSource::parse("./flows.json"),
            DataSource::File(PathBuf::from("/host/flows.json"))
        );
        assert_eq!(
            DataSource::parse("/tmp/flows.json"),
            DataSource::File(PathBuf::from("/tmp/flows.json"))
        );
    }

    #[test]
    fn blank_value_uses_default_document() {
        assert_eq!(DataSource::parse("  "), DataSource::default());
        assert_eq!(
            DataSource::default(),
            DataSource::File(PathBuf::from("/host/weaver-flows.json"))
        );
    }

    #[test]
    fn display_hides_sandbox_prefix() {
        assert_eq!(DataSource::default().to_string(), "/weaver-flows.json");
        assert_eq!(
            DataSource::parse("https://x/y.json").to_string(),
            "https://x/y.json"
        );
    }

    #[test]
    fn display_keeps_paths_that_only_resemble_the_sandbox_root() {
        assert_eq!(DataSource::parse("/hostile/flows.json").to_string(), "/hostile/flows.json");
        assert_eq!(DataSource::parse("/host").to_string(), "/");
    }
}
