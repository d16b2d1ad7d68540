//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is visible under `/host`, which is
//! the working directory of the focused terminal (or where Zellij started).

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
pub const HOST_ROOT: &str = "/host";

/// Returns the directory Flowboard writes its trace files to.
///
/// Resolves to `/host/.local/share/zellij/flowboard`, i.e.
/// `~/.local/share/zellij/flowboard` when Zellij runs from the home directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("flowboard")
}

/// Expands a leading `~` to the sandbox host root.
///
/// ```
/// use flowboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/flows.json"), "/host/flows.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/flows.json"), "/tmp/flows.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Removes the `/host` prefix so paths read as they do on the host.
///
/// ```
/// use flowboard::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/weaver-flows.json"), "/weaver-flows.json");
/// assert_eq!(strip_host_prefix("/tmp/a.json"), "/tmp/a.json");
/// assert_eq!(strip_host_prefix("/hostile/a.json"), "/hostile/a.json");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix(HOST_ROOT) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_lives_under_host_share() {
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/host/.local/share/zellij/flowboard")
        );
    }

    #[test]
    fn tilde_only_expands_at_the_start() {
        assert_eq!(expand_tilde("data/~/x.json"), "data/~/x.json");
        assert_eq!(expand_tilde("~user/x.json"), "~user/x.json");
    }

    #[test]
    fn host_prefix_round_trips_with_expansion() {
        assert_eq!(strip_host_prefix(&expand_tilde("~/flows.json")), "/flows.json");
    }
}
