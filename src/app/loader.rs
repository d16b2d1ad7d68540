//! Load attempt bookkeeping and response decoding.
//!
//! Loads are identified by a ticket. At most one load is in flight: asking
//! for another while one is pending is refused, and any response carrying a
//! ticket other than the in-flight one is stale and dropped.

use crate::app::Action;
use crate::domain::{parse_dataset, Dataset, LoadError};
use crate::infrastructure::DataSource;
use crate::worker::WorkerMessage;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Issues tickets and remembers which one is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadTracker {
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl LoadTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_ticket: 1,
            in_flight: None,
        }
    }

    /// Starts a load. Returns `None` while another load is still pending.
    pub fn begin(&mut self) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        let ticket = self.next_ticket.max(1);
        self.next_ticket = ticket + 1;
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Ends the load identified by `ticket`. Returns `false` for stale tickets,
    /// which leave the tracker untouched.
    pub fn finish(&mut self, ticket: u64) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }
}

/// Side effect that performs the load for `source`.
#[must_use]
pub fn request_for(source: &DataSource, ticket: u64) -> Action {
    match source {
        DataSource::Remote(url) => Action::FetchRemote {
            url: url.clone(),
            ticket,
        },
        DataSource::File(path) => Action::PostToWorker(WorkerMessage::load_dataset(
            path.to_string_lossy().to_string(),
            ticket,
        )),
    }
}

/// Turns an HTTP response into a dataset.
///
/// Status 0 means the host never got a response; any other status outside
/// `200..300` is an HTTP error. Success bodies must parse as a catalog.
///
/// # Errors
///
/// See [`LoadError`].
pub fn decode_response(status: u16, body: &[u8]) -> Result<Dataset, LoadError> {
    match status {
        0 => Err(LoadError::Transport(
            String::from_utf8_lossy(body).trim().to_string(),
        )),
        200..=299 => parse_dataset(body),
        _ => Err(LoadError::Http { status }),
    }
}

/// Human-readable age of the last successful load.
///
/// - under a minute: "just now"
/// - under an hour: "Xm ago"
/// - under a day: "Xh ago"
/// - otherwise: "Xd ago"
#[must_use]
pub fn describe_age(loaded_at: chrono::DateTime<chrono::Utc>, now: chrono::DateTime<chrono::Utc>) -> String {
    let diff = (now - loaded_at).num_seconds();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use std::path::PathBuf;

    #[test]
    fn second_begin_is_refused_while_in_flight() {
        let mut tracker = LoadTracker::new();
        let first = tracker.begin().unwrap();
        assert_eq!(tracker.begin(), None);
        assert!(tracker.finish(first));
        let second = tracker.begin().unwrap();
        assert!(second > first);
    }

    #[test]
    fn stale_tickets_do_not_finish_the_current_load() {
        let mut tracker = LoadTracker::default();
        let first = tracker.begin().unwrap();
        assert!(tracker.finish(first));
        let second = tracker.begin().unwrap();

        assert!(!tracker.finish(first));
        assert_eq!(tracker.in_flight(), Some(second));
        assert!(tracker.finish(second));
        assert_eq!(tracker.in_flight(), None);
    }

    #[test]
    fn remote_sources_fetch_and_files_go_to_the_worker() {
        let action = request_for(&DataSource::Remote("https://x/f.json".into()), 7);
        assert_eq!(
            action,
            Action::FetchRemote {
                url: "https://x/f.json".into(),
                ticket: 7
            }
        );

        let action = request_for(&DataSource::File(PathBuf::from("/host/f.json")), 8);
        match action {
            Action::PostToWorker(WorkerMessage::LoadDataset { path, ticket, .. }) => {
                assert_eq!(path, "/host/f.json");
                assert_eq!(ticket, 8);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn non_success_status_is_http_error() {
        assert_eq!(decode_response(404, b"not found"), Err(LoadError::Http { status: 404 }));
        assert_eq!(decode_response(500, b"[]"), Err(LoadError::Http { status: 500 }));
        assert_eq!(decode_response(301, b""), Err(LoadError::Http { status: 301 }));
    }

    #[test]
    fn status_zero_is_transport_failure() {
        assert_eq!(
            decode_response(0, b"connection refused\n"),
            Err(LoadError::Transport("connection refused".into()))
        );
    }

    #[test]
    fn success_body_must_be_a_catalog() {
        let data = decode_response(200, br#"[{"categoryName":"HR","flows":[]}]"#).unwrap();
        assert_eq!(data.len(), 1);
        assert!(matches!(decode_response(200, b"oops"), Err(LoadError::Malformed(_))));
    }

    #[test]
    fn ages_are_bucketed() {
        let loaded = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(describe_age(loaded, loaded + Duration::seconds(30)), "just now");
        assert_eq!(describe_age(loaded, loaded + Duration::minutes(5)), "5m ago");
        assert_eq!(describe_age(loaded, loaded + Duration::hours(3)), "3h ago");
        assert_eq!(describe_age(loaded, loaded + Duration::days(2)), "2d ago");
    }
}
