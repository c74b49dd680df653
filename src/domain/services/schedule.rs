use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// A proposed session before it gains an identity. All times are UTC;
/// comparisons happen at minute granularity.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionDraft {
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub max_attendees: i32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Session '{title}' lies outside the event dates")]
    OutOfRange { title: String },
    #[error("Session '{title}' must start before it ends")]
    InvalidInterval { title: String },
    #[error("Sessions '{first}' and '{second}' overlap in time")]
    TimeConflict { first: String, second: String },
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        let msg = err.to_string();
        match err {
            ScheduleError::OutOfRange { .. } => AppError::OutOfRange(msg),
            ScheduleError::InvalidInterval { .. } => AppError::InvalidInterval(msg),
            ScheduleError::TimeConflict { .. } => AppError::TimeConflict(msg),
        }
    }
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Inclusive containment on minute-truncated instants.
pub fn within_range(instant: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    let instant = truncate_to_minute(instant);
    let start = truncate_to_minute(start);
    let end = truncate_to_minute(end);
    start <= instant && instant <= end
}

/// Boundary-inclusive overlap: a shared instant counts, touching endpoints
/// (a_end == b_start) do not.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    (a_start <= b_start && a_end > b_start)
        || (a_start < b_end && a_end >= b_end)
        || (b_start <= a_start && b_end > a_start)
        || (b_start < a_end && b_end >= a_end)
}

/// Validates a candidate session list against the event envelope and
/// returns the normalized list: minute-truncated times, locations defaulted
/// to the event's. Pure; the caller persists all or nothing.
pub fn validate_sessions(
    event_start: DateTime<Utc>,
    event_end: DateTime<Utc>,
    event_location: &str,
    drafts: Vec<SessionDraft>,
) -> Result<Vec<SessionDraft>, ScheduleError> {
    let range_start = truncate_to_minute(event_start);
    let range_end = truncate_to_minute(event_end);

    let mut normalized = Vec::with_capacity(drafts.len());

    for mut draft in drafts {
        draft.start_time = truncate_to_minute(draft.start_time);
        draft.end_time = truncate_to_minute(draft.end_time);

        if draft.start_time >= draft.end_time {
            return Err(ScheduleError::InvalidInterval { title: draft.title });
        }

        if !within_range(draft.start_time, range_start, range_end)
            || !within_range(draft.end_time, range_start, range_end)
        {
            return Err(ScheduleError::OutOfRange { title: draft.title });
        }

        if draft.location.is_none() {
            draft.location = Some(event_location.to_string());
        }

        normalized.push(draft);
    }

    for i in 0..normalized.len() {
        for j in (i + 1)..normalized.len() {
            let (a, b) = (&normalized[i], &normalized[j]);
            if overlaps(a.start_time, a.end_time, b.start_time, b.end_time) {
                return Err(ScheduleError::TimeConflict {
                    first: a.title.clone(),
                    second: b.title.clone(),
                });
            }
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, day, hour, min, 0).unwrap()
    }

    fn draft(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> SessionDraft {
        SessionDraft {
            title: title.to_string(),
            description: String::new(),
            start_time: start,
            end_time: end,
            location: None,
            max_attendees: 0,
        }
    }

    #[test]
    fn within_range_includes_both_endpoints() {
        let start = at(18, 0, 0);
        let end = at(20, 23, 59);

        assert!(within_range(start, start, end));
        assert!(within_range(end, start, end));
        assert!(within_range(at(19, 12, 0), start, end));
        assert!(!within_range(at(21, 0, 0), start, end));
        assert!(!within_range(at(17, 23, 59), start, end));
    }

    #[test]
    fn within_range_ignores_seconds() {
        let start = at(18, 0, 0);
        let end = at(18, 10, 0);
        let just_past = end + chrono::Duration::seconds(30);

        assert!(within_range(just_past, start, end));
    }

    #[test]
    fn overlap_is_boundary_inclusive_for_shared_instants() {
        // [09:00, 10:30) vs [10:00, 11:00): shared [10:00, 10:30)
        assert!(overlaps(at(18, 9, 0), at(18, 10, 30), at(18, 10, 0), at(18, 11, 0)));
        // containment
        assert!(overlaps(at(18, 9, 0), at(18, 12, 0), at(18, 10, 0), at(18, 11, 0)));
        // identical windows
        assert!(overlaps(at(18, 9, 0), at(18, 10, 0), at(18, 9, 0), at(18, 10, 0)));
        // symmetric in either argument order
        assert!(overlaps(at(18, 10, 0), at(18, 11, 0), at(18, 9, 0), at(18, 10, 30)));
    }

    #[test]
    fn back_to_back_sessions_do_not_overlap() {
        assert!(!overlaps(at(18, 9, 0), at(18, 10, 0), at(18, 10, 0), at(18, 11, 0)));
        assert!(!overlaps(at(18, 10, 0), at(18, 11, 0), at(18, 9, 0), at(18, 10, 0)));
        assert!(!overlaps(at(18, 9, 0), at(18, 10, 0), at(18, 14, 0), at(18, 15, 0)));
    }

    #[test]
    fn accepts_session_inside_event_range() {
        let result = validate_sessions(
            at(18, 0, 0),
            at(20, 23, 59),
            "Main Hall",
            vec![draft("Opening", at(18, 9, 0), at(18, 10, 30))],
        );

        let sessions = result.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].location.as_deref(), Some("Main Hall"));
    }

    #[test]
    fn rejects_session_outside_event_range() {
        let result = validate_sessions(
            at(18, 0, 0),
            at(20, 23, 59),
            "Main Hall",
            vec![draft("Late", at(21, 9, 0), at(21, 10, 30))],
        );

        assert_eq!(result.unwrap_err(), ScheduleError::OutOfRange { title: "Late".into() });
    }

    #[test]
    fn rejects_inverted_and_empty_intervals() {
        let err = validate_sessions(
            at(18, 0, 0),
            at(20, 23, 59),
            "Main Hall",
            vec![draft("Backwards", at(18, 11, 0), at(18, 10, 0))],
        )
        .unwrap_err();
        assert_eq!(err, ScheduleError::InvalidInterval { title: "Backwards".into() });

        let err = validate_sessions(
            at(18, 0, 0),
            at(20, 23, 59),
            "Main Hall",
            vec![draft("Empty", at(18, 10, 0), at(18, 10, 0))],
        )
        .unwrap_err();
        assert_eq!(err, ScheduleError::InvalidInterval { title: "Empty".into() });
    }

    #[test]
    fn rejects_overlapping_pair_and_names_it() {
        let err = validate_sessions(
            at(18, 0, 0),
            at(20, 23, 59),
            "Main Hall",
            vec![
                draft("Morning", at(18, 9, 0), at(18, 10, 30)),
                draft("Brunch", at(18, 10, 0), at(18, 11, 0)),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ScheduleError::TimeConflict { first: "Morning".into(), second: "Brunch".into() }
        );
    }

    #[test]
    fn normalizes_seconds_before_comparing() {
        let start = at(18, 9, 0) + chrono::Duration::seconds(45);
        let end = at(18, 10, 0) + chrono::Duration::seconds(10);

        let sessions = validate_sessions(
            at(18, 0, 0),
            at(20, 23, 59),
            "Main Hall",
            vec![draft("Talk", start, end)],
        )
        .unwrap();

        assert_eq!(sessions[0].start_time, at(18, 9, 0));
        assert_eq!(sessions[0].end_time, at(18, 10, 0));
    }

    #[test]
    fn validation_is_idempotent() {
        let drafts = vec![
            draft("A", at(18, 9, 0), at(18, 10, 0)),
            draft("B", at(18, 10, 0), at(18, 11, 0)),
        ];

        let first = validate_sessions(at(18, 0, 0), at(20, 23, 59), "Hall", drafts.clone()).unwrap();
        let second = validate_sessions(at(18, 0, 0), at(20, 23, 59), "Hall", first.clone()).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.start_time, b.start_time);
            assert_eq!(a.end_time, b.end_time);
            assert_eq!(a.location, b.location);
        }
    }

    #[test]
    fn keeps_explicit_session_location() {
        let mut d = draft("Breakout", at(18, 9, 0), at(18, 10, 0));
        d.location = Some("Room 204".to_string());

        let sessions =
            validate_sessions(at(18, 0, 0), at(20, 23, 59), "Main Hall", vec![d]).unwrap();
        assert_eq!(sessions[0].location.as_deref(), Some("Room 204"));
    }
}
