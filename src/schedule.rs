//! Deadline selection and calendar filtering for the board views.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::models::Issue;

/// Parse a stored deadline string.
///
/// The backend stores RFC 3339 timestamps, but bare `YYYY-MM-DD` dates also
/// occur; those are taken as midnight UTC.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Pick the issue with the earliest deadline for a dashboard card.
///
/// Ties resolve to the earliest input position (stable sort). Issues whose
/// deadline does not parse order after all parseable ones. Returns `None`
/// for an empty list.
pub fn closest_issue(issues: &[Issue]) -> Option<&Issue> {
    let mut ordered: Vec<&Issue> = issues.iter().collect();
    ordered.sort_by_key(|issue| match parse_deadline(&issue.deadline) {
        Some(dt) => (0u8, dt.timestamp()),
        None => (1u8, 0),
    });
    ordered.first().copied()
}

/// Filter issues to those due on `date` (local-time year/month/day match).
///
/// No selected date means no filtering. Issues whose deadline does not parse
/// never match a selected date.
pub fn issues_due_on(date: Option<NaiveDate>, issues: &[Issue]) -> Vec<&Issue> {
    match date {
        None => issues.iter().collect(),
        Some(day) => issues
            .iter()
            .filter(|issue| {
                parse_deadline(&issue.deadline)
                    .map(|dt| dt.with_timezone(&Local).date_naive() == day)
                    .unwrap_or(false)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str, deadline: &str) -> Issue {
        Issue {
            id: None,
            title: title.to_string(),
            deadline: deadline.to_string(),
            labels: Vec::new(),
            name: None,
            expected_command: Vec::new(),
            expected_materials: Vec::new(),
            expected_products: Vec::new(),
            project_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn parse_deadline_accepts_rfc3339_and_bare_date() {
        assert!(parse_deadline("2025-04-20T10:30:00Z").is_some());
        assert!(parse_deadline("2025-04-20T10:30:00+02:00").is_some());
        assert!(parse_deadline("2025-04-20").is_some());
        assert!(parse_deadline("someday").is_none());
        assert!(parse_deadline("").is_none());
    }

    #[test]
    fn closest_issue_empty_list_is_none() {
        assert!(closest_issue(&[]).is_none());
    }

    #[test]
    fn closest_issue_picks_minimum_deadline() {
        let issues = vec![
            issue("late", "2025-06-01T00:00:00Z"),
            issue("soon", "2025-04-20T00:00:00Z"),
            issue("later", "2025-05-01T00:00:00Z"),
        ];
        assert_eq!(closest_issue(&issues).unwrap().title, "soon");
    }

    #[test]
    fn closest_issue_tie_resolves_to_input_order() {
        let issues = vec![
            issue("first", "2025-04-20T00:00:00Z"),
            issue("second", "2025-04-20T00:00:00Z"),
        ];
        assert_eq!(closest_issue(&issues).unwrap().title, "first");
    }

    #[test]
    fn closest_issue_unparseable_sorts_last() {
        let issues = vec![
            issue("broken", "not-a-date"),
            issue("real", "2030-01-01T00:00:00Z"),
        ];
        assert_eq!(closest_issue(&issues).unwrap().title, "real");
    }

    #[test]
    fn closest_issue_all_unparseable_returns_first() {
        let issues = vec![issue("a", "nope"), issue("b", "also nope")];
        assert_eq!(closest_issue(&issues).unwrap().title, "a");
    }

    #[test]
    fn issues_due_on_no_date_returns_all() {
        let issues = vec![
            issue("a", "2025-04-20T00:00:00Z"),
            issue("b", "not-a-date"),
        ];
        assert_eq!(issues_due_on(None, &issues).len(), 2);
    }

    #[test]
    fn issues_due_on_empty_list_matches_nothing() {
        let day = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        assert!(issues_due_on(Some(day), &[]).is_empty());
    }

    #[test]
    fn issues_due_on_matches_same_local_day() {
        // Noon local time is the same calendar day in every timezone the
        // test may run in, so pin the deadline through Local.
        let day = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        let noon_local = day
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        let issues = vec![
            issue("match", &noon_local.with_timezone(&Utc).to_rfc3339()),
            issue("other-day", "2025-04-25T12:00:00Z"),
            issue("broken", "not-a-date"),
        ];
        let due = issues_due_on(Some(day), &issues);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "match");
    }

    #[test]
    fn issues_due_on_time_of_day_is_ignored() {
        let day = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        let morning = day
            .and_hms_opt(8, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        let evening = day
            .and_hms_opt(21, 30, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        let issues = vec![
            issue("am", &morning.with_timezone(&Utc).to_rfc3339()),
            issue("pm", &evening.with_timezone(&Utc).to_rfc3339()),
        ];
        assert_eq!(issues_due_on(Some(day), &issues).len(), 2);
    }
}
