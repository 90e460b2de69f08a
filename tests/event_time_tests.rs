mod common;

use chrono::{FixedOffset, NaiveTime, TimeDelta, TimeZone, Timelike};
use common::{event, utc};
use rfellowship::core::event_time::{
    countdown, next_upcoming, parse_date_label, parse_time_label, resolve,
};
use rfellowship::models::countdown::Countdown;
use std::collections::HashSet;

fn ids(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_label_parsing_variants() {
    assert_eq!(parse_date_label("Oct 15"), Some((10, 15)));
    assert_eq!(parse_date_label("October 15"), Some((10, 15)));
    assert_eq!(parse_date_label("oct 15th"), Some((10, 15)));
    assert_eq!(parse_date_label("Feb 29"), Some((2, 29)));
    assert_eq!(parse_date_label("Smarch 40"), None);
    assert_eq!(parse_date_label("Feb 30"), None);
    assert_eq!(parse_date_label("TBD"), None);

    let ten = NaiveTime::from_hms_opt(10, 0, 0);
    let seven_pm = NaiveTime::from_hms_opt(19, 0, 0);
    assert_eq!(parse_time_label("10:00 AM"), ten);
    assert_eq!(parse_time_label("7:00 PM"), seven_pm);
    assert_eq!(parse_time_label("7pm"), seven_pm);
    assert_eq!(parse_time_label("19:00"), seven_pm);
    assert_eq!(parse_time_label("12:30 AM"), NaiveTime::from_hms_opt(0, 30, 0));
    assert_eq!(parse_time_label("25:00 PM"), None);
    assert_eq!(parse_time_label("noonish"), None);
}

#[test]
fn test_resolves_in_current_year_when_still_ahead() {
    let now = utc(2025, 10, 1, 9, 0, 0);
    let got = resolve("Oct 15", "10:00 AM", &now).unwrap();
    assert_eq!(got, utc(2025, 10, 15, 10, 0, 0));
}

#[test]
fn test_rolls_over_to_next_year_once_passed() {
    let now = utc(2025, 10, 16, 0, 0, 0);
    let got = resolve("Oct 15", "10:00 AM", &now).unwrap();
    assert_eq!(got, utc(2026, 10, 15, 10, 0, 0));
}

#[test]
fn test_rollover_happens_at_most_once() {
    let now = utc(2025, 12, 31, 23, 59, 0);
    let got = resolve("Oct 15", "10:00 AM", &now).unwrap();
    assert_eq!(got, utc(2026, 10, 15, 10, 0, 0));
}

#[test]
fn test_exact_start_is_not_rolled_over() {
    let now = utc(2025, 10, 15, 10, 0, 0);
    let got = resolve("Oct 15", "10:00 AM", &now).unwrap();
    assert_eq!(got, now);
    // ...but it no longer counts down
    assert!(countdown(&got, &now).is_none());
}

#[test]
fn test_result_is_never_before_now() {
    let start = utc(2025, 1, 1, 0, 0, 0);
    for step in 0..60 {
        let now = start + TimeDelta::days(step * 7);
        let got = resolve("Oct 15", "10:00 AM", &now).unwrap();
        assert!(got >= now);
        assert!(got - now <= TimeDelta::days(366));
    }
}

#[test]
fn test_leap_day_moves_to_next_year_when_it_exists() {
    let now = utc(2027, 3, 1, 0, 0, 0);
    let got = resolve("Feb 29", "9:00 AM", &now).unwrap();
    assert_eq!(got, utc(2028, 2, 29, 9, 0, 0));

    // neither this year nor next has one
    let now = utc(2025, 3, 1, 0, 0, 0);
    assert!(resolve("Feb 29", "9:00 AM", &now).is_none());
}

#[test]
fn test_unparsable_labels_resolve_to_none() {
    let now = utc(2025, 10, 1, 9, 0, 0);
    assert!(resolve("Smarch 40", "10:00 AM", &now).is_none());
    assert!(resolve("Oct 15", "whenever", &now).is_none());
}

#[test]
fn test_wall_clock_is_kept_in_the_caller_zone() {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
    let got = resolve("Oct 20", "7:00 PM", &now).unwrap();
    assert_eq!(got.hour(), 19);
    assert_eq!(got.offset(), &tz);
    assert_eq!(got, utc(2025, 10, 20, 17, 0, 0));
}

#[test]
fn test_countdown_breakdown() {
    let now = utc(2025, 10, 1, 9, 0, 0);
    let target = now
        + TimeDelta::days(1)
        + TimeDelta::hours(2)
        + TimeDelta::minutes(3)
        + TimeDelta::seconds(4);

    let c = countdown(&target, &now).unwrap();
    assert_eq!(
        c,
        Countdown {
            days: 1,
            hours: 2,
            minutes: 3,
            seconds: 4
        }
    );
    assert_eq!(c.compact(), "01d 02h 03m 04s");
}

#[test]
fn test_countdown_absent_when_started() {
    let now = utc(2025, 10, 1, 9, 0, 0);
    assert!(countdown(&now, &now).is_none());
    assert!(countdown(&(now - TimeDelta::seconds(5)), &now).is_none());
    assert!(Countdown::from_millis(0).is_none());
    assert!(Countdown::from_millis(-1).is_none());
}

#[test]
fn test_sub_second_remainder_truncates() {
    let c = Countdown::from_millis(999).unwrap();
    assert_eq!((c.days, c.hours, c.minutes, c.seconds), (0, 0, 0, 0));
}

#[test]
fn test_next_upcoming_needs_a_selection() {
    let now = utc(2025, 10, 1, 9, 0, 0);
    let events = vec![event("e1", "Oct 15", "10:00 AM")];
    assert!(next_upcoming(&events, &HashSet::new(), &now).is_none());
    assert!(next_upcoming(&events, &ids(&["other"]), &now).is_none());
}

#[test]
fn test_next_upcoming_picks_earliest_selected() {
    let now = utc(2025, 10, 1, 9, 0, 0);
    let events = vec![
        event("late", "Oct 20", "7:00 PM"),
        event("skipped", "Oct 2", "8:00 AM"),
        event("early", "Oct 15", "10:00 AM"),
    ];

    let next = next_upcoming(&events, &ids(&["late", "early"]), &now).unwrap();
    assert_eq!(next.event.id, "early");
    assert_eq!(next.starts_at, utc(2025, 10, 15, 10, 0, 0));
    assert!(next.countdown(&now).is_some());
}

#[test]
fn test_next_upcoming_considers_rolled_over_events() {
    // e1 already happened this year, so the October 20 event comes first
    let now = utc(2025, 10, 16, 0, 0, 0);
    let events = vec![
        event("e1", "Oct 15", "10:00 AM"),
        event("e2", "Oct 20", "7:00 PM"),
    ];
    let next = next_upcoming(&events, &ids(&["e1", "e2"]), &now).unwrap();
    assert_eq!(next.event.id, "e2");
}

#[test]
fn test_next_upcoming_skips_unresolvable_and_breaks_ties_by_order() {
    let now = utc(2025, 10, 1, 9, 0, 0);
    let events = vec![
        event("bad", "Someday", "10:00 AM"),
        event("first", "Oct 15", "10:00 AM"),
        event("second", "October 15", "10:00 am"),
    ];
    let next = next_upcoming(&events, &ids(&["bad", "first", "second"]), &now).unwrap();
    assert_eq!(next.event.id, "first");

    let only_bad = next_upcoming(&events, &ids(&["bad"]), &now);
    assert!(only_bad.is_none());
}
