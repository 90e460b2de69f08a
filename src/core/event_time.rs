//! Resolve human-entered event labels ("Oct 15", "10:00 AM") into the next
//! absolute occurrence, and derive countdowns from it.
//!
//! Every function takes `now` explicitly and performs no I/O, so the
//! countdown can be recomputed every second without drift.

use crate::models::countdown::Countdown;
use crate::models::event::Event;
use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static ORDINAL_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?\s*$").unwrap());

static CLOCK_12H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})(?::(\d{2}))?\s*([AaPp])\.?\s*[Mm]\.?\s*$").unwrap()
});

/// Month and day from a label such as "Oct 15", "October 15" or "oct 15th".
/// Feb 29 is accepted; whether it exists is decided per year.
pub fn parse_date_label(label: &str) -> Option<(u32, u32)> {
    let caps = ORDINAL_DAY.captures(label)?;
    // 2000 is a leap year, so every valid month/day pair parses.
    let with_year = format!("{} {} 2000", &caps[1], &caps[2]);
    let date = NaiveDate::parse_from_str(&with_year, "%b %d %Y").ok()?;
    Some((date.month(), date.day()))
}

/// Wall-clock time from "10:00 AM", "7 pm", "7:00PM" or 24-hour "19:00".
pub fn parse_time_label(label: &str) -> Option<NaiveTime> {
    if let Some(caps) = CLOCK_12H.captures(label) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute = caps.get(2).map_or("00", |m| m.as_str());
        let meridiem = if caps[3].eq_ignore_ascii_case("a") {
            "AM"
        } else {
            "PM"
        };
        return NaiveTime::parse_from_str(&format!("{hour}:{minute} {meridiem}"), "%I:%M %p").ok();
    }

    NaiveTime::parse_from_str(label.trim(), "%H:%M").ok()
}

/// Place a naive wall-clock value in `tz`. Ambiguous times take the earlier
/// instant; times skipped by a DST jump move forward by one hour.
fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(early, _) => Some(early),
        LocalResult::None => tz
            .from_local_datetime(&(naive + TimeDelta::hours(1)))
            .earliest(),
    }
}

fn occurrence<Tz: TimeZone>(
    tz: &Tz,
    year: i32,
    month: u32,
    day: u32,
    time: NaiveTime,
) -> Option<DateTime<Tz>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    localize(tz, date.and_time(time))
}

/// Next occurrence of `(date_label, time_label)` relative to `now`.
///
/// The label is read in `now`'s calendar year; a candidate strictly before
/// `now` moves to the following year, once. A date that does not exist in
/// the current year (Feb 29) also moves forward. `None` means the labels
/// cannot be resolved and the event must be left out of countdowns.
pub fn resolve<Tz: TimeZone>(
    date_label: &str,
    time_label: &str,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let (month, day) = parse_date_label(date_label)?;
    let time = parse_time_label(time_label)?;
    let tz = now.timezone();
    let year = now.year();

    match occurrence(&tz, year, month, day, time) {
        Some(candidate) if candidate >= *now => Some(candidate),
        _ => occurrence(&tz, year + 1, month, day, time),
    }
}

pub fn resolve_event<Tz: TimeZone>(event: &Event, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    resolve(&event.date, &event.time, now)
}

/// Countdown from `now` to `resolved`, `None` once it has started.
pub fn countdown<Tz: TimeZone>(resolved: &DateTime<Tz>, now: &DateTime<Tz>) -> Option<Countdown> {
    let diff = resolved.clone() - now.clone();
    Countdown::from_millis(diff.num_milliseconds())
}

/// An event paired with its resolved start.
#[derive(Debug, Clone)]
pub struct UpcomingEvent<'a, Tz: TimeZone> {
    pub event: &'a Event,
    pub starts_at: DateTime<Tz>,
}

impl<Tz: TimeZone> UpcomingEvent<'_, Tz> {
    pub fn countdown(&self, now: &DateTime<Tz>) -> Option<Countdown> {
        countdown(&self.starts_at, now)
    }
}

/// Nearest strictly-future event among the ones the session-holder opted into.
/// Unresolvable labels are skipped. Ties go to the earliest in `events` order.
pub fn next_upcoming<'a, Tz: TimeZone>(
    events: &'a [Event],
    selected: &HashSet<String>,
    now: &DateTime<Tz>,
) -> Option<UpcomingEvent<'a, Tz>> {
    events
        .iter()
        .filter(|e| selected.contains(&e.id))
        .filter_map(|e| {
            resolve_event(e, now).map(|starts_at| UpcomingEvent {
                event: e,
                starts_at,
            })
        })
        .filter(|u| u.starts_at > *now)
        .min_by(|a, b| a.starts_at.cmp(&b.starts_at))
}
