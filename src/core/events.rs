use crate::core::event_time::{next_upcoming, parse_date_label};
use crate::db::log::ttlog_soft;
use crate::db::queries::{add_rsvp, adjust_attendees, find_event, load_events, load_rsvps, remove_rsvp};
use crate::errors::{AppError, AppResult};
use crate::models::countdown::Countdown;
use crate::models::event::Event;
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone};
use rusqlite::Connection;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct RsvpOutcome {
    pub event: Event,
    pub attending: bool,
}

/// Nearest RSVP'd event, owned so it can outlive the loaded list.
#[derive(Debug, Clone)]
pub struct NextEvent<Tz: TimeZone> {
    pub event: Event,
    pub starts_at: DateTime<Tz>,
    pub countdown: Option<Countdown>,
}

pub struct EventLogic;

impl EventLogic {
    /// Join or leave an event and keep its attendee counter in step.
    pub fn toggle_rsvp(conn: &Connection, user_id: &str, event_id: &str) -> AppResult<RsvpOutcome> {
        find_event(conn, event_id)?.ok_or_else(|| AppError::EventNotFound(event_id.to_string()))?;

        let attending_before = load_rsvps(conn, user_id)?.contains(event_id);

        let tx = conn.unchecked_transaction()?;
        if attending_before {
            remove_rsvp(&tx, user_id, event_id)?;
            adjust_attendees(&tx, event_id, -1)?;
        } else {
            add_rsvp(&tx, user_id, event_id)?;
            adjust_attendees(&tx, event_id, 1)?;
        }
        tx.commit()?;

        let event =
            find_event(conn, event_id)?.ok_or_else(|| AppError::EventNotFound(event_id.to_string()))?;

        ttlog_soft(
            conn,
            "rsvp",
            event_id,
            if attending_before { "RSVP withdrawn" } else { "RSVP confirmed" },
        );

        Ok(RsvpOutcome {
            event,
            attending: !attending_before,
        })
    }

    pub fn next_for_user<Tz: TimeZone>(
        conn: &Connection,
        user_id: &str,
        now: &DateTime<Tz>,
    ) -> AppResult<Option<NextEvent<Tz>>> {
        let events = load_events(conn)?;
        let rsvps = load_rsvps(conn, user_id)?;

        Ok(next_upcoming(&events, &rsvps, now).map(|u| NextEvent {
            countdown: u.countdown(now),
            event: u.event.clone(),
            starts_at: u.starts_at,
        }))
    }

    /// Events falling in `month`, grouped by day. Unreadable labels are left out.
    pub fn calendar_days(events: &[Event], month: u32) -> BTreeMap<u32, Vec<&Event>> {
        let mut days: BTreeMap<u32, Vec<&Event>> = BTreeMap::new();
        for ev in events {
            if let Some((m, d)) = parse_date_label(&ev.date)
                && m == month
            {
                days.entry(d).or_default().push(ev);
            }
        }
        days
    }

    /// Grid shape of the month containing `day`: blank cells before the 1st
    /// (weeks start on Sunday) and the number of days.
    pub fn month_layout(day: NaiveDate) -> Option<(u32, u32)> {
        let first = NaiveDate::from_ymd_opt(day.year(), day.month(), 1)?;
        let next = first.checked_add_months(Months::new(1))?;
        let len = (next - first).num_days() as u32;
        Some((first.weekday().num_days_from_sunday(), len))
    }
}
