use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::event_time::resolve_event;
use crate::core::events::EventLogic;
use crate::db::pool::DbPool;
use crate::db::queries::{load_events, load_rsvps};
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::ui::messages::{header, info, notify, success};
use crate::utils::date::{Clock, human};
use crate::utils::formatting::ellipsize;
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use std::collections::HashSet;
use std::io::Write;
use std::thread;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Events {
        calendar,
        rsvp,
        next,
        watch,
    } = cmd
    {
        let pool = super::open_db(cfg, clock)?;

        if let Some(event_id) = rsvp {
            return toggle_rsvp(&pool, cfg, clock, event_id);
        }

        if *next {
            let session = AuthLogic::current_session(&pool.conn)?;
            let user_id = session.require_user()?.id.clone();
            return match clock {
                Clock::System => show_next(&pool, &user_id, Local::now, *watch),
                Clock::Fixed(fixed) => {
                    let pinned = *fixed;
                    show_next(&pool, &user_id, move || pinned, None)
                }
            };
        }

        let events = load_events(&pool.conn)?;
        let session = AuthLogic::current_session(&pool.conn)?;
        let going = match session.user() {
            Some(u) => load_rsvps(&pool.conn, &u.id)?,
            None => HashSet::new(),
        };

        if *calendar {
            print_calendar(&events, clock.today());
        } else {
            match clock {
                Clock::System => print_list(&events, &going, &Local::now(), cfg.separator()),
                Clock::Fixed(fixed) => print_list(&events, &going, fixed, cfg.separator()),
            }
        }
    }

    Ok(())
}

fn toggle_rsvp(pool: &DbPool, cfg: &Config, clock: &Clock, event_id: &str) -> AppResult<()> {
    let (session, mut gate) = super::session_with_gate(pool, cfg, clock)?;
    let user = session.require_user()?;

    let outcome = super::guarded(&mut gate, || {
        EventLogic::toggle_rsvp(&pool.conn, &user.id, event_id)
    })?;

    if let Some(o) = outcome {
        if o.attending {
            success(format!("You're going to {} ({} going)", o.event.title, o.event.attendees));
            if cfg.notifications {
                notify(
                    format!("RSVP Confirmed: {}", o.event.title),
                    format!(
                        "You are all set! We will remind you shortly before {}.",
                        o.event.time
                    ),
                );
            }
        } else {
            info(format!("RSVP withdrawn for {} ({} going)", o.event.title, o.event.attendees));
        }
    }

    Ok(())
}

/// Countdown to the next RSVP'd event. With `watch`, redraw once per second
/// until the event starts or the time runs out; the loop ends with this call.
fn show_next<Tz, F>(pool: &DbPool, user_id: &str, now: F, watch: Option<u64>) -> AppResult<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    F: Fn() -> DateTime<Tz>,
{
    let Some(next) = EventLogic::next_for_user(&pool.conn, user_id, &now())? else {
        info("No upcoming events on your RSVP list.");
        return Ok(());
    };

    header(format!("Next Up: {}", next.event.title));
    println!("🕒 {} @ {}  ({})", next.event.date, next.event.time, human(&next.starts_at));
    println!("📍 {}", next.event.location);

    let Some(ticks) = watch else {
        if let Some(c) = next.countdown {
            println!("⏳ {}", c.compact());
        }
        return Ok(());
    };

    let mut stdout = std::io::stdout();
    for _ in 0..=ticks {
        match crate::core::event_time::countdown(&next.starts_at, &now()) {
            Some(c) => {
                print!("\r⏳ {}", c.compact());
                stdout.flush()?;
            }
            None => {
                println!("\r🎉 {} has started!", next.event.title);
                return Ok(());
            }
        }
        thread::sleep(Duration::from_secs(1));
    }
    println!();

    Ok(())
}

fn print_list<Tz>(events: &[Event], going: &HashSet<String>, now: &DateTime<Tz>, sep: char)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if events.is_empty() {
        info("No events scheduled.");
        return;
    }

    header("Upcoming Events");

    let mut table = Table::new(
        vec![
            Column::new("ID"),
            Column::new("DATE"),
            Column::new("TIME"),
            Column::new("EVENT"),
            Column::new("LOCATION"),
            Column::new("GOING"),
            Column::new("NEXT"),
        ],
        sep,
    );

    for ev in events {
        let going_mark = if going.contains(&ev.id) { "✔ " } else { "" };
        let next_at = resolve_event(ev, now)
            .map(|dt| human(&dt))
            .unwrap_or_else(|| "?".to_string());

        table.add_row(vec![
            ev.id.clone(),
            ev.date.clone(),
            ev.time.clone(),
            ev.title.clone(),
            ellipsize(&ev.location, 24),
            format!("{}{}", going_mark, ev.attendees),
            next_at,
        ]);
    }

    print!("{}", table.render());
}

fn print_calendar(events: &[Event], today: NaiveDate) {
    let days = EventLogic::calendar_days(events, today.month());
    let Some((offset, len)) = EventLogic::month_layout(today) else {
        return;
    };

    header(format!("Calendar: {}", today.format("%B %Y")));
    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    let mut line = "     ".repeat(offset as usize);
    for day in 1..=len {
        let mark = if days.contains_key(&day) { '*' } else { ' ' };
        line.push_str(&format!(" {:>2}{} ", day, mark));
        if (day + offset) % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    println!();
    for (day, evs) in &days {
        for ev in evs {
            println!("{:>2} | {} - {}", day, ev.short_time(), ev.title);
        }
    }
}
