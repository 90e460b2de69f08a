use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap());

fn strip_ansi(s: &str) -> String {
    ANSI_ESCAPE.replace_all(s, "").into_owned()
}

/// ANSI color for each logged operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "login" => Colour::Green,
        "logout" | "login_refused" => Colour::Yellow,
        "upgrade" => Colour::Purple,
        "rsvp" | "like" | "post" | "pray" | "prayer_request" => Colour::Blue,
        "post_rejected" => Colour::Red,
        "profile" => Colour::Cyan,
        "approve" => Colour::Green,
        "reject" | "member_status" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i32 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: String = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target, message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| op.len() + target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(60);
        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, d, ..)| d.len())
            .max()
            .unwrap_or(10);

        for (id, date, operation, target, message) in entries {
            let color = color_for_operation(&operation);

            let mut colored = color.paint(operation.as_str()).to_string();
            if !target.is_empty() {
                colored.push_str(&format!(" ({})", target));
            }

            // truncate on the visible text only
            let visible = strip_ansi(&colored);
            let shown = if visible.chars().count() > 60 {
                let cut: String = visible.chars().skip(operation.len()).take(57 - operation.len().min(57)).collect();
                format!("{}{}...", color.paint(operation.as_str()), cut)
            } else {
                colored
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&shown).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                shown,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
