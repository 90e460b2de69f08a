/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Access banner color:
/// unlimited → green
/// trial running → yellow
/// expired → red
pub fn color_for_access(has_access: bool, unlimited: bool) -> &'static str {
    match (has_access, unlimited) {
        (true, true) => GREEN,
        (true, false) => YELLOW,
        _ => RED,
    }
}

/// Grey for zero counters, plain otherwise.
pub fn colorize_count(value: i64) -> String {
    if value == 0 {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
