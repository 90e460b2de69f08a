//! Formatting utilities used for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn italic(s: &str) -> String {
    format!("\x1b[3m{}\x1b[0m", s)
}

/// Pad to `width` terminal columns (emoji and CJK count double).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// "1 day", "3 days"
pub fn days_label(days: i64) -> String {
    format!("{} day{}", days, if days == 1 { "" } else { "s" })
}

/// Wrap long content for the terminal, indenting every line.
pub fn wrap_indented(text: &str, width: usize, indent: &str) -> String {
    let opts = textwrap::Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(text, opts)
}

/// Trim to `max` visible characters, adding an ellipsis.
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
