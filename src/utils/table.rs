//! Table rendering utilities for CLI outputs.

use crate::utils::formatting::pad_right;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            width: UnicodeWidthStr::width(header),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>, separator: char) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator,
        }
    }

    /// Add a row, widening columns to fit.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(&row) {
            col.width = col.width.max(UnicodeWidthStr::width(cell.as_str()));
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for col in &self.columns {
            out.push_str(&pad_right(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&self.separator.to_string().repeat(total));
        out.push('\n');

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad_right(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}
