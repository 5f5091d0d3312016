// Grid text tables for the terminal.

use std::fmt::Write as _;

use crate::parse::text::parse_numeric;

const ELLIPSIS: &str = "...";

/// Cut `value` to at most `max` characters, ending in `...` when cut.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    if max <= ELLIPSIS.len() {
        return value.chars().take(max).collect();
    }
    let mut out: String = value.chars().take(max - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// A grid-bordered table:
///
/// ```text
/// +------+-----+
/// | Name | Pos |
/// +======+=====+
/// | Ja   | WR  |
/// +------+-----+
/// ```
///
/// Columns whose non-empty cells are all numeric are right-aligned.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_width: Option<usize>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            max_width: None,
        }
    }

    /// Truncate every cell to `width` characters.
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Add a row. Short rows are padded with empty cells.
    pub fn push<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cell(&self, value: &str) -> String {
        match self.max_width {
            Some(w) => truncate(value, w),
            None => value.to_string(),
        }
    }

    pub fn render(&self) -> String {
        let headers: Vec<String> = self.headers.iter().map(|h| self.cell(h)).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(|c| self.cell(c)).collect())
            .collect();

        let widths: Vec<usize> = (0..headers.len())
            .map(|i| {
                rows.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(headers[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let numeric: Vec<bool> = (0..headers.len())
            .map(|i| {
                let mut cells = rows
                    .iter()
                    .map(|r| r[i].trim())
                    .filter(|c| !c.is_empty())
                    .peekable();
                cells.peek().is_some() && cells.all(|c| parse_numeric(c).is_some())
            })
            .collect();

        let rule = |fill: char| {
            let mut line = String::from("+");
            for w in &widths {
                line.extend(std::iter::repeat(fill).take(w + 2));
                line.push('+');
            }
            line
        };
        let line = |cells: &[String], align_right: &[bool]| {
            let mut out = String::from("|");
            for (i, cell) in cells.iter().enumerate() {
                let w = widths[i];
                if align_right[i] {
                    let _ = write!(out, " {cell:>w$} |");
                } else {
                    let _ = write!(out, " {cell:<w$} |");
                }
            }
            out
        };

        let mut out = String::new();
        out.push_str(&rule('-'));
        out.push('\n');
        out.push_str(&line(&headers, &vec![false; headers.len()]));
        out.push('\n');
        // An empty table is just the header box.
        out.push_str(&rule(if rows.is_empty() { '-' } else { '=' }));
        for row in &rows {
            out.push('\n');
            out.push_str(&line(row, &numeric));
            out.push('\n');
            out.push_str(&rule('-'));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
