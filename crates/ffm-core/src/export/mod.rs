//! Export and display sink: canonical records -> grid tables and CSV files.

pub mod csv;
pub mod display;
pub mod table;

use std::collections::{BTreeMap, BTreeSet};

use crate::parse::columns::{ACTION, PLAYER_INFO};

pub use self::csv::{resolve_output_path, write_csv};
pub use display::{free_agents_table, roster_table, teams_table};
pub use table::{truncate, Table};

pub const MANAGER: &str = "Manager";
pub const TEAM_ID: &str = "Team_ID";

/// Internal fields that never reach a table or a file.
pub const EXCLUDED_COLUMNS: &[&str] = &[ACTION, PLAYER_INFO];

/// Column prefix for terminal roster tables.
pub const DISPLAY_COLUMNS: &[&str] = &[
    "Player Name",
    "Team",
    "Position",
    "Slot",
    "Projected Points",
    "Points",
    "Opponent",
    "Game Time",
    "Avg Points",
    "Last Game",
    "Rank",
    "Ownership %",
    "Start %",
    "Trend",
    "FPTS",
];

/// Column prefix for CSV exports.
pub const CSV_COLUMNS: &[&str] = &[
    MANAGER,
    TEAM_ID,
    "Player Name",
    "Team",
    "Position",
    "Roster Status",
    "Opponent",
    "Game Time",
    "Projected Points",
    "Points",
    "Avg Points",
    "Last Game",
    "Rank",
    "Ownership %",
    "Start %",
    "Status",
    "Trend",
    "Notes",
];

/// A flat record ready for a sink: column name -> cell text.
pub type Row = BTreeMap<String, String>;

/// Deterministic column order for a set of rows.
///
/// `lead` columns come first, always. Then every `preferred` column that some
/// row has, in list order, then the remaining observed columns alphabetically.
/// [`EXCLUDED_COLUMNS`] never appear.
pub fn order_columns(rows: &[Row], preferred: &[&str], lead: &[&str]) -> Vec<String> {
    let mut observed: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.keys().map(String::as_str))
        .filter(|k| !EXCLUDED_COLUMNS.contains(k))
        .collect();

    let mut columns: Vec<String> = Vec::new();
    for col in lead {
        observed.remove(col);
        columns.push(col.to_string());
    }
    for col in preferred {
        if observed.remove(col) {
            columns.push(col.to_string());
        }
    }
    // BTreeSet iterates in sorted order.
    columns.extend(observed.into_iter().map(str::to_string));
    columns
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
