// Table builders for the things the CLI shows.

use super::{order_columns, Row, Table, DISPLAY_COLUMNS};
use crate::canonical::{CanonicalPlayer, Field};
use crate::model::{Roster, TeamRecord};
use crate::parse::text::parse_numeric;

const NAME_WIDTH: usize = 24;
const STATUS_WIDTH: usize = 10;

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

pub fn teams_table(teams: &[TeamRecord]) -> Table {
    let mut table = Table::new(["Team ID", "Abbrev", "Team Name", "Manager Name"]);
    for team in teams {
        table.push([
            or_na(&team.team_id),
            or_na(&team.team_abbrev),
            or_na(&team.team_name),
            or_na(&team.manager_name),
        ]);
    }
    table
}

/// Roster table: preferred display columns first, then the rest
/// alphabetically. Cells longer than `max_width` are cut.
pub fn roster_table(roster: &Roster, max_width: usize) -> Table {
    let rows: Vec<Row> = roster.players.iter().map(CanonicalPlayer::to_row).collect();
    let columns = order_columns(&rows, DISPLAY_COLUMNS, &[]);
    let mut table = Table::new(columns.iter().map(String::as_str)).max_width(max_width);
    for row in &rows {
        table.push(columns.iter().map(|c| row.get(c).map(String::as_str).unwrap_or("")));
    }
    table
}

fn one_decimal(value: &str) -> String {
    format!("{:.1}", parse_numeric(value).unwrap_or(0.0))
}

/// Free-agent table: 1-based rank in list order, name and status cut short,
/// numbers to one decimal. `verbose` adds ownership and trend.
pub fn free_agents_table(players: &[CanonicalPlayer], verbose: bool) -> Table {
    let mut headers = vec!["Rank", "Name", "Position", "Team", "Status", "Proj Pts"];
    if verbose {
        headers.extend(["Own%", "Trend"]);
    }
    let mut table = Table::new(headers);
    for (i, p) in players.iter().enumerate() {
        let mut row = vec![
            (i + 1).to_string(),
            p.get(Field::PlayerName).chars().take(NAME_WIDTH).collect(),
            p.get(Field::Position).to_string(),
            p.get(Field::Team).to_string(),
            p.get(Field::Status).chars().take(STATUS_WIDTH).collect(),
            one_decimal(p.get(Field::ProjectedPoints)),
        ];
        if verbose {
            row.push(one_decimal(p.get(Field::OwnershipPct)));
            row.push(one_decimal(p.get(Field::Trend)));
        }
        table.push(row);
    }
    table
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
