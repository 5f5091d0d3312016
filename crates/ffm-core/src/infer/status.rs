// Roster status inference: starter position code, bench (`BE`) or injured
// reserve (`IR`).

use crate::parse::text::parse_numeric;

/// Positions that can fill a starting slot.
pub const SKILL_POSITIONS: &[&str] = &["QB", "RB", "WR", "TE", "K", "D/ST"];

/// Rows at or past this index (in page order) are bench rows.
pub const STARTER_ROWS: usize = 10;

pub const BENCH: &str = "BE";
pub const INJURED_RESERVE: &str = "IR";

/// Everything the status rules look at for one player.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusInput<'a> {
    pub status_text: &'a str,
    pub projected_points: &'a str,
    pub position: &'a str,
    pub row_index: usize,
    pub start_pct: &'a str,
}

fn is_skill(position: &str) -> bool {
    SKILL_POSITIONS.contains(&position)
}

/// Infer a roster status. Rules are checked in order and the first hit wins;
/// numbers that do not parse just let the rule fall through.
pub fn infer_roster_status(input: &StatusInput<'_>) -> String {
    let position = input.position.trim();
    let status = input.status_text.to_uppercase();

    if status.contains("IR") || status.contains("INJURED") || status.contains("OUT") {
        return INJURED_RESERVE.to_string();
    }

    if is_skill(position) && parse_numeric(input.projected_points) == Some(0.0) {
        return INJURED_RESERVE.to_string();
    }

    if position == "Bench" || position == "FLEX" {
        return BENCH.to_string();
    }

    if input.row_index < STARTER_ROWS && is_skill(position) {
        return position.to_string();
    }

    if input.row_index >= STARTER_ROWS {
        return BENCH.to_string();
    }

    if let Some(pct) = parse_numeric(input.start_pct) {
        if pct < 50.0 && is_skill(position) {
            return BENCH.to_string();
        }
    }

    if is_skill(position) {
        return position.to_string();
    }

    BENCH.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
