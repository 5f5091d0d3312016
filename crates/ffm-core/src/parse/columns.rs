// Column layouts: which cell index holds which field, per record kind.
//
// These tables are the only place that knows the page layout. When the site
// moves a column, edit the table.

use crate::model::RecordKind;

/// Field names a player-info cell writes into.
#[derive(Debug)]
pub struct PlayerFields {
    pub name: &'static str,
    pub team: &'static str,
    pub position: &'static str,
    /// Injury designation shown next to the name, if the layout keeps it.
    pub injury: Option<&'static str>,
    /// The full, unsplit cell text.
    pub combined: &'static str,
}

/// How a cell's text is read.
#[derive(Debug)]
pub enum CellKind {
    /// Plain stripped text.
    Text,
    /// Combined name/team/position cell.
    Player(&'static PlayerFields),
    /// League members cell: prefers the inner `table--cell` div and its
    /// `teamName` span.
    TeamCell,
}

#[derive(Debug)]
pub struct Column {
    pub index: usize,
    pub field: &'static str,
    pub kind: CellKind,
}

const fn text(index: usize, field: &'static str) -> Column {
    Column {
        index,
        field,
        kind: CellKind::Text,
    }
}

const fn team_cell(index: usize, field: &'static str) -> Column {
    Column {
        index,
        field,
        kind: CellKind::TeamCell,
    }
}

#[derive(Debug)]
pub struct ColumnLayout {
    pub name: &'static str,
    pub kind: RecordKind,
    /// Rows with fewer cells are header or spacer rows.
    pub min_cells: usize,
    pub columns: &'static [Column],
}

impl ColumnLayout {
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.iter().find(|c| c.index == index)
    }
}

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const PLAYER_INFO: &str = "Player_Info";
pub const ACTION: &str = "Action";

static ROSTER_PLAYER: PlayerFields = PlayerFields {
    name: "Player Name",
    team: "Team",
    position: "Position",
    injury: Some("Status"),
    combined: PLAYER_INFO,
};

static FREE_AGENT_PLAYER: PlayerFields = PlayerFields {
    name: "name",
    team: "team",
    position: "position",
    injury: None,
    combined: "player_info",
};

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

pub static TEAMS: ColumnLayout = ColumnLayout {
    name: "teams",
    kind: RecordKind::Teams,
    min_cells: 1,
    columns: &[
        team_cell(0, "team_id"),
        team_cell(1, "team_abbrev"),
        team_cell(2, "team_name"),
        team_cell(3, "manager_name"),
    ],
};

/// Roster table with the full stats block.
pub static ROSTER: ColumnLayout = ColumnLayout {
    name: "roster",
    kind: RecordKind::Roster,
    min_cells: 2,
    columns: &[
        text(0, "Slot"),
        Column {
            index: 1,
            field: "Player Name",
            kind: CellKind::Player(&ROSTER_PLAYER),
        },
        text(2, ACTION),
        text(3, "Opponent"),
        text(4, "Game Time"),
        text(5, "Projected Points"),
        text(6, "Points"),
        text(7, "Opponent Rank"),
        text(8, "Start %"),
        text(9, "Ownership %"),
        text(10, "Trend"),
        text(11, "Rank"),
        text(12, "FPTS"),
        text(13, "Avg Points"),
        text(14, "Last Game"),
    ],
};

/// Roster table without stat columns (slot, player, action, matchup only).
pub static ROSTER_BASIC: ColumnLayout = ColumnLayout {
    name: "roster-basic",
    kind: RecordKind::Roster,
    min_cells: 2,
    columns: &[
        text(0, "Slot"),
        Column {
            index: 1,
            field: "Player Name",
            kind: CellKind::Player(&ROSTER_PLAYER),
        },
        text(2, ACTION),
        text(3, "Opponent"),
        text(4, "Game Time"),
    ],
};

pub static FREE_AGENTS: ColumnLayout = ColumnLayout {
    name: "free-agents",
    kind: RecordKind::FreeAgents,
    min_cells: 15,
    columns: &[
        Column {
            index: 0,
            field: "name",
            kind: CellKind::Player(&FREE_AGENT_PLAYER),
        },
        text(1, "status"),
        text(2, "action"),
        text(3, "opponent"),
        text(4, "game_time"),
        text(5, "projected_points"),
        text(6, "points"),
        text(7, "rank"),
        text(8, "ownership_percent"),
        text(9, "start_percent"),
        text(10, "trend"),
        text(11, "games_played"),
        text(12, "avg_points"),
        text(13, "last_game"),
        text(14, "season_total"),
    ],
};

/// Pick the layout for a record kind. For rosters the header text selects
/// the variant: a header with projection or start-percentage columns gets
/// the full layout; a header without them gets the basic one. No header at
/// all means the full layout.
pub fn layout_for(kind: RecordKind, header_text: Option<&str>) -> &'static ColumnLayout {
    match kind {
        RecordKind::Teams => &TEAMS,
        RecordKind::FreeAgents => &FREE_AGENTS,
        RecordKind::Roster => match header_text {
            Some(h) if !h.trim().is_empty() => {
                let h = h.to_uppercase();
                if h.contains("PROJ") || h.contains("%ST") {
                    &ROSTER
                } else {
                    &ROSTER_BASIC
                }
            }
            _ => &ROSTER,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
