// Record shapes that flow through the pipeline.

use std::collections::BTreeMap;
use std::fmt;

use crate::canonical::CanonicalPlayer;

/// A source-shaped record: native field name -> cell text.
pub type RawRecord = BTreeMap<String, String>;

/// Which kind of table a row came from. Selects the column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Teams,
    Roster,
    FreeAgents,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Teams => "teams",
            RecordKind::Roster => "roster",
            RecordKind::FreeAgents => "free-agents",
        };
        f.write_str(s)
    }
}

/// One row of the league members table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamRecord {
    pub team_id: String,
    pub team_abbrev: String,
    pub team_name: String,
    pub manager_name: String,
}

impl TeamRecord {
    /// Build from a parsed teams row. Rows without a team id are not teams.
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let field = |k: &str| raw.get(k).map(|v| v.trim().to_string()).unwrap_or_default();
        let team_id = field("team_id");
        if team_id.is_empty() {
            return None;
        }
        Some(TeamRecord {
            team_id,
            team_abbrev: field("team_abbrev"),
            team_name: field("team_name"),
            manager_name: field("manager_name"),
        })
    }
}

/// A roster as extracted from a page, before canonicalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRoster {
    pub manager_name: String,
    pub players: Vec<RawRecord>,
}

/// A canonical roster for one team. Player order is page row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub source: String,
    pub manager_name: String,
    pub players: Vec<CanonicalPlayer>,
}

impl Roster {
    /// An empty roster means "no data" to every consumer.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Manager label used in exports, falling back to `Manager{id}`.
    pub fn manager_or_default(&self, team_id: &str) -> String {
        if self.manager_name.trim().is_empty() {
            format!("Manager{team_id}")
        } else {
            self.manager_name.trim().to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
