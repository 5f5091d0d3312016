// Canonicalizer: map each source's native field names onto one fixed player
// schema.

use std::collections::BTreeMap;

use crate::error::FfmError;
use crate::model::{RawRecord, RecordKind};
use crate::sources::SourceKind;

/// The canonical player schema. Every canonical record carries all of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PlayerName,
    Team,
    Position,
    Slot,
    RosterStatus,
    Opponent,
    GameTime,
    ProjectedPoints,
    Points,
    AvgPoints,
    LastGame,
    Rank,
    OwnershipPct,
    StartPct,
    Status,
    Trend,
    Fpts,
    OpponentRank,
    Notes,
}

impl Field {
    pub const COUNT: usize = 19;

    pub const ALL: [Field; Field::COUNT] = [
        Field::PlayerName,
        Field::Team,
        Field::Position,
        Field::Slot,
        Field::RosterStatus,
        Field::Opponent,
        Field::GameTime,
        Field::ProjectedPoints,
        Field::Points,
        Field::AvgPoints,
        Field::LastGame,
        Field::Rank,
        Field::OwnershipPct,
        Field::StartPct,
        Field::Status,
        Field::Trend,
        Field::Fpts,
        Field::OpponentRank,
        Field::Notes,
    ];

    /// Column name used in tables and CSV headers.
    pub fn column(&self) -> &'static str {
        match self {
            Field::PlayerName => "Player Name",
            Field::Team => "Team",
            Field::Position => "Position",
            Field::Slot => "Slot",
            Field::RosterStatus => "Roster Status",
            Field::Opponent => "Opponent",
            Field::GameTime => "Game Time",
            Field::ProjectedPoints => "Projected Points",
            Field::Points => "Points",
            Field::AvgPoints => "Avg Points",
            Field::LastGame => "Last Game",
            Field::Rank => "Rank",
            Field::OwnershipPct => "Ownership %",
            Field::StartPct => "Start %",
            Field::Status => "Status",
            Field::Trend => "Trend",
            Field::Fpts => "FPTS",
            Field::OpponentRank => "Opponent Rank",
            Field::Notes => "Notes",
        }
    }

    pub fn from_column(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.column() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A player in the canonical schema. All fields are always present; a field
/// the source did not provide is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalPlayer {
    values: [String; Field::COUNT],
}

impl CanonicalPlayer {
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Set a field, normalizing whitespace-only values to empty.
    pub fn set(&mut self, field: Field, value: &str) {
        self.values[field.index()] = value.trim().to_string();
    }

    pub fn name(&self) -> &str {
        self.get(Field::PlayerName)
    }

    /// Column name -> value, for every schema field.
    pub fn to_row(&self) -> BTreeMap<String, String> {
        Field::ALL
            .iter()
            .map(|f| (f.column().to_string(), self.get(*f).to_string()))
            .collect()
    }
}

/// A source's native-name -> canonical-field table.
pub type FieldMap = &'static [(&'static str, Field)];

pub const ESPN_ROSTER: FieldMap = &[
    ("Player Name", Field::PlayerName),
    ("Team", Field::Team),
    ("Position", Field::Position),
    ("Slot", Field::Slot),
    ("Roster Status", Field::RosterStatus),
    ("Opponent", Field::Opponent),
    ("Game Time", Field::GameTime),
    ("Projected Points", Field::ProjectedPoints),
    ("Points", Field::Points),
    ("Avg Points", Field::AvgPoints),
    ("Last Game", Field::LastGame),
    ("Rank", Field::Rank),
    ("Ownership %", Field::OwnershipPct),
    ("Start %", Field::StartPct),
    ("Status", Field::Status),
    ("Trend", Field::Trend),
    ("FPTS", Field::Fpts),
    ("Opponent Rank", Field::OpponentRank),
    ("Notes", Field::Notes),
];

pub const ESPN_FREE_AGENTS: FieldMap = &[
    ("name", Field::PlayerName),
    ("team", Field::Team),
    ("position", Field::Position),
    ("status", Field::Status),
    ("opponent", Field::Opponent),
    ("game_time", Field::GameTime),
    ("projected_points", Field::ProjectedPoints),
    ("points", Field::Points),
    ("rank", Field::Rank),
    ("ownership_percent", Field::OwnershipPct),
    ("start_percent", Field::StartPct),
    ("trend", Field::Trend),
    ("avg_points", Field::AvgPoints),
    ("last_game", Field::LastGame),
    ("season_total", Field::Fpts),
];

pub const YAHOO_ROSTER: FieldMap = &[
    ("name", Field::PlayerName),
    ("team", Field::Team),
    ("position", Field::Position),
    ("slot", Field::Slot),
    ("roster_status", Field::RosterStatus),
    ("opponent", Field::Opponent),
    ("game_time", Field::GameTime),
    ("projected_points", Field::ProjectedPoints),
    ("points", Field::Points),
    ("avg_points", Field::AvgPoints),
    ("last_game", Field::LastGame),
    ("rank", Field::Rank),
    ("ownership", Field::OwnershipPct),
    ("start_percent", Field::StartPct),
    ("status", Field::Status),
    ("trend", Field::Trend),
    ("fpts", Field::Fpts),
    ("opponent_rank", Field::OpponentRank),
    ("notes", Field::Notes),
];

/// Map one raw record. Fields missing from the map or the record stay empty.
pub fn canonicalize_record(raw: &RawRecord, map: FieldMap) -> CanonicalPlayer {
    let mut player = CanonicalPlayer::default();
    for (native, field) in map {
        if let Some(value) = raw.get(*native) {
            player.set(*field, value);
        }
    }
    player
}

/// Map a batch of raw records. Records that end up without a player name are
/// dropped; order is preserved.
pub fn canonicalize(records: &[RawRecord], map: FieldMap) -> Vec<CanonicalPlayer> {
    records
        .iter()
        .map(|r| canonicalize_record(r, map))
        .filter(|p| !p.name().is_empty())
        .collect()
}

/// The field map for a source and record kind, if that source has one.
pub fn field_map(source: SourceKind, kind: RecordKind) -> Option<FieldMap> {
    match (source, kind) {
        (SourceKind::Espn, RecordKind::Roster) => Some(ESPN_ROSTER),
        (SourceKind::Espn, RecordKind::FreeAgents) => Some(ESPN_FREE_AGENTS),
        (SourceKind::Yahoo, RecordKind::Roster) => Some(YAHOO_ROSTER),
        _ => None,
    }
}

/// Canonicalize records from the named source. An unknown source name is an
/// error; so is a record kind the source has no field map for.
pub fn canonicalize_for(
    records: &[RawRecord],
    source: &str,
    kind: RecordKind,
) -> Result<Vec<CanonicalPlayer>, FfmError> {
    let source = SourceKind::resolve(source)?;
    let map = field_map(source, kind).ok_or_else(|| {
        FfmError::DataValidation(format!("{source} has no field map for {kind} records"))
    })?;
    Ok(canonicalize(records, map))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn schema() -> Vec<String> {
        let mut cols: Vec<String> = Field::ALL.iter().map(|f| f.column().to_string()).collect();
        cols.sort();
        cols
    }

    #[test]
    fn field_index_matches_all_order() {
        for (i, f) in Field::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
            assert_eq!(Field::from_column(f.column()), Some(*f));
        }
    }

    #[test]
    fn every_record_has_exactly_the_schema_keys() {
        let inputs = [
            (
                raw(&[("Player Name", "Josh Allen"), ("Action", "MOVE"), ("Player_Info", "x")]),
                ESPN_ROSTER,
            ),
            (raw(&[("name", "Bucky Irving"), ("games_played", "4")]), ESPN_FREE_AGENTS),
            (raw(&[("name", "Joe Burrow"), ("team", "CIN"), ("bogus", "1")]), YAHOO_ROSTER),
        ];
        for (rec, map) in inputs {
            let row = canonicalize_record(&rec, map).to_row();
            let keys: Vec<String> = row.keys().cloned().collect();
            assert_eq!(keys, schema());
        }
    }

    #[test]
    fn yahoo_names_map_to_canonical_fields() {
        let p = canonicalize_record(
            &raw(&[
                ("name", "Joe Burrow"),
                ("team", "CIN"),
                ("position", "QB"),
                ("ownership", "99.1"),
                ("start_percent", "95"),
                ("fpts", "210.4"),
            ]),
            YAHOO_ROSTER,
        );
        assert_eq!(p.get(Field::PlayerName), "Joe Burrow");
        assert_eq!(p.get(Field::OwnershipPct), "99.1");
        assert_eq!(p.get(Field::StartPct), "95");
        assert_eq!(p.get(Field::Fpts), "210.4");
        assert_eq!(p.get(Field::Notes), "");
    }

    #[test]
    fn whitespace_values_become_empty() {
        let p = canonicalize_record(
            &raw(&[("Player Name", "  Derrick Henry "), ("Opponent", "   "), ("Notes", "\t")]),
            ESPN_ROSTER,
        );
        assert_eq!(p.name(), "Derrick Henry");
        assert_eq!(p.get(Field::Opponent), "");
        assert_eq!(p.get(Field::Notes), "");
    }

    #[test]
    fn nameless_records_are_dropped() {
        let recs = vec![
            raw(&[("Player Name", "A")]),
            raw(&[("Player Name", " ")]),
            raw(&[("Team", "KC")]),
            raw(&[("Player Name", "B")]),
        ];
        let players = canonicalize(&recs, ESPN_ROSTER);
        let names: Vec<_> = players.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn field_maps_by_source() {
        assert!(field_map(SourceKind::Espn, RecordKind::Roster).is_some());
        assert!(field_map(SourceKind::Espn, RecordKind::FreeAgents).is_some());
        assert!(field_map(SourceKind::Yahoo, RecordKind::Roster).is_some());
        assert!(field_map(SourceKind::Yahoo, RecordKind::Teams).is_none());
    }

    #[test]
    fn canonicalize_for_resolves_source_name() {
        let recs = vec![raw(&[("name", "Joe Burrow"), ("fpts", "210.4")])];
        let players = canonicalize_for(&recs, "yahoo", RecordKind::Roster).unwrap();
        assert_eq!(players[0].get(Field::Fpts), "210.4");

        match canonicalize_for(&recs, "sleeper", RecordKind::Roster) {
            Err(FfmError::UnknownSource(name)) => assert_eq!(name, "sleeper"),
            other => panic!("expected UnknownSource, got: {other:?}"),
        }
        assert!(matches!(
            canonicalize_for(&recs, "espn", RecordKind::Teams),
            Err(FfmError::DataValidation(_))
        ));
    }
}
