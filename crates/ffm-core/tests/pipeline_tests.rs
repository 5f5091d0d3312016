// End-to-end pipeline tests over saved pages: fetch -> parse -> canonicalize
// -> export.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ffm_core::canonical::Field;
use ffm_core::{
    dispatch, FfmError, League, Page, PageSource, PlayerFilters, SnapshotPages, SourceKind,
};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures().join(name)).expect("fixture should exist")
}

fn temp_output(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ffm_pipeline_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn snapshot_league(output: &Path) -> League {
    let pages = SnapshotPages::new(fixtures(), fixtures().join("teams_table.html"));
    League::new(Box::new(pages), output)
}

/// In-memory pages; a missing entry or an `Err` fails the fetch.
struct FakePages {
    pages: HashMap<Page, Result<String, String>>,
}

impl FakePages {
    fn new() -> Self {
        FakePages { pages: HashMap::new() }
    }

    fn page(mut self, page: Page, html: String) -> Self {
        self.pages.insert(page, Ok(html));
        self
    }

    fn failing(mut self, page: Page, message: &str) -> Self {
        self.pages.insert(page, Err(message.to_string()));
        self
    }
}

#[async_trait]
impl PageSource for FakePages {
    async fn fetch(&self, _source: SourceKind, page: &Page) -> Result<String, FfmError> {
        match self.pages.get(page) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(message)) => Err(FfmError::Fetch {
                location: page.to_string(),
                message: message.clone(),
            }),
            None => Err(FfmError::Fetch {
                location: page.to_string(),
                message: "not found".into(),
            }),
        }
    }
}

fn three_teams_with_team_2_down() -> FakePages {
    FakePages::new()
        .page(Page::Teams, fixture("teams_table.html"))
        .page(Page::roster("1"), fixture("team_1.html"))
        .failing(Page::roster("2"), "connection reset")
        .page(Page::roster("3"), fixture("team_3.html"))
}

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_teams_from_saved_members_page() {
    let out = temp_output("teams");
    let teams = snapshot_league(&out).get_all_teams("espn").await.unwrap();

    let summary: Vec<_> = teams
        .iter()
        .map(|t| (t.team_id.as_str(), t.team_abbrev.as_str(), t.team_name.as_str()))
        .collect();
    assert_eq!(
        summary,
        [("1", "ZA", "NEPA Pizza"), ("2", "BM", "Bills Mafia"), ("3", "GG", "Gridiron Gang")]
    );
    assert_eq!(teams[0].manager_name, "Brandon Mirigliani");
}

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn roster_statuses_follow_slots_and_projections() {
    let out = temp_output("roster");
    let roster = snapshot_league(&out).get_roster("1", "espn").await.unwrap().unwrap();

    assert_eq!(roster.manager_name, "NEPA Pizza");
    assert_eq!(roster.source, "espn");

    // The bench separator and totals rows are not players.
    let got: Vec<_> = roster
        .players
        .iter()
        .map(|p| (p.name(), p.get(Field::RosterStatus)))
        .collect();
    assert_eq!(
        got,
        [
            ("Josh Allen", "QB"),
            ("Bijan Robinson", "RB"),
            ("Kyren Williams", "RB"),
            ("Puka Nacua", "IR"),
            ("Drake London", "WR"),
            ("Sam LaPorta", "TE"),
            ("Zay Flowers", "BE"),
            ("Steelers D/ST", "D/ST"),
            ("a'imi Fairbairn", "K"),
            ("Tank Bigsby", "BE"),
            ("Jaylen Warren", "BE"),
            ("Nick Chubb", "IR"),
        ]
    );

    let williams = &roster.players[2];
    assert_eq!(williams.get(Field::Status), "Q");
    assert_eq!(williams.get(Field::Team), "LAR");
    assert_eq!(williams.get(Field::Opponent), "@SF");
    assert_eq!(williams.get(Field::ProjectedPoints), "14.9");
    assert_eq!(williams.get(Field::Fpts), "131.0");
    assert_eq!(williams.get(Field::Slot), "RB");
}

#[tokio::test]
async fn roster_carries_resolved_source_name() {
    let out = temp_output("source-name");
    let roster = snapshot_league(&out).get_roster("1", " ESPN ").await.unwrap().unwrap();
    assert_eq!(roster.source, "espn");
}

/// A player cell without a name element goes through the first-match
/// splitter. The kicker code also matches the leading `K` of the name, so the
/// first letter is lost. Pinned so a splitter change is a conscious one.
#[tokio::test]
async fn unnested_player_cell_keeps_first_match_split() {
    let out = temp_output("split");
    let roster = snapshot_league(&out).get_roster("1", "espn").await.unwrap().unwrap();
    let kicker = roster
        .players
        .iter()
        .find(|p| p.get(Field::Slot) == "K")
        .unwrap();
    assert_eq!(kicker.name(), "a'imi Fairbairn");
    assert_eq!(kicker.get(Field::Team), "HOU");
    assert_eq!(kicker.get(Field::Position), "K");
}

#[tokio::test]
async fn every_player_has_exactly_the_canonical_keys() {
    let out = temp_output("schema");
    let roster = snapshot_league(&out).get_roster("3", "espn").await.unwrap().unwrap();
    let expected: Vec<&str> = Field::ALL.iter().map(|f| f.column()).collect();
    for player in &roster.players {
        let row = player.to_row();
        let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
        let mut want = expected.clone();
        keys.sort_unstable();
        want.sort_unstable();
        assert_eq!(keys, want);
        assert!(!row.contains_key("Action"));
        assert!(!row.contains_key("Player_Info"));
    }
}

#[tokio::test]
async fn page_without_table_is_no_data() {
    let out = temp_output("bye");
    let roster = snapshot_league(&out).get_roster("2", "espn").await.unwrap();
    assert!(roster.is_none());
}

#[tokio::test]
async fn missing_snapshot_is_a_fetch_error() {
    let out = temp_output("missing");
    let err = snapshot_league(&out).get_roster("99", "espn").await.unwrap_err();
    match &err {
        FfmError::Fetch { location, .. } => assert!(location.ends_with("team_99.html")),
        other => panic!("expected Fetch, got: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_source_fails_before_fetching() {
    let out = temp_output("unknown");
    // No pages at all: any fetch would be a Fetch error, not UnknownSource.
    let league = League::new(Box::new(FakePages::new()), &out);

    for err in [
        league.get_roster("1", "sleeper").await.unwrap_err(),
        league.get_rosters(&ids(&["1", "2"]), "sleeper").await.unwrap_err(),
        league.get_all_teams("sleeper").await.unwrap_err(),
    ] {
        match &err {
            FfmError::UnknownSource(name) => assert_eq!(name, "sleeper"),
            other => panic!("expected UnknownSource, got: {other}"),
        }
    }
    assert!(dispatch("sleeper").is_err());
    assert!(!out.exists());
}

#[tokio::test]
async fn yahoo_has_no_data() {
    let out = temp_output("yahoo");
    let league = snapshot_league(&out);
    assert!(league.get_roster("1", "yahoo").await.unwrap().is_none());
    assert!(league.get_all_teams("Yahoo").await.unwrap().is_empty());
    assert!(league
        .get_players("yahoo", &PlayerFilters::default())
        .await
        .unwrap()
        .is_empty());

    let err = league
        .export_unified_csv(&ids(&["1", "2"]), "yahoo", None)
        .await
        .unwrap_err();
    match &err {
        FfmError::DataValidation(_) => {}
        other => panic!("expected DataValidation, got: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Batches and export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_continues_past_a_failing_team() {
    let out = temp_output("batch");
    let league = League::new(Box::new(three_teams_with_team_2_down()), &out);

    let batch = league.get_rosters(&ids(&["1", "2", "3"]), "espn").await.unwrap();
    let processed: Vec<_> = batch.processed.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(processed, ["1", "3"]);
    assert_eq!(batch.failed, ["2"]);
    assert_eq!(batch.processed[0].1.players.len(), 12);
    assert_eq!(batch.processed[1].1.players.len(), 3);
}

#[tokio::test]
async fn unified_export_skips_failed_teams() {
    let out = temp_output("unified");
    let league = League::new(Box::new(three_teams_with_team_2_down()), &out);

    let export = league
        .export_unified_csv(&ids(&["1", "2", "3"]), "espn", None)
        .await
        .unwrap();
    assert_eq!(export.path, out.join("league_unified_roster.csv"));
    assert_eq!(export.players, 15);
    assert_eq!(export.teams, 2);
    assert_eq!(export.skipped, ["2"]);

    let mut reader = csv::Reader::from_path(&export.path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "Manager");
    assert_eq!(&headers[1], "Team_ID");
    assert_eq!(&headers[2], "Player Name");
    // Schema fields plus the two tags, internal fields excluded.
    assert_eq!(headers.len(), 21);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 15);
    let team_ids: Vec<&str> = rows.iter().map(|r| &r[1]).collect();
    assert!(!team_ids.contains(&"2"));
    assert_eq!(team_ids.iter().filter(|id| **id == "3").count(), 3);
    let last = &rows[14];
    assert_eq!(&last[0], "Gridiron Gang");
    assert_eq!(&last[2], "Tyler Allgeier");

    let _ = std::fs::remove_dir_all(&out);
}

#[tokio::test]
async fn team_csv_round_trips_canonical_values() {
    let out = temp_output("team_csv");
    let league = snapshot_league(&out);
    let roster = league.get_roster("1", "espn").await.unwrap().unwrap();

    let path = league.export_team_csv("1", &roster, None).unwrap();
    assert_eq!(path, out.join("team_1_roster.csv"));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), roster.players.len());

    for (record, player) in rows.iter().zip(&roster.players) {
        for (i, column) in headers.iter().enumerate() {
            let want = match column.as_str() {
                "Manager" => "NEPA Pizza",
                "Team_ID" => "1",
                other => player.get(Field::from_column(other).unwrap()),
            };
            assert_eq!(&record[i], want, "column {column}");
        }
    }

    let _ = std::fs::remove_dir_all(&out);
}

#[tokio::test]
async fn empty_roster_is_not_exported() {
    let out = temp_output("empty_export");
    let league = snapshot_league(&out);
    let mut roster = league.get_roster("3", "espn").await.unwrap().unwrap();
    roster.players.clear();

    let err = league.export_team_csv("3", &roster, None).unwrap_err();
    match &err {
        FfmError::DataValidation(msg) => assert!(msg.contains("team 3")),
        other => panic!("expected DataValidation, got: {other}"),
    }
    assert!(!out.join("team_3_roster.csv").exists());
}

// ---------------------------------------------------------------------------
// Free agents
// ---------------------------------------------------------------------------

async fn free_agents(filters: PlayerFilters) -> Vec<(String, String)> {
    let out = temp_output("fa");
    snapshot_league(&out)
        .get_players("espn", &filters)
        .await
        .unwrap()
        .iter()
        .map(|p| (p.name().to_string(), p.get(Field::Status).to_string()))
        .collect()
}

fn names(players: &[(String, String)]) -> Vec<&str> {
    players.iter().map(|(n, _)| n.as_str()).collect()
}

#[tokio::test]
async fn free_agents_sorted_by_projection() {
    let all = free_agents(PlayerFilters::default()).await;
    assert_eq!(
        names(&all),
        ["Jaylen Wright", "Cairo Santos", "Noah Gray", "Jalen Tolbert", "Tyler Boyd"]
    );
    assert_eq!(all[3].1, "WA (Thu)");
}

#[tokio::test]
async fn free_agent_filters_combine() {
    let wr = free_agents(PlayerFilters {
        positions: Some("wr".into()),
        ..Default::default()
    })
    .await;
    assert_eq!(names(&wr), ["Jalen Tolbert", "Tyler Boyd"]);

    let fa_top = free_agents(PlayerFilters {
        status: Some("fa".into()),
        limit: Some(2),
        ..Default::default()
    })
    .await;
    assert_eq!(names(&fa_top), ["Jaylen Wright", "Cairo Santos"]);

    let teams = free_agents(PlayerFilters {
        teams: Some("KC, mia".into()),
        ..Default::default()
    })
    .await;
    assert_eq!(names(&teams), ["Jaylen Wright", "Noah Gray"]);
}

#[tokio::test]
async fn free_agent_season_total_maps_to_fpts() {
    let out = temp_output("fa_fpts");
    let players = snapshot_league(&out)
        .get_players("espn", &PlayerFilters::default())
        .await
        .unwrap();
    let gray = players.iter().find(|p| p.name() == "Noah Gray").unwrap();
    assert_eq!(gray.get(Field::Fpts), "33.3");
    assert_eq!(gray.get(Field::Team), "KC");
    assert_eq!(gray.get(Field::Position), "TE");
    assert_eq!(gray.get(Field::RosterStatus), "");
}
