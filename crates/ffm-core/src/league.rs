//! League data access: the whole pipeline behind one handle.
//!
//! A [`League`] is built per invocation with an explicit page source and
//! output directory. It fetches through the source dispatcher, canonicalizes,
//! and hands rows to the export sink. Batch operations run team by team and
//! carry on past failures.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::canonical::{canonicalize_for, CanonicalPlayer};
use crate::error::FfmError;
use crate::export::{
    order_columns, resolve_output_path, write_csv, Row, CSV_COLUMNS, MANAGER, TEAM_ID,
};
use crate::fetch::PageSource;
use crate::filters::PlayerFilters;
use crate::model::{RecordKind, Roster, TeamRecord};
use crate::sources::dispatch;

pub const UNIFIED_CSV_NAME: &str = "league_unified_roster.csv";

pub fn team_csv_name(team_id: &str) -> String {
    format!("team_{team_id}_roster.csv")
}

/// Outcome of a multi-team run: what came back, in request order, and which
/// team ids did not.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub processed: Vec<(String, Roster)>,
    pub failed: Vec<String>,
}

/// Outcome of a unified export.
#[derive(Debug)]
pub struct UnifiedExport {
    pub path: PathBuf,
    pub players: usize,
    pub teams: usize,
    pub skipped: Vec<String>,
}

/// Canonical roster rows tagged with the owning manager and team id.
pub fn roster_rows(team_id: &str, roster: &Roster) -> Vec<Row> {
    let manager = roster.manager_or_default(team_id);
    roster
        .players
        .iter()
        .map(|p| {
            let mut row = p.to_row();
            row.insert(MANAGER.to_string(), manager.clone());
            row.insert(TEAM_ID.to_string(), team_id.to_string());
            row
        })
        .collect()
}

fn write_rows(path: &Path, rows: &[Row]) -> Result<usize, FfmError> {
    let columns = order_columns(rows, CSV_COLUMNS, &[MANAGER, TEAM_ID]);
    write_csv(path, &columns, rows)
}

pub struct League {
    pages: Box<dyn PageSource>,
    output_dir: PathBuf,
}

impl League {
    pub fn new(pages: Box<dyn PageSource>, output_dir: impl Into<PathBuf>) -> Self {
        League {
            pages,
            output_dir: output_dir.into(),
        }
    }

    /// All teams in the league, in table order.
    pub async fn get_all_teams(&self, source: &str) -> Result<Vec<TeamRecord>, FfmError> {
        dispatch(source)?.fetch_teams(self.pages.as_ref()).await
    }

    /// One team's canonical roster, tagged with the resolved source name.
    /// `Ok(None)` means the source had no data for the team.
    pub async fn get_roster(
        &self,
        team_id: &str,
        source: &str,
    ) -> Result<Option<Roster>, FfmError> {
        let source = dispatch(source)?;
        let Some(raw) = source.fetch_roster(self.pages.as_ref(), team_id).await? else {
            return Ok(None);
        };
        let name = source.kind().name();
        let players = canonicalize_for(&raw.players, name, RecordKind::Roster)?;
        Ok(Some(Roster {
            source: name.to_string(),
            manager_name: raw.manager_name,
            players,
        }))
    }

    /// Fetch several rosters one after another. A team that errors or has no
    /// players goes on the failed list; the rest still run. An unknown source
    /// fails up front.
    pub async fn get_rosters(
        &self,
        team_ids: &[String],
        source: &str,
    ) -> Result<BatchResult, FfmError> {
        dispatch(source)?;
        let mut result = BatchResult::default();
        for team_id in team_ids {
            info!("fetching roster for team {team_id}");
            match self.get_roster(team_id, source).await {
                Ok(Some(roster)) if !roster.is_empty() => {
                    result.processed.push((team_id.clone(), roster));
                }
                Ok(_) => {
                    warn!("no roster data for team {team_id}");
                    result.failed.push(team_id.clone());
                }
                Err(e) => {
                    error!("failed to fetch team {team_id}: {e}");
                    result.failed.push(team_id.clone());
                }
            }
        }
        Ok(result)
    }

    /// Write one roster to CSV. The default file is
    /// `team_{id}_roster.csv` under the output directory.
    pub fn export_team_csv(
        &self,
        team_id: &str,
        roster: &Roster,
        requested: Option<&str>,
    ) -> Result<PathBuf, FfmError> {
        if roster.is_empty() {
            return Err(FfmError::DataValidation(format!(
                "no players to export for team {team_id}"
            )));
        }
        let path = resolve_output_path(requested, &team_csv_name(team_id), &self.output_dir);
        write_rows(&path, &roster_rows(team_id, roster))?;
        Ok(path)
    }

    /// Fetch every listed team and write all rosters to one CSV. Teams that
    /// fail are skipped and reported; if none produce players the export
    /// fails.
    pub async fn export_unified_csv(
        &self,
        team_ids: &[String],
        source: &str,
        requested: Option<&str>,
    ) -> Result<UnifiedExport, FfmError> {
        if team_ids.is_empty() {
            return Err(FfmError::DataValidation("no team ids given for unified export".into()));
        }
        let batch = self.get_rosters(team_ids, source).await?;
        let rows: Vec<Row> = batch
            .processed
            .iter()
            .flat_map(|(id, roster)| roster_rows(id, roster))
            .collect();
        if rows.is_empty() {
            return Err(FfmError::DataValidation(
                "no player data collected for unified export".into(),
            ));
        }

        let path = resolve_output_path(requested, UNIFIED_CSV_NAME, &self.output_dir);
        let players = write_rows(&path, &rows)?;
        if !batch.failed.is_empty() {
            warn!("skipped teams: {}", batch.failed.join(", "));
        }
        info!("unified export: {players} players from {} teams", batch.processed.len());
        Ok(UnifiedExport {
            path,
            players,
            teams: batch.processed.len(),
            skipped: batch.failed,
        })
    }

    /// Free agents from the source, canonicalized and filtered. No data is an
    /// empty list.
    pub async fn get_players(
        &self,
        source: &str,
        filters: &PlayerFilters,
    ) -> Result<Vec<CanonicalPlayer>, FfmError> {
        let Some(raw) = dispatch(source)?.fetch_players(self.pages.as_ref()).await? else {
            return Ok(Vec::new());
        };
        let players = canonicalize_for(&raw, source, RecordKind::FreeAgents)?;
        Ok(filters.apply(players))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
