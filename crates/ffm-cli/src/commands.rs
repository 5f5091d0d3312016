// Command handlers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use ffm_core::export::{free_agents_table, roster_table, teams_table};
use ffm_core::{
    Config, FetchMode, League, LeagueRef, LivePages, PageSource, PlayerFilters, Roster,
    SessionState, SnapshotPages, SourceKind,
};
use tracing::{info, warn};

use crate::{rooted, terminal, Command};

pub struct App {
    base: PathBuf,
    config: Config,
}

impl App {
    pub fn new(base: PathBuf, config: Config) -> Self {
        App { base, config }
    }

    fn path(&self, p: &str) -> PathBuf {
        rooted(&self.base, p)
    }

    fn source_name(&self, requested: Option<String>) -> anyhow::Result<String> {
        let name = requested.unwrap_or_else(|| self.config.league.source.clone());
        // Unknown names fail here, before any fetching.
        SourceKind::resolve(&name)?;
        Ok(name)
    }

    fn snapshot_pages(&self) -> SnapshotPages {
        SnapshotPages::new(
            self.path(&self.config.fetch.snapshot_dir),
            self.path(&self.config.paths.teams_file),
        )
    }

    fn page_source(&self) -> anyhow::Result<Box<dyn PageSource>> {
        match self.config.fetch.mode {
            FetchMode::Snapshot => {
                let pages = self.snapshot_pages();
                info!("reading saved pages from {}", pages.dir().display());
                Ok(Box::new(pages))
            }
            FetchMode::Live => {
                let league =
                    LeagueRef::new(&self.config.league.league_id, self.config.league.season());
                let session = SessionState::load(&self.path(&self.config.paths.session_file));
                if session.is_none() {
                    terminal::warn(
                        "No saved session; fetching anonymously (some data may be hidden)",
                    );
                }
                let pages = LivePages::new(
                    league,
                    session,
                    &self.config.fetch.user_agent,
                    Duration::from_millis(self.config.fetch.settle_delay_ms),
                )?;
                Ok(Box::new(pages))
            }
        }
    }

    fn league(&self, pages: Box<dyn PageSource>) -> League {
        League::new(pages, self.path(&self.config.paths.output_dir))
    }

    pub async fn run(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::ListTeams { input, source } => self.list_teams(input, source).await,
            Command::DumpTeams {
                teams,
                all,
                source,
                output,
                csv,
                unified_csv,
            } => {
                let source = self.source_name(source)?;
                if unified_csv {
                    self.unified_export(&source, output.as_deref()).await
                } else {
                    self.dump_teams(teams, all, &source, output.as_deref(), csv).await
                }
            }
            Command::ListFreeAgents {
                position,
                status,
                team,
                limit,
                verbose,
            } => {
                let filters = PlayerFilters {
                    positions: position,
                    status,
                    teams: team,
                    limit,
                };
                self.list_free_agents(&filters, verbose).await
            }
            Command::ImportSession { file } => self.import_session(&file),
        }
    }

    async fn list_teams(
        &self,
        input: Option<PathBuf>,
        source: Option<String>,
    ) -> anyhow::Result<()> {
        let source = self.source_name(source)?;
        let pages: Box<dyn PageSource> = match input {
            Some(file) => Box::new(self.snapshot_pages().with_teams_file(file)),
            None => self.page_source()?,
        };
        let teams = self
            .league(pages)
            .get_all_teams(&source)
            .await
            .context("failed to list teams")?;

        if teams.is_empty() {
            terminal::warn("No teams found.");
            return Ok(());
        }
        terminal::block(&teams_table(&teams).render());
        terminal::success(&format!("Found {} teams", teams.len()));
        Ok(())
    }

    async fn all_team_ids(&self, league: &League, source: &str) -> anyhow::Result<Vec<String>> {
        terminal::progress("Fetching team list...");
        let teams = league
            .get_all_teams(source)
            .await
            .context("failed to list teams")?;
        if teams.is_empty() {
            bail!("no teams found in the league");
        }
        Ok(teams.into_iter().map(|t| t.team_id).collect())
    }

    fn show_roster(&self, team_id: &str, roster: &Roster) {
        terminal::heading(&format!(
            "Team {team_id} Roster ({} players):",
            roster.players.len()
        ));
        terminal::block(&roster_table(roster, self.config.display.max_cell_width).render());
    }

    fn export_roster(
        &self,
        league: &League,
        team_id: &str,
        roster: &Roster,
        output: Option<&str>,
    ) -> anyhow::Result<()> {
        let path = league
            .export_team_csv(team_id, roster, output)
            .with_context(|| format!("failed to export team {team_id}"))?;
        terminal::success(&format!("Exported team {team_id} to {}", path.display()));
        Ok(())
    }

    async fn dump_teams(
        &self,
        teams: Vec<String>,
        all: bool,
        source: &str,
        output: Option<&str>,
        csv: bool,
    ) -> anyhow::Result<()> {
        let league = self.league(self.page_source()?);
        // clap requires exactly one of --team and --all.
        let team_ids = if all {
            self.all_team_ids(&league, source).await?
        } else {
            teams
        };

        // One team: surface its error directly.
        if let [team_id] = team_ids.as_slice() {
            terminal::progress(&format!("Fetching roster for team {team_id}..."));
            let roster = league
                .get_roster(team_id, source)
                .await
                .with_context(|| format!("failed to fetch team {team_id}"))?
                .filter(|r| !r.is_empty())
                .ok_or_else(|| anyhow!("no roster data found for team {team_id}"))?;
            self.show_roster(team_id, &roster);
            if csv {
                self.export_roster(&league, team_id, &roster, output)?;
            }
            return Ok(());
        }

        // Several teams share one --output path only if it is a unified file.
        let output = match output {
            Some(path) if csv => {
                warn!("ignoring --output {path} for a multi-team dump");
                terminal::warn("--output applies to single-team dumps; using default file names");
                None
            }
            other => other,
        };

        terminal::progress(&format!("Fetching {} rosters...", team_ids.len()));
        let batch = league.get_rosters(&team_ids, source).await?;
        for (team_id, roster) in &batch.processed {
            self.show_roster(team_id, roster);
            if csv {
                self.export_roster(&league, team_id, roster, output)?;
            }
        }

        let processed: Vec<&str> = batch.processed.iter().map(|(id, _)| id.as_str()).collect();
        terminal::heading("Summary:");
        terminal::success(&format!(
            "Processed {} teams: {}",
            processed.len(),
            processed.join(", ")
        ));
        if !batch.failed.is_empty() {
            terminal::warn(&format!(
                "Failed {} teams: {}",
                batch.failed.len(),
                batch.failed.join(", ")
            ));
        }
        if processed.is_empty() {
            bail!("no roster data for any requested team");
        }
        Ok(())
    }

    async fn unified_export(&self, source: &str, output: Option<&str>) -> anyhow::Result<()> {
        let league = self.league(self.page_source()?);
        let team_ids = self.all_team_ids(&league, source).await?;
        terminal::progress(&format!("Exporting {} teams to one CSV...", team_ids.len()));

        let output = output.map(with_csv_extension);
        let export = league
            .export_unified_csv(&team_ids, source, output.as_deref())
            .await
            .context("unified export failed")?;
        terminal::success(&format!(
            "Exported {} players from {} teams to {}",
            export.players,
            export.teams,
            export.path.display()
        ));
        if !export.skipped.is_empty() {
            terminal::warn(&format!("Skipped teams: {}", export.skipped.join(", ")));
        }
        Ok(())
    }

    async fn list_free_agents(&self, filters: &PlayerFilters, verbose: bool) -> anyhow::Result<()> {
        let source = self.source_name(None)?;
        let league = self.league(self.page_source()?);
        terminal::progress("Fetching free agents...");
        let players = league
            .get_players(&source, filters)
            .await
            .context("failed to list free agents")?;

        if players.is_empty() {
            terminal::warn("No players found matching the filters.");
            return Ok(());
        }
        terminal::heading(&format!("Found {} players:", players.len()));
        terminal::block(&free_agents_table(&players, verbose).render());
        Ok(())
    }

    fn import_session(&self, file: &Path) -> anyhow::Result<()> {
        let dest = self.path(&self.config.paths.session_file);
        let state = SessionState::import(file, &dest)
            .with_context(|| format!("failed to import session from {}", file.display()))?;
        terminal::success(&format!(
            "Saved session with {} cookies to {}",
            state.cookies.len(),
            dest.display()
        ));
        Ok(())
    }
}

/// Unified export names always end in `.csv`.
fn with_csv_extension(name: &str) -> String {
    if name.ends_with(".csv") {
        name.to_string()
    } else {
        format!("{name}.csv")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
