// ESPN fantasy football.

use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, info, warn};

use super::{LeagueRef, Source, SourceKind};
use crate::error::FfmError;
use crate::fetch::{Page, PageSource};
use crate::infer::split::{POSITIONS, TEAMS};
use crate::infer::FirstMatchSplitter;
use crate::model::{RawRecord, RawRoster, TeamRecord};
use crate::parse::text::find;
use crate::parse::{extract_free_agents, extract_roster, extract_teams};

const BASE_URL: &str = "https://fantasy.espn.com/football";

const SPLITTER: FirstMatchSplitter = FirstMatchSplitter {
    positions: POSITIONS,
    teams: TEAMS,
};

/// Where the team or manager name sits on a roster page, most specific first.
const MANAGER_SELECTORS: &[&str] = &[
    ".teamName.truncate",
    ".teamName",
    "h1",
    ".team-name",
    ".manager-name",
    "[data-testid='team-name']",
    ".team-header h1",
    ".team-header h2",
];

pub fn page_url(league: &LeagueRef, page: &Page) -> String {
    let LeagueRef { league_id, season } = league;
    match page {
        Page::Teams => format!("{BASE_URL}/league/members?leagueId={league_id}&seasonId={season}"),
        Page::Roster { team_id } => {
            format!("{BASE_URL}/team?leagueId={league_id}&teamId={team_id}&seasonId={season}")
        }
        Page::FreeAgents => {
            format!("{BASE_URL}/players/add?leagueId={league_id}&seasonId={season}")
        }
    }
}

/// Manager label from a roster page: the first non-empty text among
/// [`MANAGER_SELECTORS`], with any `Team {id}` placeholder removed. Falls back
/// to `Manager{id}`.
pub fn manager_name(html: &str, team_id: &str) -> String {
    let doc = Html::parse_document(html);
    let root = doc.root_element();
    let placeholder = format!("Team {team_id}");

    for css in MANAGER_SELECTORS {
        let Some(el) = find(&root, css) else {
            continue;
        };
        let text = el
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let text = text.replace(&placeholder, "");
        let text = text.trim();
        if !text.is_empty() {
            debug!("manager name for team {team_id} from `{css}`: {text}");
            return text.to_string();
        }
    }
    format!("Manager{team_id}")
}

pub struct Espn;

#[async_trait]
impl Source for Espn {
    fn kind(&self) -> SourceKind {
        SourceKind::Espn
    }

    async fn fetch_roster(
        &self,
        pages: &dyn PageSource,
        team_id: &str,
    ) -> Result<Option<RawRoster>, FfmError> {
        let html = pages.fetch(SourceKind::Espn, &Page::roster(team_id)).await?;
        let Some(players) = extract_roster(&html, &SPLITTER) else {
            warn!("no roster table on the page for team {team_id}");
            return Ok(None);
        };
        let manager_name = manager_name(&html, team_id);
        info!("team {team_id}: {} players, manager {manager_name}", players.len());
        Ok(Some(RawRoster {
            manager_name,
            players,
        }))
    }

    async fn fetch_teams(&self, pages: &dyn PageSource) -> Result<Vec<TeamRecord>, FfmError> {
        let html = pages.fetch(SourceKind::Espn, &Page::Teams).await?;
        let teams = extract_teams(&html, &SPLITTER);
        info!("found {} teams", teams.len());
        Ok(teams)
    }

    async fn fetch_players(
        &self,
        pages: &dyn PageSource,
    ) -> Result<Option<Vec<RawRecord>>, FfmError> {
        let html = pages.fetch(SourceKind::Espn, &Page::FreeAgents).await?;
        let players = extract_free_agents(&html, &SPLITTER);
        match &players {
            Some(p) => info!("found {} free agents", p.len()),
            None => warn!("no player table on the free agents page"),
        }
        Ok(players)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
