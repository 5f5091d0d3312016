// Saved-HTML page source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{Page, PageSource};
use crate::error::FfmError;
use crate::sources::SourceKind;

/// Reads pages saved from the browser.
///
/// Rosters are `team_{id}.html` and free agents `free_agents.html` under the
/// snapshot directory; the members table is read from `teams_file`.
#[derive(Debug, Clone)]
pub struct SnapshotPages {
    dir: PathBuf,
    teams_file: PathBuf,
}

impl SnapshotPages {
    pub fn new(dir: impl Into<PathBuf>, teams_file: impl Into<PathBuf>) -> Self {
        SnapshotPages {
            dir: dir.into(),
            teams_file: teams_file.into(),
        }
    }

    /// Same snapshot directory, different members table file.
    pub fn with_teams_file(mut self, teams_file: impl Into<PathBuf>) -> Self {
        self.teams_file = teams_file.into();
        self
    }

    pub fn path_for(&self, page: &Page) -> PathBuf {
        match page {
            Page::Teams => self.teams_file.clone(),
            Page::Roster { team_id } => self.dir.join(format!("team_{team_id}.html")),
            Page::FreeAgents => self.dir.join("free_agents.html"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl PageSource for SnapshotPages {
    async fn fetch(&self, source: SourceKind, page: &Page) -> Result<String, FfmError> {
        let path = self.path_for(page);
        debug!("reading {source} {page} from {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FfmError::fetch(path.display().to_string(), e))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
