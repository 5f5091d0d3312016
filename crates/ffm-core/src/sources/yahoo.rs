// Yahoo fantasy football. Not implemented: every call reports "no data" so
// callers fall through to their empty-result handling.

use async_trait::async_trait;
use tracing::warn;

use super::{Source, SourceKind};
use crate::error::FfmError;
use crate::fetch::PageSource;
use crate::model::{RawRecord, RawRoster, TeamRecord};

pub struct Yahoo;

#[async_trait]
impl Source for Yahoo {
    fn kind(&self) -> SourceKind {
        SourceKind::Yahoo
    }

    async fn fetch_roster(
        &self,
        _pages: &dyn PageSource,
        team_id: &str,
    ) -> Result<Option<RawRoster>, FfmError> {
        warn!("yahoo source is not implemented; no roster for team {team_id}");
        Ok(None)
    }

    async fn fetch_teams(&self, _pages: &dyn PageSource) -> Result<Vec<TeamRecord>, FfmError> {
        warn!("yahoo source is not implemented; no teams");
        Ok(Vec::new())
    }

    async fn fetch_players(
        &self,
        _pages: &dyn PageSource,
    ) -> Result<Option<Vec<RawRecord>>, FfmError> {
        warn!("yahoo source is not implemented; no players");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Page;

    struct Unreachable;

    #[async_trait]
    impl PageSource for Unreachable {
        async fn fetch(&self, _source: SourceKind, page: &Page) -> Result<String, FfmError> {
            panic!("yahoo stub should not fetch {page}");
        }
    }

    #[tokio::test]
    async fn stub_returns_empty_without_fetching() {
        assert!(Yahoo.fetch_roster(&Unreachable, "1").await.unwrap().is_none());
        assert!(Yahoo.fetch_teams(&Unreachable).await.unwrap().is_empty());
        assert!(Yahoo.fetch_players(&Unreachable).await.unwrap().is_none());
    }
}
