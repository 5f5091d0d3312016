//! Source dispatcher: one implementation per fantasy platform behind a common
//! [`Source`] contract, looked up by name.

pub mod espn;
pub mod yahoo;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::FfmError;
use crate::fetch::{Page, PageSource};
use crate::model::{RawRecord, RawRoster, TeamRecord};

/// The league whose pages are being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueRef {
    pub league_id: String,
    pub season: u32,
}

impl LeagueRef {
    pub fn new(league_id: impl Into<String>, season: u32) -> Self {
        LeagueRef {
            league_id: league_id.into(),
            season,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Espn,
    Yahoo,
}

impl SourceKind {
    pub const NAMES: &'static [&'static str] = &["espn", "yahoo"];

    /// Look up a source by name (case-insensitive). Unknown names are a
    /// configuration error, never an empty result.
    pub fn resolve(name: &str) -> Result<SourceKind, FfmError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "espn" => Ok(SourceKind::Espn),
            "yahoo" => Ok(SourceKind::Yahoo),
            _ => Err(FfmError::UnknownSource(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Espn => "espn",
            SourceKind::Yahoo => "yahoo",
        }
    }

    pub fn source(&self) -> &'static dyn Source {
        match self {
            SourceKind::Espn => &espn::Espn,
            SourceKind::Yahoo => &yahoo::Yahoo,
        }
    }

    /// Web address of a page on this platform, if it has one.
    pub fn page_url(&self, league: &LeagueRef, page: &Page) -> Option<String> {
        match self {
            SourceKind::Espn => Some(espn::page_url(league, page)),
            SourceKind::Yahoo => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = FfmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::resolve(s)
    }
}

/// What every platform implementation provides.
///
/// `Ok(None)` and empty vectors mean "no data" (bye week, unloaded page,
/// unimplemented platform); callers degrade instead of failing. Errors are
/// reserved for fetch failures.
#[async_trait]
pub trait Source: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn fetch_roster(
        &self,
        pages: &dyn PageSource,
        team_id: &str,
    ) -> Result<Option<RawRoster>, FfmError>;

    async fn fetch_teams(&self, pages: &dyn PageSource) -> Result<Vec<TeamRecord>, FfmError>;

    async fn fetch_players(
        &self,
        pages: &dyn PageSource,
    ) -> Result<Option<Vec<RawRecord>>, FfmError>;
}

/// Route a source name to its implementation.
pub fn dispatch(name: &str) -> Result<&'static dyn Source, FfmError> {
    Ok(SourceKind::resolve(name)?.source())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!(SourceKind::resolve("espn").unwrap(), SourceKind::Espn);
        assert_eq!(SourceKind::resolve(" ESPN ").unwrap(), SourceKind::Espn);
        assert_eq!("yahoo".parse::<SourceKind>().unwrap(), SourceKind::Yahoo);
        for name in SourceKind::NAMES {
            assert_eq!(SourceKind::resolve(name).unwrap().name(), *name);
        }
    }

    #[test]
    fn unknown_source_is_an_error() {
        match dispatch("sleeper") {
            Err(FfmError::UnknownSource(name)) => assert_eq!(name, "sleeper"),
            Err(other) => panic!("expected UnknownSource, got: {other}"),
            Ok(_) => panic!("expected UnknownSource, got a source"),
        }
        assert!(dispatch("").is_err());
    }

    #[test]
    fn dispatch_returns_matching_kind() {
        assert_eq!(dispatch("espn").unwrap().kind(), SourceKind::Espn);
        assert_eq!(dispatch("yahoo").unwrap().kind(), SourceKind::Yahoo);
    }
}
