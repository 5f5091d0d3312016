//! Page sources: where page markup comes from.
//!
//! The pipeline only ever asks for the HTML of one page at a time. A
//! [`PageSource`] answers from saved snapshots ([`SnapshotPages`]) or over
//! HTTP with the stored session ([`LivePages`]).

pub mod http;
pub mod session;
pub mod snapshot;

use std::fmt;

use async_trait::async_trait;

use crate::error::FfmError;
use crate::sources::SourceKind;

pub use http::LivePages;
pub use session::{Cookie, SessionState};
pub use snapshot::SnapshotPages;

/// A page the pipeline can ask for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Page {
    /// The league members table.
    Teams,
    /// One team's roster page.
    Roster { team_id: String },
    /// The free-agent listing.
    FreeAgents,
}

impl Page {
    pub fn roster(team_id: impl Into<String>) -> Self {
        Page::Roster {
            team_id: team_id.into(),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Teams => f.write_str("league members page"),
            Page::Roster { team_id } => write!(f, "roster page for team {team_id}"),
            Page::FreeAgents => f.write_str("free agents page"),
        }
    }
}

/// Produces the full markup of a page.
///
/// Each call is independent. Implementations may block for a fixed settle
/// delay but never retry.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, source: SourceKind, page: &Page) -> Result<String, FfmError>;
}
