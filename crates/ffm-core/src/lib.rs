// Fantasy football league scraper: pages -> source-shaped rows -> canonical
// player records -> tables and CSV.

pub mod canonical;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod filters;
pub mod infer;
pub mod league;
pub mod model;
pub mod parse;
pub mod sources;

pub use canonical::{CanonicalPlayer, Field};
pub use config::{Config, ConfigError, FetchMode};
pub use error::FfmError;
pub use fetch::{LivePages, Page, PageSource, SessionState, SnapshotPages};
pub use filters::PlayerFilters;
pub use league::{BatchResult, League, UnifiedExport};
pub use model::{RawRecord, RawRoster, RecordKind, Roster, TeamRecord};
pub use sources::{dispatch, LeagueRef, Source, SourceKind};
