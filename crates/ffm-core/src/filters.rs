// Client-side filters for player listings.

use std::cmp::Ordering;

use crate::canonical::{CanonicalPlayer, Field};
use crate::parse::text::parse_numeric;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilters {
    /// Comma-separated positions, matched exactly and case-insensitively.
    pub positions: Option<String>,
    /// Substring of the status, case-insensitive.
    pub status: Option<String>,
    /// Comma-separated team abbreviations, matched exactly and
    /// case-insensitively.
    pub teams: Option<String>,
    pub limit: Option<usize>,
}

fn upper_list(csv: &Option<String>) -> Option<Vec<String>> {
    let list: Vec<String> = csv
        .as_deref()?
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    (!list.is_empty()).then_some(list)
}

fn projected(p: &CanonicalPlayer) -> f64 {
    parse_numeric(p.get(Field::ProjectedPoints)).unwrap_or(0.0)
}

impl PlayerFilters {
    /// Filter, sort by projected points (highest first; unparseable counts as
    /// zero), then limit. The sort is stable.
    pub fn apply(&self, mut players: Vec<CanonicalPlayer>) -> Vec<CanonicalPlayer> {
        if let Some(positions) = upper_list(&self.positions) {
            players.retain(|p| positions.contains(&p.get(Field::Position).to_uppercase()));
        }
        if let Some(status) = self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let status = status.to_uppercase();
            players.retain(|p| p.get(Field::Status).to_uppercase().contains(&status));
        }
        if let Some(teams) = upper_list(&self.teams) {
            players.retain(|p| teams.contains(&p.get(Field::Team).to_uppercase()));
        }

        players.sort_by(|a, b| projected(b).partial_cmp(&projected(a)).unwrap_or(Ordering::Equal));

        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            players.truncate(limit);
        }
        players
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
