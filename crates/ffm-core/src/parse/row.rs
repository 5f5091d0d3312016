// Row parser: one table row -> one source-shaped field map.

use scraper::{ElementRef, Html};

use super::columns::{CellKind, ColumnLayout, PlayerFields};
use super::text::{find, find_all, stripped_text};
use crate::infer::InfoSplitter;
use crate::model::RawRecord;

/// Nested elements that hold just the player's name, most specific first.
const NAME_SELECTORS: &[&str] = &["span.truncate a", "span.truncate", ".player-name"];
const TEAM_SELECTOR: &str = "span.playerinfo__playerteam";
const POSITION_SELECTOR: &str = "span.playerinfo__playerpos";
const INJURY_SELECTOR: &str = "span.playerinfo__injurystatus";

/// Parse a row element against `layout`.
///
/// Cells whose index is not in the layout are ignored. A row with fewer
/// cells than the layout requires yields an empty map; deciding whether a
/// row is a real player is left to the page extractor.
pub fn parse_row(
    row: &ElementRef<'_>,
    layout: &ColumnLayout,
    splitter: &dyn InfoSplitter,
) -> RawRecord {
    let mut out = RawRecord::new();
    let cells = find_all(row, "td");
    if cells.len() < layout.min_cells {
        return out;
    }

    for (i, td) in cells.iter().enumerate() {
        let Some(column) = layout.column(i) else {
            continue;
        };
        match column.kind {
            CellKind::Text => {
                out.insert(column.field.to_string(), stripped_text(td));
            }
            CellKind::TeamCell => {
                out.insert(column.field.to_string(), team_cell_text(td));
            }
            CellKind::Player(fields) => read_player_cell(td, fields, splitter, &mut out),
        }
    }
    out
}

/// Parse a standalone `<tr>...</tr>` fragment. The fragment is wrapped in a
/// table before parsing; HTML parsers discard row and cell tags found
/// outside one.
pub fn parse_row_html(
    fragment: &str,
    layout: &ColumnLayout,
    splitter: &dyn InfoSplitter,
) -> RawRecord {
    let doc = Html::parse_fragment(&format!("<table><tbody>{fragment}</tbody></table>"));
    match find(&doc.root_element(), "tr") {
        Some(tr) => parse_row(&tr, layout, splitter),
        None => RawRecord::new(),
    }
}

fn team_cell_text(td: &ElementRef<'_>) -> String {
    match find(td, "div.table--cell") {
        Some(cell) => match find(&cell, "span.teamName") {
            Some(name) => stripped_text(&name),
            None => stripped_text(&cell),
        },
        None => stripped_text(td),
    }
}

fn read_player_cell(
    td: &ElementRef<'_>,
    fields: &PlayerFields,
    splitter: &dyn InfoSplitter,
    out: &mut RawRecord,
) {
    let combined = stripped_text(td);
    let nested = |css: &str| find(td, css).map(|e| stripped_text(&e)).filter(|s| !s.is_empty());

    let name = NAME_SELECTORS.iter().find_map(|css| nested(*css));
    let mut team = nested(TEAM_SELECTOR).unwrap_or_default();
    let mut position = nested(POSITION_SELECTOR).unwrap_or_default();

    let name = match name {
        Some(name) => {
            if team.is_empty() || position.is_empty() {
                let info = splitter.split(&combined);
                if team.is_empty() {
                    team = info.team;
                }
                if position.is_empty() {
                    position = info.position;
                }
            }
            name
        }
        None => {
            let info = splitter.split(&combined);
            team = info.team;
            position = info.position;
            info.name
        }
    };

    out.insert(fields.name.to_string(), name);
    out.insert(fields.team.to_string(), team);
    out.insert(fields.position.to_string(), position);
    if let Some(injury_field) = fields.injury {
        if let Some(injury) = nested(INJURY_SELECTOR) {
            out.insert(injury_field.to_string(), injury);
        }
    }
    out.insert(fields.combined.to_string(), combined);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
