// Page extractor: find the data table in a document, run the row parser over
// its body rows and keep the rows that are real records.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::columns::layout_for;
use super::row::parse_row;
use super::text::{find, find_all, has_class};
use crate::infer::{infer_roster_status, InfoSplitter, StatusInput};
use crate::model::{RawRecord, RecordKind, TeamRecord};

/// Scroll container -> table -> body, the layout the site renders.
const PRIMARY_BODY: &str = "div.Table__Scroller table tbody";

/// Player-name values that mark a non-player row.
const SENTINEL_NAMES: &[&str] = &["TOTALS", "MOVE", "Unknown"];

/// Row classes that mark aggregate rows.
const TOTAL_ROW_CLASSES: &[&str] = &["total-col", "Table__TR--total", "totals"];

/// Extract rows of `kind` from a full document.
///
/// Returns `None` when the document has no table at all. Callers read that as
/// "no data for this page" (bye week, page not fully loaded), not as a fault.
/// Output order is document order.
pub fn extract_records(
    html: &str,
    kind: RecordKind,
    splitter: &dyn InfoSplitter,
) -> Option<Vec<RawRecord>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let (table, body) = locate_body(&root)?;
    let header = find(&table, "thead").map(|h| h.text().collect::<Vec<_>>().join(" "));
    let layout = layout_for(kind, header.as_deref());
    debug!("extracting {kind} rows with layout {}", layout.name);

    let mut records = Vec::new();
    for tr in find_all(&body, "tr") {
        if is_total_row(&tr) {
            continue;
        }
        let mut rec = parse_row(&tr, layout, splitter);
        if !is_record(&rec, kind) {
            continue;
        }
        if kind == RecordKind::Roster {
            let status = roster_status(&rec, records.len());
            rec.insert("Roster Status".to_string(), status);
        }
        records.push(rec);
    }
    Some(records)
}

/// Roster rows, with `Roster Status` filled in.
pub fn extract_roster(html: &str, splitter: &dyn InfoSplitter) -> Option<Vec<RawRecord>> {
    extract_records(html, RecordKind::Roster, splitter)
}

/// Free-agent rows. Header rows are dropped by the layout's minimum cell
/// count.
pub fn extract_free_agents(html: &str, splitter: &dyn InfoSplitter) -> Option<Vec<RawRecord>> {
    extract_records(html, RecordKind::FreeAgents, splitter)
}

/// League member rows. A document without a table has no teams.
pub fn extract_teams(html: &str, splitter: &dyn InfoSplitter) -> Vec<TeamRecord> {
    extract_records(html, RecordKind::Teams, splitter)
        .unwrap_or_default()
        .iter()
        .filter_map(TeamRecord::from_raw)
        .collect()
}

fn locate_body<'a>(root: &ElementRef<'a>) -> Option<(ElementRef<'a>, ElementRef<'a>)> {
    if let Some(body) = find(root, PRIMARY_BODY) {
        let table = body
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "table")
            .unwrap_or(body);
        return Some((table, body));
    }
    let table = find(root, "table")?;
    debug!("primary table path missing, using first table in document");
    let body = find(&table, "tbody").unwrap_or(table);
    Some((table, body))
}

fn is_total_row(tr: &ElementRef<'_>) -> bool {
    TOTAL_ROW_CLASSES.iter().any(|c| has_class(tr, c)) || tr.value().attr("data-total").is_some()
}

fn is_record(rec: &RawRecord, kind: RecordKind) -> bool {
    let get = |k: &str| rec.get(k).map(|v| v.trim()).unwrap_or("");
    match kind {
        RecordKind::Teams => !get("team_id").is_empty(),
        RecordKind::FreeAgents => !get("name").is_empty(),
        RecordKind::Roster => {
            let name = get("Player Name");
            !name.is_empty() && !SENTINEL_NAMES.contains(&name) && get("Opponent") != "TOTALS"
        }
    }
}

/// The slot cell is the position input; an `IR` slot counts as status text.
fn roster_status(rec: &RawRecord, row_index: usize) -> String {
    let get = |k: &str| rec.get(k).map(String::as_str).unwrap_or("");
    let slot = get("Slot").trim();
    let position = if slot.is_empty() { get("Position") } else { slot };
    let status_text = if slot.eq_ignore_ascii_case("IR") {
        format!("{} IR", get("Status"))
    } else {
        get("Status").to_string()
    };
    infer_roster_status(&StatusInput {
        status_text: &status_text,
        projected_points: get("Projected Points"),
        position,
        row_index,
        start_pct: get("Start %"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
