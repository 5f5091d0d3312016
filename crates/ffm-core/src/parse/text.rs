// Small helpers for pulling text out of scraped elements.

use scraper::{ElementRef, Selector};

/// Parse a selector literal. Every selector in this crate is a constant, so a
/// failure here is a typo; it degrades to "matches nothing" instead of
/// aborting the scrape.
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::error!("invalid selector {css:?}: {e}");
            None
        }
    }
}

/// First descendant of `el` matching `css`.
pub fn find<'a>(el: &ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    el.select(&sel).next()
}

/// All descendants of `el` matching `css`, in document order.
pub fn find_all<'a>(el: &ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => el.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// Element text with every text node trimmed and concatenated without a
/// separator. Adjacent inline spans therefore run together ("J. SmithKCRB"),
/// which is what the name/team/position splitter expects.
pub fn stripped_text(el: &ElementRef<'_>) -> String {
    el.text().map(str::trim).collect::<String>()
}

/// Whether the element's `class` attribute contains `class`.
pub fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Lenient numeric parse for stat cells: `--` and empty are "no value",
/// `%` and `+` are stripped, a leading `-` keeps its sign.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() || t == "--" {
        return None;
    }
    let cleaned: String = t.chars().filter(|c| *c != '%' && *c != '+').collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
