use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::catalog::{FacetSummary, ListingPhase, ListingResult, ListingState};
use crate::query::FilterModel;

const NAME_COLUMN: usize = 28;
const FACET_COLUMN: usize = 20;
const PAGE_WINDOW: u32 = 2;

/// Plain-text view of the listing plus the controls that act on it.
pub fn render_listing(listing: &ListingState, model: &FilterModel) -> String {
    let mut out = String::new();

    if let Some(term) = model.search_term() {
        let _ = writeln!(out, "search: {term}");
    }
    let selection = render_selection(model);
    if !selection.is_empty() {
        let _ = writeln!(out, "{selection}");
    }

    if listing.is_loading() {
        let _ = writeln!(out, "loading...");
    }
    if listing.phase() == ListingPhase::Failed
        && let Some(failure) = listing.failure()
    {
        let hint = if failure.retryable {
            " (type `retry` to try again)"
        } else {
            ""
        };
        let _ = writeln!(out, "error: {}{hint}", failure.message);
    }

    match listing.result() {
        Some(result) => render_result(&mut out, result, model),
        None if listing.phase() == ListingPhase::Idle => {
            let _ = writeln!(out, "not a listing route");
        }
        None => {}
    }

    out.trim_end().to_string()
}

/// Selected values as removable chips, `key[index]=value`.
pub fn render_selection(model: &FilterModel) -> String {
    let chips: Vec<String> = model
        .values()
        .iter()
        .flat_map(|(key, values)| {
            values
                .iter()
                .enumerate()
                .map(move |(index, value)| format!("[{key}[{index}]={value} x]"))
        })
        .collect();
    if chips.is_empty() {
        return String::new();
    }
    format!("selected: {}", chips.join(" "))
}

fn render_result(out: &mut String, result: &ListingResult, model: &FilterModel) {
    if result.items.is_empty() {
        let _ = writeln!(out, "No products found");
    }
    for product in &result.items {
        let name = if product.name.is_empty() {
            product.id.as_str()
        } else {
            product.name.as_str()
        };
        let description = product.description.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "  {}  {}",
            pad_to_width(name, NAME_COLUMN),
            description.trim()
        );
    }

    for facet in result.facets() {
        render_facet(out, facet, model);
    }

    let total_pages = result.total_pages();
    if total_pages > 1 {
        let _ = writeln!(out, "pages: {}", page_links(model.page(), total_pages));
    }
}

/// First, last and a window around `current`; gaps collapse to `...`.
fn page_links(current: u32, total_pages: u32) -> String {
    let end = current.saturating_add(PAGE_WINDOW).min(total_pages);
    let start = current.saturating_sub(PAGE_WINDOW).max(1).min(end);

    let mut links = Vec::new();
    if start > 1 {
        links.push("1".to_string());
        if start > 2 {
            links.push("...".to_string());
        }
    }
    for page in start..=end {
        if page == current {
            links.push(format!("[{page}]"));
        } else {
            links.push(page.to_string());
        }
    }
    if end < total_pages {
        if end + 1 < total_pages {
            links.push("...".to_string());
        }
        links.push(total_pages.to_string());
    }
    links.join(" ")
}

fn render_facet(out: &mut String, facet: &FacetSummary, model: &FilterModel) {
    let key = facet.filter_key();
    let selected = model.selected(key);
    let _ = writeln!(out, "{} ({key})", facet.name);
    for value in &facet.values {
        let marker = if selected.contains(&value.value) {
            "[x]"
        } else {
            "[ ]"
        };
        let _ = writeln!(
            out,
            "  {marker} {} {}",
            pad_to_width(&value.value, FACET_COLUMN),
            value.count
        );
    }
}

fn pad_to_width(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    let mut padded = String::with_capacity(text.len() + width - used);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', width - used));
    padded
}
