//! Description-region extraction for disambiguating ambiguous titles.

use crate::dom::Page;

/// Dedicated description region; preferred because comparing against the
/// whole page would drown the fuzzy match in unrelated text.
const DESCRIPTION_SELECTOR: &str = "#productDescription";
/// Feature/attribute bullets; consulted only when the description region
/// is absent.
const FEATURES_SELECTOR: &str = "#feature-bullets";

/// Pulls the comparable description text from a product page: the
/// description region if present, else the feature bullets, normalized for
/// fuzzy comparison. `None` when the page exposes neither region.
#[must_use]
pub fn extract_description(page: &Page) -> Option<String> {
    if let Some(region) = page.find_first(DESCRIPTION_SELECTOR) {
        let text = clean_text(&region.text());
        tracing::debug!(text = %text, "found description region");
        return Some(text);
    }
    if let Some(region) = page.find_first(FEATURES_SELECTOR) {
        let text = clean_text(&region.text());
        tracing::debug!(text = %text, "found feature region");
        return Some(text);
    }
    None
}

/// Normalizes extracted page text: markup and entities are already gone
/// after parsing, so this trims, drops surrounding double-quotes, and
/// collapses internal whitespace runs to single spaces.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('"').trim();
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
