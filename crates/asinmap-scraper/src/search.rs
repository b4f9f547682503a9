//! Extraction of search results into a [`ResultSet`].

use asinmap_core::{ResultSet, SearchListing};

use crate::dom::Page;

/// Element id the source renders when a search matches nothing.
const NO_RESULTS_ID: &str = "#noResultsTitle";
/// Detail-page anchors inside the result list.
const RESULT_LINK_SELECTOR: &str = "li.s-result-item a.s-access-detail-page";

/// Reads one search-results page.
///
/// A page carrying the explicit zero-match element becomes
/// [`ResultSet::NoResults`]; otherwise every result anchor with both a
/// `title` and an `href` becomes a listing, in page order. An unusable or
/// empty document yields an empty listing vector, which downstream stages
/// treat as "nothing matched" rather than an error.
#[must_use]
pub fn parse_search_results(page: &Page) -> ResultSet {
    if page.find_first(NO_RESULTS_ID).is_some() {
        tracing::debug!("source reported no results");
        return ResultSet::NoResults;
    }

    let mut listings = Vec::new();
    for anchor in page.find_all(RESULT_LINK_SELECTOR) {
        let (Some(title), Some(link)) = (anchor.attr("title"), anchor.attr("href")) else {
            continue;
        };
        listings.push(SearchListing {
            title: title.to_string(),
            link: link.to_string(),
        });
    }
    ResultSet::Listings(listings)
}
