//! Candidate ranking over one query's search results.

use crate::similarity::{similarity, MINIMUM_MATCH_LEVEL};

/// One (title, link) pair lifted from a search-results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchListing {
    pub title: String,
    pub link: String,
}

/// The results of one search query.
///
/// `NoResults` means the source explicitly reported zero matches; it is
/// distinct from `Listings` with an empty vector, which means the page was
/// unusable or carried no parseable entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSet {
    NoResults,
    Listings(Vec<SearchListing>),
}

impl ResultSet {
    /// The listings to iterate for description matching; empty for
    /// `NoResults`.
    #[must_use]
    pub fn listings(&self) -> &[SearchListing] {
        match self {
            ResultSet::NoResults => &[],
            ResultSet::Listings(listings) => listings,
        }
    }
}

/// A listing scored against the query name. Scores are recomputed for every
/// comparison; they are never carried across queries.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub title: String,
    pub link: String,
    pub score: f64,
}

/// Scores every listing title against `query_name` and returns the
/// strictly-best candidate, provided it clears [`MINIMUM_MATCH_LEVEL`].
/// Ties keep the first listing encountered. `None` signals the caller to
/// relax the query or fall back to description matching.
#[must_use]
pub fn rank(query_name: &str, results: &ResultSet) -> Option<ScoredCandidate> {
    let listings = match results {
        ResultSet::NoResults => return None,
        ResultSet::Listings(listings) => listings,
    };

    let mut best: Option<ScoredCandidate> = None;
    for listing in listings {
        let score = similarity(query_name, &listing.title);
        tracing::debug!(score, title = %listing.title, "scored listing");
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(ScoredCandidate {
                title: listing.title.clone(),
                link: listing.link.clone(),
                score,
            });
        }
    }

    let best = best?;
    tracing::debug!(score = best.score, title = %best.title, "best listing");
    if best.score >= MINIMUM_MATCH_LEVEL {
        Some(best)
    } else {
        None
    }
}
