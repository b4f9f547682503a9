//! The per-row reconciliation driver.
//!
//! Each row walks the same ladder: ranked name queries in relaxation order,
//! then a description scan over the last result list, then variant
//! resolution on whichever candidate page was fixed. Every rung either
//! finalizes the row or hands it to the next; the row always ends in
//! exactly one success or failure record. Remote failures never escape a
//! row — a fetch error degrades to an empty document and flows through the
//! same ladder as "no match".

use asinmap_core::{
    is_match, rank, FailureReason, InputRow, QueryPlan, ResolutionOutcome, ResultSet,
    RunStatistics,
};
use asinmap_scraper::{extract_description, parse_search_results, resolve_asin, Page, PageClient};

use crate::io::{InputReader, OutcomeWriters};

pub(crate) struct Reconciler {
    client: PageClient,
    stats: RunStatistics,
}

impl Reconciler {
    pub(crate) fn new(client: PageClient) -> Self {
        Self {
            client,
            stats: RunStatistics::default(),
        }
    }

    /// Processes every input row in order, routing each outcome to its sink.
    /// Rows are fully resolved one at a time; per-row defects are recorded
    /// and recovered, only sink I/O errors propagate.
    pub(crate) async fn run(
        &mut self,
        reader: &mut InputReader,
        writers: &mut OutcomeWriters,
    ) -> anyhow::Result<RunStatistics> {
        while let Some((line_number, fields)) = reader.next_record()? {
            let outcome = self.process_row(line_number, &fields).await;
            self.stats.record(&outcome);
            writers.write(&outcome)?;
        }
        writers.flush()?;
        Ok(self.stats)
    }

    async fn process_row(&self, line_number: u64, fields: &[String]) -> ResolutionOutcome {
        let Some(row) = InputRow::from_fields(line_number, fields) else {
            tracing::warn!(line = line_number, "rejecting line - not enough fields");
            return ResolutionOutcome::Failure {
                line_number,
                sku: fields.first().cloned(),
                reason: FailureReason::NotEnoughFields,
            };
        };

        tracing::debug!(line = row.line_number, name = %row.name, "searching");

        // The last result list is retained for the description scan.
        let mut last_results = ResultSet::Listings(Vec::new());
        for query in QueryPlan::new(&row.name, &row.sku, &row.colour) {
            let results = self.search(&query).await;
            if let Some(best) = rank(&query, &results) {
                tracing::debug!(score = best.score, title = %best.title, "confident name match");
                let page = self.load_page(&best.link).await;
                return finalize(&page, &row);
            }
            tracing::debug!(query = %query, "no confident match; relaxing");
            last_results = results;
        }

        tracing::debug!(line = row.line_number, "name queries exhausted; trying descriptions");
        for listing in last_results.listings() {
            let page = self.load_page(&listing.link).await;
            let Some(text) = extract_description(&page) else {
                continue;
            };
            if is_match(&row.description, &text) {
                tracing::debug!(title = %listing.title, "description matched");
                return finalize(&page, &row);
            }
        }

        ResolutionOutcome::Failure {
            line_number: row.line_number,
            sku: Some(row.sku.clone()),
            reason: FailureReason::NoGoodMatch,
        }
    }

    async fn search(&self, query: &str) -> ResultSet {
        match self.client.fetch_search_page(query).await {
            Ok(html) => parse_search_results(&Page::parse(&html)),
            Err(e) => {
                tracing::warn!(query, error = %e, "search fetch failed; treating as no listings");
                ResultSet::Listings(Vec::new())
            }
        }
    }

    async fn load_page(&self, url: &str) -> Page {
        match self.client.fetch_page(url).await {
            Ok(html) => Page::parse(&html),
            Err(e) => {
                tracing::warn!(url, error = %e, "page fetch failed; treating as empty document");
                Page::parse("")
            }
        }
    }
}

/// Variant resolution on the fixed candidate page is the row's terminal
/// step either way.
fn finalize(page: &Page, row: &InputRow) -> ResolutionOutcome {
    match resolve_asin(page, &row.colour, &row.size) {
        Ok(asin) => {
            tracing::debug!(sku = %row.sku, asin = %asin, "resolved");
            ResolutionOutcome::Success {
                sku: row.sku.clone(),
                asin,
            }
        }
        Err(e) => {
            tracing::debug!(sku = %row.sku, error = %e, "variant resolution failed");
            ResolutionOutcome::Failure {
                line_number: row.line_number,
                sku: Some(row.sku.clone()),
                reason: e.into(),
            }
        }
    }
}
