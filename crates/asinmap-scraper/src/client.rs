//! HTTP access to the remote search and product pages.
//!
//! Fetches are strictly sequential and are never retried; a failed fetch is
//! reported to the caller, which degrades it to an empty document rather
//! than aborting the run. No request timeout is configured — the transport
//! default applies.

use std::time::{Duration, Instant};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use asinmap_core::AppConfig;

use crate::error::ScraperError;

/// urlencode-style escaping: alphanumerics plus `-`, `_` and `.` pass
/// through bare, everything else — including the `+` join token — is
/// percent-escaped.
const URLENCODE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Client for the remote search endpoint and product detail pages.
pub struct PageClient {
    client: reqwest::Client,
    search_base_url: String,
    inter_request_delay_ms: u64,
}

impl PageClient {
    /// Creates a client with the configured `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            search_base_url: config.search_base_url.clone(),
            inter_request_delay_ms: config.inter_request_delay_ms,
        })
    }

    /// The full search URL for the given free-text terms.
    #[must_use]
    pub fn search_url(&self, terms: &str) -> String {
        format!("{}{}", self.search_base_url, encode_search_terms(terms))
    }

    /// Fetches the search-results page for `terms`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`].
    pub async fn fetch_search_page(&self, terms: &str) -> Result<String, ScraperError> {
        self.fetch_page(&self.search_url(terms)).await
    }

    /// Fetches one page body. Non-2xx statuses are typed errors so callers
    /// can log them before degrading to an empty document.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        if self.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.inter_request_delay_ms)).await;
        }

        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        let body = response.text().await?;
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(url, elapsed_ms, "fetched page");
        Ok(body)
    }
}

/// Joins whitespace-separated terms with `+`, then percent-escapes the
/// whole string urlencode-fashion (so the join token itself arrives as
/// `%2B`, exactly as the search endpoint has always been queried).
#[must_use]
pub fn encode_search_terms(terms: &str) -> String {
    let joined = terms.trim().replace(' ', "+");
    utf8_percent_encode(&joined, URLENCODE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_are_joined_with_an_escaped_plus() {
        assert_eq!(encode_search_terms("Red Boot"), "Red%2BBoot");
    }

    #[test]
    fn safe_characters_pass_through_bare() {
        assert_eq!(encode_search_terms("a-b_c.d"), "a-b_c.d");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode_search_terms("50% wool"), "50%25%2Bwool");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_joining() {
        assert_eq!(encode_search_terms("  Red Boot  "), "Red%2BBoot");
    }
}
