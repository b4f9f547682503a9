/// Search endpoint used when `ASINMAP_SEARCH_BASE_URL` is not set. Search
/// terms are appended verbatim after the trailing `=`.
pub const DEFAULT_SEARCH_BASE_URL: &str =
    "http://www.amazon.co.uk/s/ref=nb_sb_noss?url=search-alias%3Daps&field-keywords=";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Base URL the encoded search terms are appended to. Overridable so
    /// tests can point the whole pipeline at a local mock server.
    pub search_base_url: String,
    pub user_agent: String,
    /// Politeness delay applied before each remote fetch; `0` disables it.
    pub inter_request_delay_ms: u64,
}
