pub mod app_config;
pub mod config;
pub mod error;
pub mod query;
pub mod rank;
pub mod row;
pub mod similarity;
pub mod stats;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use query::QueryPlan;
pub use rank::{rank, ResultSet, ScoredCandidate, SearchListing};
pub use row::{FailureReason, InputRow, ResolutionOutcome};
pub use similarity::{is_match, similarity, MINIMUM_MATCH_LEVEL};
pub use stats::RunStatistics;
