use std::sync::Arc;

use crate::cache::MatchCache;
use crate::config::Config;
use crate::matching::policy::MatchPolicy;
use crate::records::RecordSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Candidate and job rows. Default: PgRecordSource.
    pub records: Arc<dyn RecordSource>,
    /// Ranked matches per company. RedisMatchCache, or NoopMatchCache without REDIS_URL.
    pub cache: Arc<dyn MatchCache>,
}

impl AppState {
    pub fn policy(&self) -> &MatchPolicy {
        &self.config.match_policy
    }
}
