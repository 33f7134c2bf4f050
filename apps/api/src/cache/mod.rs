//! Per-company cache of ranked matches.
//!
//! The company matches endpoint reads through this once per request instead
//! of re-fetching and re-ranking on every page view.

pub mod redis_cache;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::matching::handlers::RankResponse;

pub use redis_cache::RedisMatchCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cache payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

#[async_trait]
pub trait MatchCache: Send + Sync {
    async fn get(&self, company_id: Uuid) -> Result<Option<RankResponse>, CacheError>;

    async fn put(&self, company_id: Uuid, response: &RankResponse) -> Result<(), CacheError>;

    async fn invalidate(&self, company_id: Uuid) -> Result<(), CacheError>;
}

/// Used when no `REDIS_URL` is configured: every read misses.
pub struct NoopMatchCache;

#[async_trait]
impl MatchCache for NoopMatchCache {
    async fn get(&self, _company_id: Uuid) -> Result<Option<RankResponse>, CacheError> {
        Ok(None)
    }

    async fn put(&self, _company_id: Uuid, _response: &RankResponse) -> Result<(), CacheError> {
        Ok(())
    }

    async fn invalidate(&self, _company_id: Uuid) -> Result<(), CacheError> {
        Ok(())
    }
}
