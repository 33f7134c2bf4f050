use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

use crate::cache::{CacheError, MatchCache};
use crate::matching::handlers::RankResponse;

/// Stores ranked matches as JSON under `matches:company:{id}` with a TTL.
#[derive(Clone)]
pub struct RedisMatchCache {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisMatchCache {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, CacheError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

pub fn cache_key(company_id: Uuid) -> String {
    format!("matches:company:{company_id}")
}

#[async_trait]
impl MatchCache for RedisMatchCache {
    async fn get(&self, company_id: Uuid) -> Result<Option<RankResponse>, CacheError> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn.get(cache_key(company_id)).await?;
        match payload {
            Some(json) => {
                debug!("Match cache hit for company {company_id}");
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, company_id: Uuid, response: &RankResponse) -> Result<(), CacheError> {
        let payload = serde_json::to_string(response)?;
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(cache_key(company_id), payload, self.ttl_secs)
            .await?;
        Ok(())
    }

    async fn invalidate(&self, company_id: Uuid) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(cache_key(company_id)).await?;
        Ok(())
    }
}
