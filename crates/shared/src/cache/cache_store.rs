use chrono::Duration;
use deadpool_redis::{Connection, redis};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::RedisPool;

/// JSON values in Redis with a TTL. Every failure is logged and treated as
/// a cache miss so callers fall through to the database.
#[derive(Clone)]
pub struct CacheStore {
    redis_pool: Arc<RedisPool>,
}

impl CacheStore {
    pub fn new(redis_pool: RedisPool) -> Self {
        Self {
            redis_pool: Arc::new(redis_pool),
        }
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis pooled connection: {e}");
                None
            }
        }
    }

    pub async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.get_conn().await?;
        let result: redis::RedisResult<Option<String>> =
            redis::cmd("GET").arg(key).query_async(&mut conn).await;

        match result {
            Ok(Some(data)) => serde_json::from_str::<T>(&data)
                .inspect_err(|e| error!("Failed to deserialize cached value for '{key}': {e}"))
                .ok(),
            Ok(None) => {
                debug!("Cache miss for key: {key}");
                None
            }
            Err(e) => {
                error!("Redis GET failed for '{key}': {e}");
                None
            }
        }
    }

    pub async fn set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize,
    {
        let json_data = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize data for '{key}': {e}");
                return;
            }
        };

        let Some(mut conn) = self.get_conn().await else {
            return;
        };

        let result: redis::RedisResult<()> = redis::cmd("SET")
            .arg(key)
            .arg(&json_data)
            .arg("EX")
            .arg(expiration.num_seconds().max(1))
            .query_async(&mut conn)
            .await;

        match result {
            Ok(()) => debug!("Cached key '{key}' for {}s", expiration.num_seconds()),
            Err(e) => error!("Failed to set cache key '{key}': {e}"),
        }
    }

    pub async fn delete_from_cache(&self, key: &str) {
        if let Some(mut conn) = self.get_conn().await
            && let Err(e) = redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut conn)
                .await
        {
            error!("Failed to delete cache key '{key}': {e}");
        }
    }
}
