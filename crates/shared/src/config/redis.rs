use anyhow::{Context, Result};
use deadpool_redis::{Config as DeadpoolConfig, Pool, Runtime};
use tracing::info;

pub type RedisPool = Pool;

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub db: u8,
    pub password: Option<String>,
}

impl RedisConfig {
    pub fn new(host: String, port: u16, db: u8, password: Option<String>) -> Self {
        Self {
            host,
            port,
            db,
            password,
        }
    }

    pub fn url(&self) -> String {
        match &self.password {
            Some(pw) => format!("redis://:{}@{}:{}/{}", pw, self.host, self.port, self.db),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}

pub struct RedisPoolManager;

impl RedisPoolManager {
    pub fn new_pool(config: &RedisConfig) -> Result<RedisPool> {
        info!("Creating redis pool for {}:{}", config.host, config.port);

        DeadpoolConfig::from_url(config.url())
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create redis pool")
    }

    pub async fn ping(pool: &RedisPool) -> Result<()> {
        let mut conn = pool
            .get()
            .await
            .context("Failed to get redis connection")?;

        info!("Pinging redis");

        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis PING failed")?;

        info!("Pinged redis");

        Ok(())
    }
}
