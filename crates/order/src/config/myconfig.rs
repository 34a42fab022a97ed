use anyhow::{Context, Result, anyhow};
use shared::config::RedisConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub redis: RedisConfig,
    pub search_index_dir: PathBuf,
    pub app_name: String,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let run_migrations = parse_bool(
            "RUN_MIGRATIONS",
            &std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".to_string()),
        )?;

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_max_conn: u32 = std::env::var("DB_MAX_CONNECTION")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MAX_CONNECTION as u32")?;

        let db_min_conn: u32 = std::env::var("DB_MIN_CONNECTION")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MIN_CONNECTION as u32")?;

        // redis
        let redis_host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "redis".to_string());

        let redis_port = std::env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid u16 integer")?;

        let redis_db = std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u8>()
            .context("REDIS_DB must be a valid u8 integer")?;

        let redis_password = std::env::var("REDIS_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        let search_index_dir = std::env::var("SEARCH_INDEX_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/orderitem-index"));
        let app_name = std::env::var("APP_NAME").unwrap_or_else(|_| "orderService".to_string());
        let otel_endpoint = std::env::var("OTEL_ENDPOINT")
            .unwrap_or_else(|_| "http://otel-collector:4317".to_string());

        let is_dev = std::env::var("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let enable_file_log = std::env::var("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            run_migrations,
            port,
            db_max_conn,
            db_min_conn,
            redis: RedisConfig::new(redis_host, redis_port, redis_db, redis_password),
            search_index_dir,
            app_name,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn run_migrations_accepts_only_true_or_false() {
        assert!(parse_bool("RUN_MIGRATIONS", "true").unwrap());
        assert!(!parse_bool("RUN_MIGRATIONS", "false").unwrap());

        let err = parse_bool("RUN_MIGRATIONS", "yes").unwrap_err();
        assert!(err.to_string().contains("RUN_MIGRATIONS"));
    }
}
