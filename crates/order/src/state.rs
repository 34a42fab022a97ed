use crate::{
    config::myconfig::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
    utils::HeaderUtil,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    config::{ConnectionPool, RedisPool},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub header_util: HeaderUtil,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &self.registry)
            .field("header_util", &self.header_util)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, redis: RedisPool, config: &Config) -> Result<Self> {
        let mut registry = Registry::default();

        let deps = DependenciesInjectDeps {
            pool,
            redis,
            search_index_dir: config.search_index_dir.clone(),
        };
        let di_container = DependenciesInject::new(deps, &mut registry)
            .context("Failed to initialize dependency injection container")?;

        let state = Self::from_parts(di_container, registry, HeaderUtil::new(&config.app_name));

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        Ok(state)
    }

    /// Assembles the state around an already wired container. Does not
    /// start the background system metrics collector.
    pub fn from_parts(
        di_container: DependenciesInject,
        mut registry: Registry,
        header_util: HeaderUtil,
    ) -> Self {
        let system_metrics = Arc::new(SystemMetrics::new());
        system_metrics.register(&mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
            header_util,
            system_metrics,
        }
    }
}
