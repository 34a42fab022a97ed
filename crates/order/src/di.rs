use crate::{
    abstract_trait::order_item::{
        DynOrderItemCache, DynOrderItemRepository, DynOrderItemSearchRepository,
        DynOrderItemService,
    },
    cache::OrderItemCache,
    repository::OrderItemRepository,
    search::TantivyOrderItemSearchRepository,
    service::OrderItemService,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    cache::CacheStore,
    config::{ConnectionPool, RedisPool},
};
use std::{fmt, path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_item_service: DynOrderItemService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_item_service", &"OrderItemService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub redis: RedisPool,
    pub search_index_dir: PathBuf,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            redis,
            search_index_dir,
        } = deps;

        let repository: DynOrderItemRepository = Arc::new(OrderItemRepository::new(pool));
        let search: DynOrderItemSearchRepository = Arc::new(
            TantivyOrderItemSearchRepository::open(&search_index_dir)
                .context("Failed to open search index")?,
        );
        let cache: DynOrderItemCache = Arc::new(OrderItemCache::new(CacheStore::new(redis)));

        Ok(Self::from_repositories(repository, search, cache, registry))
    }

    /// Wires the service over any repository set, e.g. in-memory stores.
    pub fn from_repositories(
        repository: DynOrderItemRepository,
        search: DynOrderItemSearchRepository,
        cache: DynOrderItemCache,
        registry: &mut Registry,
    ) -> Self {
        let order_item_service: DynOrderItemService =
            Arc::new(OrderItemService::new(repository, search, cache, registry));

        Self { order_item_service }
    }
}
