use crate::{abstract_trait::order_item::OrderItemCacheTrait, domain::response::order_item::OrderItemDto};
use async_trait::async_trait;
use chrono::Duration;
use shared::cache::CacheStore;

const TTL_MINUTES: i64 = 5;

/// Read-through copies of single order items, keyed `order_item:{id}`.
#[derive(Clone)]
pub struct OrderItemCache {
    store: CacheStore,
}

impl OrderItemCache {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }
}

fn key(id: i64) -> String {
    format!("order_item:{id}")
}

#[async_trait]
impl OrderItemCacheTrait for OrderItemCache {
    async fn get(&self, id: i64) -> Option<OrderItemDto> {
        self.store.get_from_cache(&key(id)).await
    }

    async fn put(&self, item: &OrderItemDto) {
        if let Some(id) = item.id {
            self.store
                .set_to_cache(&key(id), item, Duration::minutes(TTL_MINUTES))
                .await;
        }
    }

    async fn evict(&self, id: i64) {
        self.store.delete_from_cache(&key(id)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::key;

    #[test]
    fn keys_are_namespaced_by_entity() {
        assert_eq!(key(42), "order_item:42");
    }
}
