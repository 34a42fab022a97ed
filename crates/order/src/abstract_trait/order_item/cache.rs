use crate::domain::response::order_item::OrderItemDto;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderItemCache = Arc<dyn OrderItemCacheTrait + Send + Sync>;

#[async_trait]
pub trait OrderItemCacheTrait {
    async fn get(&self, id: i64) -> Option<OrderItemDto>;

    async fn put(&self, item: &OrderItemDto);

    async fn evict(&self, id: i64);
}
