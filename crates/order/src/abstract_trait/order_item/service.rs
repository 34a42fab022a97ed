use crate::domain::{
    requests::page::PageRequest,
    response::{order_item::OrderItemDto, page::Page},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderItemService = Arc<dyn OrderItemServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderItemServiceTrait {
    async fn create(&self, dto: &OrderItemDto) -> Result<OrderItemDto, ServiceError>;

    async fn update(&self, dto: &OrderItemDto) -> Result<OrderItemDto, ServiceError>;

    async fn find_all(&self, page: &PageRequest) -> Result<Page<OrderItemDto>, ServiceError>;

    async fn find_one(&self, id: i64) -> Result<Option<OrderItemDto>, ServiceError>;

    async fn delete(&self, id: i64) -> Result<(), ServiceError>;

    async fn search(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Page<OrderItemDto>, ServiceError>;
}
