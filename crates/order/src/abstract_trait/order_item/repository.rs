use crate::{
    domain::{requests::page::PageRequest, response::page::Page},
    model::order_item::OrderItem as OrderItemModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderItemRepository = Arc<dyn OrderItemRepositoryTrait + Send + Sync>;

/// Canonical store of order items.
#[async_trait]
pub trait OrderItemRepositoryTrait {
    /// Inserts with a generated id when `id` is `None`. With an id the row
    /// is upserted: updated in place, or inserted under that id.
    async fn save(&self, item: &OrderItemModel) -> Result<OrderItemModel, RepositoryError>;

    async fn find_all(&self, page: &PageRequest) -> Result<Page<OrderItemModel>, RepositoryError>;

    async fn find_one(&self, id: i64) -> Result<Option<OrderItemModel>, RepositoryError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
