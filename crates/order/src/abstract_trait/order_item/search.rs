use crate::{
    domain::{requests::page::PageRequest, response::page::Page},
    model::order_item::OrderItem as OrderItemModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderItemSearchRepository = Arc<dyn OrderItemSearchRepositoryTrait + Send + Sync>;

/// Secondary, query-string searchable copy of the order items.
#[async_trait]
pub trait OrderItemSearchRepositoryTrait {
    /// Indexes the item, replacing any document with the same id.
    async fn save(&self, item: &OrderItemModel) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// A query the index cannot parse yields [`RepositoryError::InvalidQuery`].
    async fn search(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Page<OrderItemModel>, RepositoryError>;
}
