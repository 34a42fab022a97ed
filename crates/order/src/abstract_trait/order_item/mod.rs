mod cache;
mod repository;
mod search;
mod service;

pub use self::cache::{DynOrderItemCache, OrderItemCacheTrait};
pub use self::repository::{DynOrderItemRepository, OrderItemRepositoryTrait};
pub use self::search::{DynOrderItemSearchRepository, OrderItemSearchRepositoryTrait};
pub use self::service::{DynOrderItemService, OrderItemServiceTrait};
