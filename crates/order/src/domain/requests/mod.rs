pub mod order_item;
pub mod page;
