mod order_item;

pub use self::order_item::OrderItemService;
