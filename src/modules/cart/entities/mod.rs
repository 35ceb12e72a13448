pub mod cart;
pub mod order_item;
