// Market module - What is traded (items and the orders against them)

mod item;
mod order;

pub use item::{Item, ItemId, ItemStatus};
pub use order::{Order, OrderId, OrderStatus};
