pub mod cart;
pub mod common;
pub mod conversation;
pub mod menu;
pub mod recommendation;
