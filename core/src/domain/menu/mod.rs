pub mod entities;
pub mod formatting;
pub mod ports;
pub mod services;

pub use entities::*;
