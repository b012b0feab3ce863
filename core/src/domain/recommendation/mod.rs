pub mod entities;
pub mod fallback;
pub mod interpreter;
pub mod ports;
pub mod prompt_builder;
pub mod schema;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
