pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;

pub use error::*;
pub use handlers::*;
pub use memory::*;
pub use models::*;
pub use repository::*;
pub use service::*;
