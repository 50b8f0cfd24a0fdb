pub mod models;
pub mod pool;

pub use pool::{health_check, pool, DatabaseError};
