pub mod memory;
pub mod redis_store;
pub mod store;
