//! Storage implementations for different backends

pub mod in_memory;
pub mod mongodb;
pub mod timed;

pub use in_memory::InMemoryDataService;
pub use mongodb::{MongoDataService, connect};
pub use timed::TimedDataService;
