//! Cache store implementations

mod in_memory;
mod json_file;

pub use in_memory::InMemoryCacheStore;
pub use json_file::JsonFileCacheStore;
