//! Post store implementations - in-memory and flat JSON file.

mod json_file;
mod memory;

pub use json_file::JsonFilePostStore;
pub use memory::InMemoryPostStore;
