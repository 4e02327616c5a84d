//! Storage backends for accounts, todos, and uploaded objects

pub mod memory;
pub mod traits;

// Re-export main components
pub use memory::MemoryStore;
pub use traits::{ObjectStore, StoredObject, TodoStore, UserStore};
