//! Core domain types

pub mod todo;

// Re-export main components
pub use todo::{CreateTodoInput, Location, PatchTodoInput, Todo, UpdateTodoInput};
