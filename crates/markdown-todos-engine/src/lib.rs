pub mod index;
pub mod io;
pub mod models;
pub mod navigation;
pub mod todos;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::{DocumentStore, FsStore, IoError};
pub use models::*;
pub use todos::{
    TodoError, group_todos, parse_todos, set_todo_status_at_line, toggle_todo_item,
};
