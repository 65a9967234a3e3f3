pub mod puzzle_set;
pub mod session_store;
pub mod word_list;

// Re-export main components
pub use puzzle_set::*;
pub use session_store::*;
pub use word_list::*;
