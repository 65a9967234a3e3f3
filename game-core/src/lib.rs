pub mod events;
pub mod letters;
pub mod puzzle_select;
pub mod scoring;
pub mod session;
pub mod word_validation;

// Re-export main components
pub use events::*;
pub use letters::*;
pub use puzzle_select::*;
pub use scoring::*;
pub use session::*;
pub use word_validation::*;
