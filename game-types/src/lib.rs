pub mod errors;
pub mod game;
pub mod player;
pub mod puzzle;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use player::*;
pub use puzzle::*;
