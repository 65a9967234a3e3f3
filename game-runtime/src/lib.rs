pub mod config;
pub mod session_manager;

pub use config::*;
pub use session_manager::*;
