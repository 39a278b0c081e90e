//! Command implementations.

pub mod classify;
pub mod configure;
pub mod utils;

pub use classify::execute as classify_execute;
pub use configure::execute as configure_execute;
