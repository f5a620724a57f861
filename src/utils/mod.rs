/// Error-first callback delivery for client futures
pub mod callback;
/// Environment variable helpers
pub mod config;
/// Debug dumps of requests and responses
pub mod debug;
/// Module containing logging utilities
pub mod logger;

pub use callback::*;
pub use logger::*;
