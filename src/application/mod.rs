/// The API client
pub mod client;
/// Application configuration module
pub mod config;
/// Per-instance extension methods
pub mod extension;
