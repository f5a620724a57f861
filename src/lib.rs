/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! # Startdeliver Client
//!
//! A thin async client for the Startdeliver REST API.
//!
//! The [`Client`](application::client::Client) shapes requests for the usual
//! CRUD operations, attaches the API key, strips server-maintained fields
//! from outgoing bodies and watches the `startdeliver-expires-at` response
//! header so that callers can be notified shortly before their session
//! expires.
//!
//! ```ignore
//! use startdeliver::prelude::*;
//!
//! let client = Client::new("my-api-key")?;
//! let users = client.get("users", json!({ "limit": 10, "name": "x" })).await?;
//! let saved = client.save("widgets", json!({ "id": 7, "name": "a" })).await?;
//! ```

/// Client, configuration and extension points
pub mod application;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Transport and request models
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Session expiry notification
pub mod session;
/// Logging, environment and callback helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
