/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! # Startdeliver Client Prelude
//!
//! Brings the commonly used types into scope with a single import.
//!
//! ```rust,ignore
//! use startdeliver::prelude::*;
//!
//! let client = Client::new("my-api-key")?;
//! let me = client.me().await?;
//! ```

// ============================================================================
// CLIENT AND CONFIGURATION
// ============================================================================

/// The API client
pub use crate::application::client::Client;

/// Client settings and normalized configuration
pub use crate::application::config::{AccountSettings, Config, Settings};

/// Per-instance extensions
pub use crate::application::extension::{Extension, Extensions};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// REQUESTS AND TRANSPORT
// ============================================================================

/// Request shaping
pub use crate::model::requests::{
    GetParams, LoginArgs, LoginCredentials, RawRequest, RequestDescriptor,
};

/// Transport boundary
pub use crate::model::http::{
    HttpTransport, ReqwestTransport, TransportError, TransportRequest, TransportResponse,
};

// ============================================================================
// SESSION
// ============================================================================

/// Session expiry notification
pub use crate::session::expiry::{ExpireFn, ExpiryNotifier};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Error-first callback delivery
pub use crate::utils::callback::with_callback;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use reqwest::Method;
pub use serde_json::{Value, json};
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};
