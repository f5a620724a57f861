/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Extension methods registered on a single client.
//!
//! Extensions are looked up by name at call time through
//! [`Client::call_extension`]. Registering one only affects the client it
//! was registered on.

use crate::application::client::Client;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A named operation built on top of the client
#[async_trait]
pub trait Extension: Send + Sync {
    /// Runs the extension with access to the client it is registered on
    async fn call(&self, client: &Client, args: Value) -> Result<Value, AppError>;
}

/// Extension table keyed by method name
pub type Extensions = HashMap<String, Arc<dyn Extension>>;
