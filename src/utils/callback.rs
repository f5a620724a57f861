/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Error-first callback delivery.
//!
//! Every client method returns a future resolving to `Result<_, AppError>`.
//! Callers that prefer the `(error, data)` callback style can wrap any of
//! those futures with [`with_callback`].
//!
//! ```ignore
//! with_callback(client.get("users", ()), |err, data| {
//!     if let Some(err) = err {
//!         eprintln!("failed: {err}");
//!     }
//! })
//! .await;
//! ```

use crate::error::AppError;
use std::future::Future;

/// Awaits `future` and hands its outcome to `callback` as `(error, data)`
///
/// Exactly one of the two arguments is `Some`.
pub async fn with_callback<T, Fut, F>(future: Fut, callback: F)
where
    Fut: Future<Output = Result<T, AppError>>,
    F: FnOnce(Option<AppError>, Option<T>),
{
    match future.await {
        Ok(data) => callback(None, Some(data)),
        Err(err) => callback(Some(err), None),
    }
}
