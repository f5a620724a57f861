/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::model::http::TransportError;
use serde_json::Value;
use std::fmt;

/// Main error type for the library
#[derive(Debug)]
pub enum AppError {
    /// A method was called without the arguments it needs
    InvalidArguments(String),
    /// The server answered with a non-2xx status
    Http {
        /// HTTP status code
        status_code: u16,
        /// Decoded response body
        data: Value,
    },
    /// The transport failed without a response (connection, timeout, ...)
    Transport(TransportError),
    /// JSON encoding or decoding failed
    Json(serde_json::Error),
    /// No extension is registered under the given name
    UnknownExtension(String),
}

impl AppError {
    /// Status code of a server error
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Response body of a server error
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            AppError::Http { data, .. } => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            AppError::Http { status_code, data } => {
                write!(f, "http error {status_code}: {data}")
            }
            AppError::Transport(err) => write!(f, "transport error: {err}"),
            AppError::Json(err) => write!(f, "json error: {err}"),
            AppError::UnknownExtension(name) => write!(f, "unknown extension: {name}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Transport(err) => Some(err),
            AppError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        match err.response {
            Some(response) => AppError::Http {
                status_code: response.status,
                data: response.body,
            },
            None => AppError::Transport(err),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}
