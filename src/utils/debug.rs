/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Debug dumps of outgoing requests and incoming responses.
//!
//! Dumps are JSON snapshots written through `tracing` when the client runs
//! with `debug` enabled. The `Authorization` header is masked unless the
//! configuration asks for the key to be shown.

use crate::constants::{API_KEY_MASK, API_KEY_VISIBLE_CHARS};
use crate::model::http::{TransportError, TransportRequest, TransportResponse};
use reqwest::header::HeaderMap;
use serde_json::{Map, Value, json};
use tracing::info;

/// Keeps the first characters of an API key and masks the rest
#[must_use]
pub fn mask_api_key(api_key: &str) -> String {
    let visible: String = api_key.chars().take(API_KEY_VISIBLE_CHARS).collect();
    format!("{visible}{API_KEY_MASK}")
}

/// Masks `headers.Authorization` in a dump, if present
pub fn mask_authorization(dump: &mut Value) {
    if let Some(Value::String(key)) = dump
        .get_mut("headers")
        .and_then(|headers| headers.get_mut("Authorization"))
    {
        *key = mask_api_key(key);
    }
}

fn header_map_dump(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        map.insert(name.as_str().to_string(), Value::String(value));
    }
    Value::Object(map)
}

/// Snapshot of an outgoing request
#[must_use]
pub fn request_dump(request: &TransportRequest, show_api_key: bool) -> Value {
    let mut dump = json!({
        "method": request.method.as_str(),
        "url": request.url,
        "data": request.body.clone().unwrap_or(Value::Null),
        "timeout": request.timeout.as_millis() as u64,
        "withCredentials": request.with_credentials,
        "headers": request.headers,
    });
    if !show_api_key {
        mask_authorization(&mut dump);
    }
    dump
}

/// Snapshot of a successful response
#[must_use]
pub fn response_dump(response: &TransportResponse) -> Value {
    json!({
        "status": response.status,
        "headers": header_map_dump(&response.headers),
        "data": response.body,
    })
}

/// Snapshot of a transport error
#[must_use]
pub fn error_dump(err: &TransportError) -> Value {
    json!({
        "message": err.message,
        "timeout": err.timeout,
        "response": err.response.as_ref().map(response_dump),
    })
}

/// Writes a labelled dump to the log
pub fn log_dump(label: &str, dump: &Value) {
    let pretty = serde_json::to_string_pretty(dump).unwrap_or_else(|_| dump.to_string());
    info!(
        "\n----- startdeliver debug -----\n{}\n{}\n------------------------------",
        label, pretty
    );
}
