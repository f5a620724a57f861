/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

/// Default host of the Startdeliver API
pub const DEFAULT_API_URL: &str = "https://app1.startdeliver.com/";
/// Default API version path segment
pub const DEFAULT_API_VERSION: &str = "v1";
/// User agent string sent when no `User-Agent` default header is configured
pub const USER_AGENT: &str = concat!("Startdeliver-Rust/", env!("CARGO_PKG_VERSION"));
/// Fixed timeout in seconds applied to every request
pub const REQUEST_TIMEOUT_SECS: u64 = 120;
/// Response header carrying the server-declared session expiry
pub const EXPIRES_AT_HEADER: &str = "startdeliver-expires-at";
/// Minutes before the declared expiry at which the expiry callback fires
pub const EXPIRY_MARGIN_MINUTES: i64 = 15;
/// Number of leading API key characters left visible in debug output
pub const API_KEY_VISIBLE_CHARS: usize = 5;
/// Replacement for the hidden part of the API key in debug output
pub const API_KEY_MASK: &str = " ******* masking-rest-of-the-api-key *******";
/// Endpoint used by `login`
pub const LOGIN_ENDPOINT: &str = "login";
/// Endpoint used by `me`
pub const ME_ENDPOINT: &str = "me";
/// Query keys lifted out of an implicit filter to the top level of the query
pub const QUERY_CONTROL_KEYS: [&str; 6] = ["limit", "offset", "flat", "sort", "report", "expand"];
/// Body fields maintained by the server and removed before sending
pub const UPDATED_FIELDS: [&str; 2] = ["updatedAt", "updatedBy"];
