/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Request shaping for the convenience methods.
//!
//! Every builder here is pure: it turns the caller's arguments into a
//! [`RequestDescriptor`] without touching configuration or the network.

use crate::constants::{LOGIN_ENDPOINT, QUERY_CONTROL_KEYS};
use crate::error::AppError;
use crate::model::utils::{first_string, id_segment, is_truthy};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Method, endpoint and body of a single API call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Endpoint relative to the configured API URL
    pub endpoint: String,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Creates a descriptor without a body
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    /// Attaches a JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Second argument of `get`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GetParams {
    /// List the whole entity collection
    #[default]
    None,
    /// Fetch a single record by numeric id
    Id(Number),
    /// Filtered listing, encoded into the `query` parameter
    Query(Map<String, Value>),
}

impl From<()> for GetParams {
    fn from(_: ()) -> Self {
        GetParams::None
    }
}

impl From<Map<String, Value>> for GetParams {
    fn from(map: Map<String, Value>) -> Self {
        GetParams::Query(map)
    }
}

impl From<Value> for GetParams {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => GetParams::Id(n),
            Value::Object(map) => GetParams::Query(map),
            _ => GetParams::None,
        }
    }
}

impl<T: Into<GetParams>> From<Option<T>> for GetParams {
    fn from(value: Option<T>) -> Self {
        value.map_or(GetParams::None, Into::into)
    }
}

macro_rules! get_params_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for GetParams {
                fn from(id: $t) -> Self {
                    GetParams::Id(Number::from(id))
                }
            }
        )*
    };
}

get_params_from_int!(i32, i64, u32, u64, usize);

/// Builds the query object sent for a filtered `get`
///
/// When `params` has no `filter` key it is treated as the filter itself and
/// the control keys (`limit`, `offset`, `flat`, `sort`, `report`, `expand`)
/// are moved from it to the top level. Unset control values stay in the
/// filter. With an explicit `filter`, `params` is returned unchanged.
#[must_use]
pub fn build_query(params: Map<String, Value>) -> Map<String, Value> {
    if params.get("filter").is_some_and(is_truthy) {
        return params;
    }

    let mut filter = params;
    let mut hoisted = Vec::new();
    for key in QUERY_CONTROL_KEYS {
        if filter.get(key).is_some_and(is_truthy) {
            if let Some(value) = filter.shift_remove(key) {
                hoisted.push((key.to_string(), value));
            }
        }
    }

    let mut query = Map::new();
    query.insert("filter".to_string(), Value::Object(filter));
    query.extend(hoisted);
    query
}

/// Builds the request for `get`
pub fn build_get(entity: &str, params: GetParams) -> Result<RequestDescriptor, AppError> {
    let mut endpoint = entity.to_string();
    match params {
        GetParams::None => {}
        GetParams::Id(id) => {
            if let Some(segment) = id_segment(Some(&Value::Number(id))) {
                endpoint.push('/');
                endpoint.push_str(&segment);
            }
        }
        GetParams::Query(params) => {
            let query = serde_json::to_string(&Value::Object(build_query(params)))?;
            endpoint.push_str("?query=");
            endpoint.push_str(&urlencoding::encode(&query));
        }
    }
    Ok(RequestDescriptor::new(Method::GET, endpoint))
}

/// Builds the request for `save`: PATCH `entity/<id>` when the body carries an
/// id, POST `entity` otherwise
#[must_use]
pub fn build_save(entity: &str, params: Value) -> RequestDescriptor {
    let request = match id_segment(params.get("id")) {
        Some(id) => RequestDescriptor::new(Method::PATCH, format!("{entity}/{id}")),
        None => RequestDescriptor::new(Method::POST, entity),
    };
    request.with_body(params)
}

/// Builds the request for `replace`: always PUT, to `entity/` when no id is given
#[must_use]
pub fn build_replace(entity: &str, params: Value) -> RequestDescriptor {
    let id = id_segment(params.get("id")).unwrap_or_default();
    RequestDescriptor::new(Method::PUT, format!("{entity}/{id}")).with_body(params)
}

/// Builds the request for `delete`
///
/// `target` is either the id itself or a record carrying an `id` field.
/// Arrays carry no `id` and address the collection itself.
#[must_use]
pub fn build_delete(entity: &str, target: Value) -> RequestDescriptor {
    let id = match &target {
        Value::Object(_) | Value::Array(_) => id_segment(target.get("id")),
        other => id_segment(Some(other)),
    }
    .unwrap_or_default();
    RequestDescriptor::new(Method::DELETE, format!("{entity}/{id}"))
}

/// Body of the login request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Account e-mail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Whether the session should be long-lived
    pub remember: bool,
}

/// Arguments accepted by `login`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoginArgs {
    /// No argument at all; rejected before any request is made
    #[default]
    None,
    /// Username, optional password and remember flag
    Positional {
        /// Username or e-mail
        username: String,
        /// Password
        password: Option<String>,
        /// Remember flag
        remember: bool,
    },
    /// Object with aliased keys: `username`/`user`/`email`/`u`,
    /// `password`/`pass`/`p`, `remember`/`r`
    Object(Value),
}

impl LoginArgs {
    /// Positional form
    pub fn positional(username: impl Into<String>, password: impl Into<String>, remember: bool) -> Self {
        LoginArgs::Positional {
            username: username.into(),
            password: Some(password.into()),
            remember,
        }
    }

    /// Normalizes the arguments into the login body
    ///
    /// # Returns
    /// * `Err(AppError::InvalidArguments)` - If no identifying argument was given
    pub fn into_credentials(self) -> Result<LoginCredentials, AppError> {
        match self {
            LoginArgs::None => Err(AppError::InvalidArguments(
                "Invalid arguments for login method".to_string(),
            )),
            LoginArgs::Positional {
                username,
                password,
                remember,
            } => {
                if username.is_empty() {
                    return Err(AppError::InvalidArguments(
                        "Invalid arguments for login method".to_string(),
                    ));
                }
                Ok(LoginCredentials {
                    email: Some(username),
                    password,
                    remember,
                })
            }
            LoginArgs::Object(value) => {
                if !is_truthy(&value) {
                    return Err(AppError::InvalidArguments(
                        "Invalid arguments for login method".to_string(),
                    ));
                }
                let username = match &value {
                    Value::String(username) => Some(username.clone()),
                    Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
                    _ => None,
                };
                if let Some(username) = username {
                    return LoginArgs::Positional {
                        username,
                        password: None,
                        remember: false,
                    }
                    .into_credentials();
                }
                let remember = ["remember", "r"]
                    .iter()
                    .filter_map(|key| value.get(*key))
                    .any(is_truthy);
                Ok(LoginCredentials {
                    email: first_string(&value, &["username", "user", "email", "u"]),
                    password: first_string(&value, &["password", "pass", "p"]),
                    remember,
                })
            }
        }
    }
}

impl From<()> for LoginArgs {
    fn from(_: ()) -> Self {
        LoginArgs::None
    }
}

impl From<Value> for LoginArgs {
    fn from(value: Value) -> Self {
        LoginArgs::Object(value)
    }
}

impl From<&str> for LoginArgs {
    fn from(username: &str) -> Self {
        LoginArgs::Positional {
            username: username.to_string(),
            password: None,
            remember: false,
        }
    }
}

impl From<(&str, &str)> for LoginArgs {
    fn from((username, password): (&str, &str)) -> Self {
        LoginArgs::positional(username, password, false)
    }
}

impl From<(&str, &str, bool)> for LoginArgs {
    fn from((username, password, remember): (&str, &str, bool)) -> Self {
        LoginArgs::positional(username, password, remember)
    }
}

/// Builds the login request
pub fn build_login(args: LoginArgs) -> Result<RequestDescriptor, AppError> {
    let credentials = args.into_credentials()?;
    let body = serde_json::to_value(credentials)?;
    Ok(RequestDescriptor::new(Method::POST, LOGIN_ENDPOINT).with_body(body))
}

/// Escape hatch for arbitrary calls
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRequest {
    /// Endpoint relative to the API URL
    pub endpoint: String,
    /// HTTP method, GET when unset
    pub method: Option<Method>,
    /// Optional JSON body
    pub body: Option<Value>,
}

impl From<RawRequest> for RequestDescriptor {
    fn from(raw: RawRequest) -> Self {
        RequestDescriptor {
            method: raw.method.unwrap_or(Method::GET),
            endpoint: raw.endpoint,
            body: raw.body,
        }
    }
}
