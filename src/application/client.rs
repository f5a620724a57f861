/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Client for the Startdeliver REST API
//!
//! Every convenience method shapes a [`RequestDescriptor`] and hands it to
//! [`Client::dispatch`], which handles:
//! - `Authorization` and `User-Agent` headers on top of the default headers
//! - Removal of server-maintained fields from outgoing bodies
//! - The fixed request timeout
//! - Rescheduling the session expiry callback
//! - Debug dumps and error logging

use crate::application::config::{Config, Settings};
use crate::application::extension::{Extension, Extensions};
use crate::constants::{ME_ENDPOINT, REQUEST_TIMEOUT_SECS, UPDATED_FIELDS, USER_AGENT};
use crate::error::AppError;
use crate::model::http::{HttpTransport, ReqwestTransport, TransportRequest};
use crate::model::requests::{
    GetParams, LoginArgs, RawRequest, RequestDescriptor, build_delete, build_get, build_login,
    build_replace, build_save,
};
use crate::session::expiry::{ExpireFn, ExpiryNotifier};
use crate::utils::debug::{error_dump, log_dump, request_dump, response_dump};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Client for the Startdeliver REST API
///
/// Each client owns its configuration, its default headers, its extension
/// table and its expiry timer; nothing is shared between instances.
pub struct Client {
    config: Config,
    transport: Arc<dyn HttpTransport>,
    expiry: ExpiryNotifier,
    extensions: Extensions,
}

impl Client {
    /// Creates a client using the default `reqwest` transport
    ///
    /// # Arguments
    /// * `settings` - A plain API key or a full [`Settings`] value
    ///
    /// # Returns
    /// * `Ok(Client)` - Client ready to use
    /// * `Err(AppError)` - If the HTTP client cannot be built
    pub fn new(settings: impl Into<Settings>) -> Result<Self, AppError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(settings, Arc::new(transport)))
    }

    /// Creates a client on top of a custom transport
    pub fn with_transport(settings: impl Into<Settings>, transport: Arc<dyn HttpTransport>) -> Self {
        let config = Config::from(settings.into());
        info!("Startdeliver client configured for {}", config.api_url);
        Self {
            config,
            transport,
            expiry: ExpiryNotifier::new(),
            extensions: Extensions::new(),
        }
    }

    /// Creates a client from environment variables, see [`Settings::from_env`]
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(Settings::from_env())
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the API key
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.api_key = Some(api_key.into());
    }

    /// Alias of [`set_api_key`](Self::set_api_key)
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.set_api_key(token);
    }

    /// Adds or replaces a header sent with every request
    pub fn set_default_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.config.headers.insert(name.into(), value.into());
    }

    /// Registers the callback run 15 minutes before the session expires
    pub fn add_expire_fn<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.expiry.set_callback(Arc::new(callback));
    }

    /// Schedules `callback` after `delay`, cancelling any pending expiry timer
    pub fn update_expire_fn(&self, callback: ExpireFn, delay: chrono::Duration) {
        self.expiry.schedule(callback, delay);
    }

    /// Expiry notifier of this client
    #[must_use]
    pub fn expiry(&self) -> &ExpiryNotifier {
        &self.expiry
    }

    /// Turns a descriptor into the request handed to the transport
    #[must_use]
    pub fn prepare(&self, descriptor: RequestDescriptor) -> TransportRequest {
        let endpoint = normalize_endpoint(descriptor.endpoint);

        let mut headers = self.config.headers.clone();
        if let Some(api_key) = self.config.api_key.as_ref().filter(|key| !key.is_empty()) {
            headers.retain(|name, _| !name.eq_ignore_ascii_case("authorization"));
            headers.insert("Authorization".to_string(), api_key.clone());
        }
        if !headers.keys().any(|name| name.eq_ignore_ascii_case("user-agent")) {
            headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
        }

        let body = descriptor.body.map(|mut body| {
            if self.config.strip_updated_fields {
                strip_updated_fields(&mut body);
            }
            body
        });

        TransportRequest {
            method: descriptor.method,
            url: format!("{}{}", self.config.api_url, endpoint),
            headers,
            body,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            with_credentials: true,
        }
    }

    /// Sends a request and returns the decoded response body
    ///
    /// # Returns
    /// * `Ok(Value)` - Body of a 2xx response
    /// * `Err(AppError::Http)` - The server answered with another status
    /// * `Err(AppError::Transport)` - No response was received
    pub async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<Value, AppError> {
        let request = self.prepare(descriptor);
        if self.config.debug {
            log_dump("config", &request_dump(&request, self.config.debug_show_api_key));
        }

        let method = request.method.clone();
        let url = request.url.clone();

        match self.transport.execute(request).await {
            Ok(response) => {
                if self.config.debug {
                    log_dump("res", &response_dump(&response));
                }
                if let Some(delay) = self.expiry.observe(&response.headers, Utc::now()) {
                    debug!("Session expiry notice in {} s", delay.num_seconds());
                }
                Ok(response.body)
            }
            Err(err) => {
                if self.config.log_errors {
                    error!("{} {} failed: {}", method, url, err);
                }
                if self.config.debug {
                    log_dump("err", &error_dump(&err));
                }
                Err(err.into())
            }
        }
    }

    /// Logs in with a username and password
    ///
    /// Fails with `AppError::InvalidArguments` before any request when no
    /// credentials are given.
    pub async fn login(&self, args: impl Into<LoginArgs>) -> Result<Value, AppError> {
        let descriptor = build_login(args.into())?;
        self.dispatch(descriptor).await
    }

    /// Fetches a record by id, or lists records matching a query
    pub async fn get(&self, entity: &str, params: impl Into<GetParams>) -> Result<Value, AppError> {
        let descriptor = build_get(entity, params.into())?;
        self.dispatch(descriptor).await
    }

    /// Alias of [`get`](Self::get)
    pub async fn find(&self, entity: &str, params: impl Into<GetParams>) -> Result<Value, AppError> {
        self.get(entity, params).await
    }

    /// Creates a record (no `id`) or patches an existing one
    pub async fn save(&self, entity: &str, params: Value) -> Result<Value, AppError> {
        self.dispatch(build_save(entity, params)).await
    }

    /// Alias of [`save`](Self::save)
    pub async fn create(&self, entity: &str, params: Value) -> Result<Value, AppError> {
        self.save(entity, params).await
    }

    /// Alias of [`save`](Self::save)
    pub async fn update(&self, entity: &str, params: Value) -> Result<Value, AppError> {
        self.save(entity, params).await
    }

    /// Alias of [`save`](Self::save)
    pub async fn post(&self, entity: &str, params: Value) -> Result<Value, AppError> {
        self.save(entity, params).await
    }

    /// Alias of [`save`](Self::save)
    pub async fn patch(&self, entity: &str, params: Value) -> Result<Value, AppError> {
        self.save(entity, params).await
    }

    /// Replaces a record with PUT
    pub async fn replace(&self, entity: &str, params: Value) -> Result<Value, AppError> {
        self.dispatch(build_replace(entity, params)).await
    }

    /// Alias of [`replace`](Self::replace)
    pub async fn put(&self, entity: &str, params: Value) -> Result<Value, AppError> {
        self.replace(entity, params).await
    }

    /// Deletes a record given its id or the record itself
    pub async fn delete(&self, entity: &str, target: impl Into<Value>) -> Result<Value, AppError> {
        self.dispatch(build_delete(entity, target.into())).await
    }

    /// Alias of [`delete`](Self::delete)
    pub async fn remove(&self, entity: &str, target: impl Into<Value>) -> Result<Value, AppError> {
        self.delete(entity, target).await
    }

    /// Fetches the authenticated user
    pub async fn me(&self) -> Result<Value, AppError> {
        self.get(ME_ENDPOINT, GetParams::None).await
    }

    /// Sends an arbitrary request
    pub async fn raw(&self, request: RawRequest) -> Result<Value, AppError> {
        self.dispatch(request.into()).await
    }

    /// Registers an extension on this client
    pub fn use_extension(&mut self, name: impl Into<String>, extension: Arc<dyn Extension>) {
        self.extensions.insert(name.into(), extension);
    }

    /// Registers several extensions on this client, replacing same-named ones
    pub fn use_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = (S, Arc<dyn Extension>)>,
        S: Into<String>,
    {
        for (name, extension) in extensions {
            self.use_extension(name, extension);
        }
    }

    /// Whether an extension is registered under `name`
    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Runs a registered extension
    ///
    /// # Returns
    /// * `Err(AppError::UnknownExtension)` - If nothing is registered under `name`
    pub async fn call_extension(&self, name: &str, args: Value) -> Result<Value, AppError> {
        let extension = self
            .extensions
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::UnknownExtension(name.to_string()))?;
        extension.call(self, args).await
    }
}

/// Keeps only the first path segment of endpoints starting with `/`
///
/// `"/users/5"` becomes `"users"`; endpoints without a leading slash are
/// returned unchanged.
#[must_use]
pub fn normalize_endpoint(endpoint: String) -> String {
    if endpoint.starts_with('/') {
        endpoint.split('/').nth(1).unwrap_or_default().to_string()
    } else {
        endpoint
    }
}

/// Removes the server-maintained top-level fields from a body
pub fn strip_updated_fields(body: &mut Value) {
    if let Value::Object(map) = body {
        for field in UPDATED_FIELDS {
            map.shift_remove(field);
        }
    }
}

