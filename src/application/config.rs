/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{DEFAULT_API_URL, DEFAULT_API_VERSION};
use crate::utils::config::{get_env_flag, get_env_string};
use dotenv::dotenv;
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
/// Account block of the settings, carrying an alternate API key
pub struct AccountSettings {
    /// API key of the account
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
/// Options accepted when constructing a client
///
/// A plain API key converts into settings with only `api_key` set.
pub struct Settings {
    /// API key sent as the `Authorization` header
    pub api_key: Option<String>,
    /// When present, its `api_key` replaces `api_key` (even when unset)
    pub account: Option<AccountSettings>,
    /// API version path segment, `v1` by default
    pub version: Option<String>,
    /// API host, `https://app1.startdeliver.com/` by default
    pub api_url: Option<String>,
    /// Use the `app/` API namespace
    pub app_api: bool,
    /// Log request and response dumps
    pub debug: bool,
    /// Show the full API key in debug dumps
    pub debug_show_api_key: bool,
    /// Remove `updatedAt`/`updatedBy` from outgoing bodies, on by default
    pub strip_updated_fields: Option<bool>,
    /// Log every failed request at error level, on by default
    pub log_errors: Option<bool>,
}

impl From<&str> for Settings {
    fn from(api_key: &str) -> Self {
        Settings {
            api_key: Some(api_key.to_string()),
            ..Default::default()
        }
    }
}

impl From<String> for Settings {
    fn from(api_key: String) -> Self {
        Settings {
            api_key: Some(api_key),
            ..Default::default()
        }
    }
}

impl Settings {
    /// Loads settings from the environment and an optional `.env` file
    ///
    /// Reads `STARTDELIVER_API_KEY`, `STARTDELIVER_API_URL`,
    /// `STARTDELIVER_API_VERSION`, `STARTDELIVER_APP_API`,
    /// `STARTDELIVER_DEBUG`, `STARTDELIVER_DEBUG_SHOW_API_KEY`,
    /// `STARTDELIVER_STRIP_UPDATED_FIELDS` and `STARTDELIVER_LOG_ERRORS`.
    pub fn from_env() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        Settings {
            api_key: get_env_string("STARTDELIVER_API_KEY"),
            account: None,
            version: get_env_string("STARTDELIVER_API_VERSION"),
            api_url: get_env_string("STARTDELIVER_API_URL"),
            app_api: get_env_flag("STARTDELIVER_APP_API").unwrap_or(false),
            debug: get_env_flag("STARTDELIVER_DEBUG").unwrap_or(false),
            debug_show_api_key: get_env_flag("STARTDELIVER_DEBUG_SHOW_API_KEY").unwrap_or(false),
            strip_updated_fields: get_env_flag("STARTDELIVER_STRIP_UPDATED_FIELDS"),
            log_errors: get_env_flag("STARTDELIVER_LOG_ERRORS"),
        }
    }
}

#[derive(Debug, DisplaySimple, Serialize, Clone, PartialEq)]
/// Normalized configuration owned by a client
pub struct Config {
    /// API key sent as the `Authorization` header
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL every endpoint is appended to, always ending in `/`
    pub api_url: String,
    /// API version path segment
    pub version: String,
    /// Whether the `app/` namespace is in use
    pub app_api: bool,
    /// Default headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Log request and response dumps
    pub debug: bool,
    /// Show the full API key in debug dumps
    pub debug_show_api_key: bool,
    /// Remove `updatedAt`/`updatedBy` from outgoing bodies
    pub strip_updated_fields: bool,
    /// Log every failed request at error level
    pub log_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Settings::default().into()
    }
}

impl From<Settings> for Config {
    fn from(settings: Settings) -> Self {
        let api_key = match settings.account {
            Some(account) => account.api_key,
            None => settings.api_key,
        };

        let version = settings
            .version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let mut api_url = settings
            .api_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.ends_with('/') {
            api_url.push('/');
        }
        api_url.push_str("api/");
        api_url.push_str(&version);
        api_url.push('/');
        if settings.app_api {
            api_url.push_str("app/");
        }

        Config {
            api_key,
            api_url,
            version,
            app_api: settings.app_api,
            headers: BTreeMap::new(),
            debug: settings.debug,
            debug_show_api_key: settings.debug_show_api_key,
            strip_updated_fields: settings.strip_updated_fields.unwrap_or(true),
            log_errors: settings.log_errors.unwrap_or(true),
        }
    }
}
