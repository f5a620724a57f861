/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::env;
use tracing::error;

/// Gets a non-empty string environment variable
pub fn get_env_string(env_var: &str) -> Option<String> {
    env::var(env_var).ok().filter(|val| !val.trim().is_empty())
}

/// Gets a boolean flag from the environment
///
/// Accepts `1`/`0`, `true`/`false`, `yes`/`no` and `on`/`off` in any case;
/// anything else is reported and ignored.
pub fn get_env_flag(env_var: &str) -> Option<bool> {
    let val = env::var(env_var).ok()?;
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            error!("Failed to parse {} as a flag: {}", env_var, val);
            None
        }
    }
}
