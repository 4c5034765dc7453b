//! Process configuration, read once from the environment at startup.

use hostex_client::{HostexClientConfig, DEFAULT_BASE_URL};
use secrecy::SecretString;
use std::time::Duration;

pub const ACCESS_TOKEN_ENV: &str = "HOSTEX_ACCESS_TOKEN";
pub const BASE_URL_ENV: &str = "HOSTEX_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "HOSTEX_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable for the lifetime of the process. The access token may be missing: the server still
/// starts and lists its tools, but every tool call fails until a token is configured.
#[derive(Debug, Default)]
pub struct ServerConfig {
    pub access_token: Option<SecretString>,
    pub client: HostexClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let access_token = read(ACCESS_TOKEN_ENV).map(SecretString::from);
        let base_url = read(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match read(TIMEOUT_ENV) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    log::warn!(
                        "Ignoring invalid {TIMEOUT_ENV}='{raw}'; using {DEFAULT_TIMEOUT_SECS}s"
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
        };

        Self {
            access_token,
            client: HostexClientConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
        }
    }
}
