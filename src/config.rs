use crate::application::models::service::AccountService;
use crate::constants::{DEFAULT_LOG_LEVEL, ENABLED_SERVICES_ENV_KEY, LOG_LEVEL_ENV_KEY};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    /// Services whose adapters may be registered. Local accounts need no
    /// adapter and are reloaded regardless.
    pub enabled_services: Vec<AccountService>,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let services: Vec<String> = self
            .enabled_services
            .iter()
            .map(|service| format!("\"{}\"", service))
            .collect();
        write!(
            f,
            "{{\"log_level\":\"{}\",\"enabled_services\":[{}]}}",
            self.log_level,
            services.join(",")
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

/// Parses a comma separated list of service tags. Unknown tags are logged and
/// skipped.
pub fn parse_services(raw: &str) -> Vec<AccountService> {
    let mut services = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        match AccountService::from_str(tag).unwrap_or(AccountService::Unrecognized) {
            AccountService::Unrecognized => {
                error!("Ignoring unknown service {} in {}", tag, ENABLED_SERVICES_ENV_KEY);
            }
            service if services.contains(&service) => {}
            service => services.push(service),
        }
    }
    services
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            enabled_services: AccountService::ALL.to_vec(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let enabled_services = match env::var(ENABLED_SERVICES_ENV_KEY) {
            Ok(raw) => parse_services(&raw),
            Err(_) => AccountService::ALL.to_vec(),
        };
        Config {
            log_level: get_env_or_default(LOG_LEVEL_ENV_KEY, String::from(DEFAULT_LOG_LEVEL))
                .to_uppercase(),
            enabled_services,
        }
    }

    pub fn is_enabled(&self, service: AccountService) -> bool {
        self.enabled_services.contains(&service)
    }
}
