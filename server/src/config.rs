//! Process configuration read from the environment.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::store::StoreUrl;

pub const PORT_VAR: &str = "PORT";
pub const BIND_ADDR_VAR: &str = "EXERCISE_BIND_ADDR";
pub const STORE_URL_VAR: &str = "EXERCISE_STORE_URL";
pub const STORE_RESET_VAR: &str = "EXERCISE_STORE_RESET";

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub store_url: StoreUrl,
    /// Drop every stored exercise before serving.
    pub reset_store: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            store_url: StoreUrl::Memory,
            reset_store: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Unset or blank variables
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = var(PORT_VAR) {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(PORT_VAR, &raw, "expected a port number"))?;
        }
        if let Some(raw) = var(BIND_ADDR_VAR) {
            config.bind_addr = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(BIND_ADDR_VAR, &raw, "expected an IP address"))?;
        }
        if let Some(raw) = var(STORE_URL_VAR) {
            config.store_url = raw
                .parse()
                .map_err(|reason: String| ConfigError::invalid(STORE_URL_VAR, &raw, &reason))?;
        }
        if let Some(raw) = var(STORE_RESET_VAR) {
            config.reset_store = parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid(STORE_RESET_VAR, &raw, "expected true or false"))?;
        }
        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: &str) -> Self {
        Self {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.var, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}
