//! Server configuration.
//!
//! Values are layered: built-in defaults, then `CARD_IDENTIFIER_*`
//! environment variables, then a `--port` command-line override.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Environment variable for the bind address.
pub const ENV_HOST: &str = "CARD_IDENTIFIER_HOST";
/// Environment variable for the listen port.
pub const ENV_PORT: &str = "CARD_IDENTIFIER_PORT";
/// Environment variable for the requests allowed per client per window.
pub const ENV_RATE_LIMIT: &str = "CARD_IDENTIFIER_RATE_LIMIT";
/// Environment variable for the rate-limit window length in seconds.
pub const ENV_RATE_WINDOW_SECS: &str = "CARD_IDENTIFIER_RATE_WINDOW_SECS";
/// Environment variable for the largest accepted batch.
pub const ENV_MAX_BATCH: &str = "CARD_IDENTIFIER_MAX_BATCH";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Requests allowed per client in one window.
    pub rate_limit: u32,
    /// Length of one rate-limit window.
    pub rate_window: Duration,
    /// Largest number of card numbers accepted in one batch request.
    pub max_batch_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            rate_limit: 100,
            rate_window: Duration::from_secs(60),
            max_batch_size: 1000,
        }
    }
}

impl ServerConfig {
    /// Loads defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads defaults overridden by whatever `lookup` returns for each
    /// `CARD_IDENTIFIER_*` variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_HOST) {
            config.host = parse_var(ENV_HOST, &value)?;
        }
        if let Some(value) = lookup(ENV_PORT) {
            config.port = parse_var(ENV_PORT, &value)?;
        }
        if let Some(value) = lookup(ENV_RATE_LIMIT) {
            config.rate_limit = parse_positive(ENV_RATE_LIMIT, &value)?;
        }
        if let Some(value) = lookup(ENV_RATE_WINDOW_SECS) {
            let secs: u64 = parse_positive(ENV_RATE_WINDOW_SECS, &value)?;
            config.rate_window = Duration::from_secs(secs);
        }
        if let Some(value) = lookup(ENV_MAX_BATCH) {
            config.max_batch_size = parse_positive(ENV_MAX_BATCH, &value)?;
        }

        Ok(config)
    }

    /// Applies command-line overrides. Only `--port <n>` is recognised;
    /// other arguments are ignored.
    pub fn with_args<I>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg != "--port" {
                continue;
            }
            let value = args.next().ok_or(ConfigError::MissingValue { flag: "--port" })?;
            self.port = parse_var("--port", &value)?;
        }
        Ok(self)
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(setting: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        setting,
        value: value.to_string(),
    })
}

fn parse_positive<T>(setting: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    let parsed: T = parse_var(setting, value)?;
    if parsed == T::default() {
        return Err(ConfigError::InvalidValue {
            setting,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable or flag held a value that could not be used.
    InvalidValue {
        /// Environment variable or flag name.
        setting: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A flag was given without its value.
    MissingValue {
        /// The flag name.
        flag: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { setting, value } => {
                write!(f, "invalid value {:?} for {}", value, setting)
            }
            Self::MissingValue { flag } => write!(f, "{} requires a value", flag),
        }
    }
}

impl std::error::Error for ConfigError {}
