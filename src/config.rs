use crate::error::{NetcheckError, Result};
use crate::net::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use crate::policy::{Policy, PolicyFlag};
use serde::Deserialize;

pub const ENV_HOST: &str = "NETCHECK_HOST";
pub const ENV_PORT: &str = "NETCHECK_PORT";
pub const ENV_TIMEOUT: &str = "NETCHECK_TIMEOUT";
pub const ENV_LOG: &str = "NETCHECK_LOG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub check: CheckCfg,
    pub log: LogCfg,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckCfg {
    pub host: String,
    pub port: u16,
    pub timeout_seconds: f64,
    pub policy: Vec<PolicyFlag>,
    /// Attach a [`crate::TracingLogger`] to the checker.
    pub log_events: bool,
}

impl Default for CheckCfg {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            policy: vec![PolicyFlag::ProblemAsTrue],
            log_events: true,
        }
    }
}

impl CheckCfg {
    pub fn policy(&self) -> Policy {
        self.policy.iter().copied().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogCfg {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for LogCfg {
    fn default() -> Self {
        Self { filter: "warn".to_string() }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, String> {
        toml::from_str(s).map_err(|e| e.to_string())
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Overrides file values with `NETCHECK_*` variables; blank values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(host) = get(ENV_HOST) {
            self.check.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.check.port = port.parse().map_err(|e| NetcheckError::EnvVarError {
                name: ENV_PORT,
                message: format!("'{}': {}", port, e),
            })?;
        }
        if let Some(timeout) = get(ENV_TIMEOUT) {
            self.check.timeout_seconds =
                timeout.parse().map_err(|e| NetcheckError::EnvVarError {
                    name: ENV_TIMEOUT,
                    message: format!("'{}': {}", timeout, e),
                })?;
        }
        if let Some(filter) = get(ENV_LOG) {
            self.log.filter = filter;
        }
        Ok(())
    }
}
