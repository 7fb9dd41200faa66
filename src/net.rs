use crate::config::CheckCfg;
use crate::error::CheckError;
use crate::logger::{Logger, TracingLogger};
use crate::policy::Policy;
use std::fmt;
use std::io::{self, ErrorKind};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_HOST: &str = "www.google.com";
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Best-effort connectivity probe.
///
/// Opens a TCP connection to `host:port` and maps the outcome to a boolean
/// according to its [`Policy`]. The last error seen by [`check`](Self::check)
/// is kept in [`error_number`](Self::error_number) and
/// [`error_string`](Self::error_string) until the next call.
///
/// Configuration is fixed once built. `check` takes `&mut self` because it
/// overwrites the error fields; use one checker per thread.
pub struct ConnectivityChecker {
    host: String,
    port: u16,
    timeout: f64,
    policy: Policy,
    logger: Option<Arc<dyn Logger>>,
    error_number: i32,
    error_string: String,
}

impl Default for ConnectivityChecker {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT_SECS,
            policy: Policy::default(),
            logger: None,
            error_number: 0,
            error_string: String::new(),
        }
    }
}

impl fmt::Debug for ConnectivityChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectivityChecker")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("policy", &self.policy)
            .field("logger", &self.logger.is_some())
            .field("error_number", &self.error_number)
            .field("error_string", &self.error_string)
            .finish()
    }
}

impl ConnectivityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &CheckCfg) -> Self {
        let checker = Self::new()
            .with_host(cfg.host.clone())
            .with_port(cfg.port)
            .with_timeout(cfg.timeout_seconds)
            .with_policy(cfg.policy());
        if cfg.log_events {
            checker.with_logger(Arc::new(TracingLogger))
        } else {
            checker
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Connect timeout in seconds, shared by all resolved addresses.
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> f64 {
        self.timeout
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// OS error code of the last failed check, 0 when there was none.
    pub fn error_number(&self) -> i32 {
        self.error_number
    }

    /// Error text of the last failed check, empty when there was none.
    pub fn error_string(&self) -> &str {
        &self.error_string
    }

    /// Runs one connection attempt.
    ///
    /// - connected: `Ok(true)`
    /// - clean failure: `Err(Unavailable)` with `EXCEPTION_ON_UNAVAILABILITY`, else `Ok(false)`
    /// - problem: `Err(Problem)` with `PROBLEM_AS_EXCEPTION`, else `Ok(true)` with
    ///   `PROBLEM_AS_TRUE`, else `Ok(false)`
    pub fn check(&mut self) -> Result<bool, CheckError> {
        self.error_number = 0;
        self.error_string.clear();

        match probe(&self.host, self.port, self.timeout) {
            Probe::Connected => Ok(true),
            Probe::Unreachable(failure) => {
                self.record(failure);
                if let Some(logger) = &self.logger {
                    logger.alert(&format!(
                        "Internet not available: {} - {}",
                        self.error_number, self.error_string
                    ));
                }
                if self.policy.contains(Policy::EXCEPTION_ON_UNAVAILABILITY) {
                    return Err(CheckError::Unavailable {
                        code: self.error_number,
                        message: self.error_string.clone(),
                    });
                }
                Ok(false)
            }
            Probe::Problem(failure) => {
                self.record(failure);
                if let Some(logger) = &self.logger {
                    logger.debug(&format!(
                        "Something went wrong while trying to check internet availability: {}",
                        self.error_string
                    ));
                }
                if self.policy.contains(Policy::PROBLEM_AS_EXCEPTION) {
                    return Err(CheckError::Problem {
                        code: self.error_number,
                        message: self.error_string.clone(),
                    });
                }
                Ok(self.policy.contains(Policy::PROBLEM_AS_TRUE))
            }
        }
    }

    /// Like [`check`](Self::check) but never fails: any error becomes `fallback`.
    pub fn check_or(&mut self, fallback: bool) -> bool {
        self.check().unwrap_or(fallback)
    }

    /// Checks with all defaults; returns `problem_as_true` if the check errors.
    pub fn available(problem_as_true: bool) -> bool {
        Self::new().check_or(problem_as_true)
    }

    fn record(&mut self, failure: Failure) {
        self.error_number = failure.code;
        self.error_string = failure.message;
    }
}

/// Zero-configuration check against the default target.
pub fn has_internet() -> bool {
    ConnectivityChecker::available(true)
}

#[derive(Debug)]
struct Failure {
    code: i32,
    message: String,
}

impl Failure {
    fn without_code(message: impl Into<String>) -> Self {
        Self { code: 0, message: message.into() }
    }
}

impl From<&io::Error> for Failure {
    fn from(err: &io::Error) -> Self {
        Self {
            code: err.raw_os_error().unwrap_or(0),
            message: err.to_string(),
        }
    }
}

#[derive(Debug)]
enum Probe {
    Connected,
    Unreachable(Failure),
    Problem(Failure),
}

fn probe(host: &str, port: u16, timeout_secs: f64) -> Probe {
    let timeout = match validate(host, port, timeout_secs) {
        Ok(timeout) => timeout,
        Err(failure) => return Probe::Problem(failure),
    };

    // Lookup failures look the same as being offline, except for malformed input.
    let addrs: Vec<SocketAddr> = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs.collect(),
        Err(err) if err.kind() == ErrorKind::InvalidInput => {
            return Probe::Problem(Failure::from(&err))
        }
        Err(err) => return Probe::Unreachable(Failure::from(&err)),
    };

    // One budget for the whole attempt, however many addresses the name has.
    let Some(deadline) = Instant::now().checked_add(timeout) else {
        return Probe::Problem(Failure::without_code(format!("invalid timeout: {timeout_secs}")));
    };
    let mut last_err = None;
    for addr in addrs {
        let Some(remaining) = remaining(deadline) else {
            last_err = Some(io::Error::from(ErrorKind::TimedOut));
            break;
        };
        tracing::trace!(%addr, ?remaining, "tcp connect");
        match TcpStream::connect_timeout(&addr, remaining) {
            Ok(stream) => {
                drop(stream);
                return Probe::Connected;
            }
            Err(err) => last_err = Some(err),
        }
    }

    // Every failed connect means the target is unreachable from here.
    match last_err {
        None => Probe::Unreachable(Failure::without_code(format!("no addresses found for {host}"))),
        Some(err) => Probe::Unreachable(Failure::from(&err)),
    }
}

fn remaining(deadline: Instant) -> Option<Duration> {
    Some(deadline.saturating_duration_since(Instant::now())).filter(|d| !d.is_zero())
}

fn validate(host: &str, port: u16, timeout_secs: f64) -> Result<Duration, Failure> {
    if host.is_empty() {
        return Err(Failure::without_code("invalid hostname: empty"));
    }
    if host.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Failure::without_code(format!("invalid hostname: {host:?}")));
    }
    if port == 0 {
        return Err(Failure::without_code("invalid port: 0"));
    }
    match Duration::try_from_secs_f64(timeout_secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(Failure::without_code(format!("invalid timeout: {timeout_secs}"))),
    }
}
