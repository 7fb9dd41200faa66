use std::path::PathBuf;
use thiserror::Error;

/// Failure signaled by [`crate::ConnectivityChecker::check`] when the policy asks for one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The target could not be reached cleanly (refused, timed out, no route).
    #[error("internet not available: {code} - {message}")]
    Unavailable { code: i32, message: String },

    /// The check itself went wrong; says nothing about connectivity.
    #[error("problem while checking internet availability: {code} - {message}")]
    Problem { code: i32, message: String },
}

impl CheckError {
    pub fn code(&self) -> i32 {
        match self {
            CheckError::Unavailable { code, .. } | CheckError::Problem { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CheckError::Unavailable { message, .. } | CheckError::Problem { message, .. } => {
                message
            }
        }
    }
}

/// Startup errors of the `netcheck` binary.
#[derive(Error, Debug)]
pub enum NetcheckError {
    #[error("xdg error: {message}")]
    XdgError { message: String },

    #[error("failed to load env file {path}: {source}")]
    EnvLoadError {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind} file {path}: {message}")]
    ParseError {
        path: PathBuf,
        kind: &'static str,
        message: String,
    },

    #[error("invalid value for {name}: {message}")]
    EnvVarError { name: &'static str, message: String },
}

pub type Result<T, E = NetcheckError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_read_either_variant() {
        let e = CheckError::Unavailable { code: 111, message: "Connection refused".into() };
        assert_eq!(e.code(), 111);
        assert_eq!(e.message(), "Connection refused");
        assert_eq!(e.to_string(), "internet not available: 111 - Connection refused");

        let e = CheckError::Problem { code: 0, message: "invalid hostname".into() };
        assert_eq!(e.code(), 0);
        assert_eq!(e.message(), "invalid hostname");
    }
}
