use netcheck::config::Config;
use netcheck::error::{NetcheckError, Result};
use netcheck::{CheckError, ConnectivityChecker};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};
use xdg::BaseDirectories;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("netcheck startup error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let xdg = BaseDirectories::with_prefix("netcheck")
        .map_err(|e| NetcheckError::XdgError { message: e.to_string() })?;

    // Both files are optional; built-in defaults apply without them.
    if let Some(env_path) = xdg.find_config_file(".env") {
        dotenvy::from_path(&env_path)
            .map_err(|e| NetcheckError::EnvLoadError { path: env_path.clone(), source: e })?;
    }

    let config_path = xdg.find_config_file("config.toml");
    let mut cfg = match &config_path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    cfg.apply_env()?;

    install_tracing(&cfg.log.filter);
    match &config_path {
        Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file, using defaults"),
    }

    let mut checker = ConnectivityChecker::from_config(&cfg.check);
    tracing::debug!(?checker, "checking connectivity");

    let code = match checker.check() {
        Ok(true) => {
            println!("online");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("offline");
            ExitCode::from(1)
        }
        Err(e @ CheckError::Unavailable { .. }) => {
            println!("offline: {}", e);
            ExitCode::from(1)
        }
        Err(e @ CheckError::Problem { .. }) => {
            println!("error: {}", e);
            ExitCode::from(2)
        }
    };
    Ok(code)
}

fn load_config(path: &Path) -> Result<Config> {
    let cfg_str = fs::read_to_string(path)
        .map_err(|e| NetcheckError::ReadError { path: path.to_path_buf(), source: e })?;
    Config::from_toml_str(&cfg_str).map_err(|msg| NetcheckError::ParseError {
        path: path.to_path_buf(),
        kind: "toml",
        message: msg,
    })
}

fn install_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
