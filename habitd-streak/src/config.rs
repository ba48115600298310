//! Service configuration.
//!
//! Each key resolves through the same ladder: CLI argument, then
//! environment variable (clap handles both), then the TOML config file
//! (`~/.config/habitd/config.toml`, falling back to
//! `/etc/habitd/config.toml`), then the compiled default.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use habitd_common::{Error, Result};

use crate::validator::RuleSet;

/// Command-line arguments for habitd-streak
#[derive(Parser, Debug, Default)]
#[command(name = "habitd-streak", about = "Habit streak & day-validation engine")]
pub struct Args {
    /// SQLite database path
    #[arg(long, env = "HABITD_DATABASE")]
    pub database: Option<PathBuf>,

    /// Bind address (host:port)
    #[arg(long, env = "HABITD_BIND")]
    pub bind: Option<String>,

    /// Day-validity rule set: "combined" or "intention"
    #[arg(long, env = "HABITD_RULES")]
    pub rules: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: PathBuf,
    pub bind: SocketAddr,
    pub rules: RuleSet,
}

impl Config {
    /// Resolve the configuration from arguments, environment, config file,
    /// and defaults, in that order of precedence.
    pub fn resolve(args: Args) -> Result<Config> {
        let file = load_config_file();

        let database = args
            .database
            .or_else(|| file_str(&file, "database").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("habitd.db"));

        let bind_raw = args
            .bind
            .or_else(|| file_str(&file, "bind"))
            .unwrap_or_else(|| "127.0.0.1:5730".to_string());
        let bind = bind_raw
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address '{bind_raw}': {e}")))?;

        let rules = match args.rules.or_else(|| file_str(&file, "rules")) {
            Some(raw) => raw.parse()?,
            None => RuleSet::default(),
        };

        Ok(Config {
            database,
            bind,
            rules,
        })
    }
}

/// First readable, parseable config file on the search path, if any.
/// A malformed file is skipped with a warning rather than failing startup.
fn load_config_file() -> Option<toml::Value> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("habitd").join("config.toml"));
    }
    candidates.push(PathBuf::from("/etc/habitd/config.toml"));

    for path in candidates {
        if let Ok(contents) = std::fs::read_to_string(&path) {
            match toml::from_str(&contents) {
                Ok(value) => return Some(value),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed config file")
                }
            }
        }
    }
    None
}

fn file_str(file: &Option<toml::Value>, key: &str) -> Option<String> {
    file.as_ref()?.get(key)?.as_str().map(str::to_string)
}
