use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_LOCK_TIMEOUT_MS: u64 = 2000;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Upper bound on how long a request waits for a collection lock.
    pub lock_timeout: Duration,
}

impl AppConfig {
    /// Read settings from the process environment. `main` loads `.env`
    /// first so its values are visible here.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys use the
    /// defaults; unparseable ones log a warning and use the defaults too.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);
        let data_dir = lookup("DATA_DIR")
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let static_dir = lookup("STATIC_DIR")
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());
        let lock_timeout_ms = parse_or_default(&lookup, "LOCK_TIMEOUT_MS", DEFAULT_LOCK_TIMEOUT_MS);

        AppConfig {
            host,
            port,
            data_dir: PathBuf::from(data_dir),
            static_dir: PathBuf::from(static_dir),
            lock_timeout: Duration::from_millis(lock_timeout_ms),
        }
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("{key}={raw:?} is not valid, using default {default}");
                default
            }
        },
        None => default,
    }
}
