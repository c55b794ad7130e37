//! Runtime configuration read from `EDUMANAGE_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub http_port: u16,
    /// Directory holding `local_storage.json`.
    pub data_dir: PathBuf,
    /// Fixed latency applied to every authentication attempt.
    pub login_delay: Duration,
    /// When false the session lives in memory only and is lost on restart.
    pub persist_session: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            http_port: 7979,
            data_dir: PathBuf::from("data"),
            login_delay: Duration::from_millis(1000),
            persist_session: true,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(target: "config", "ignoring invalid {}='{}', using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            bind: std::env::var("EDUMANAGE_BIND").unwrap_or(d.bind),
            http_port: env_or("EDUMANAGE_HTTP_PORT", d.http_port),
            data_dir: std::env::var("EDUMANAGE_DATA_DIR").map(PathBuf::from).unwrap_or(d.data_dir),
            login_delay: Duration::from_millis(env_or("EDUMANAGE_LOGIN_DELAY_MS", d.login_delay.as_millis() as u64)),
            persist_session: env_or("EDUMANAGE_PERSIST", d.persist_session),
        }
    }

    pub fn addr(&self) -> String { format!("{}:{}", self.bind, self.http_port) }
}
