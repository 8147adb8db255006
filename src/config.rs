use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};

const DEFAULT_TIMEOUT_MS: u64 = 100;
const DEFAULT_ADDR: &str = "0.0.0.0:8081";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Per-source request timeout.
    pub timeout: Duration,
    pub addr: SocketAddr,
}

impl Config {
    /// Reads `BIDWIN_TIMEOUT_MS` and `BIDWIN_ADDR`, after loading `.env` if present.
    pub fn from_env() -> Result<Config> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let timeout_ms = match lookup("BIDWIN_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("BIDWIN_TIMEOUT_MS is not a number of milliseconds: {raw:?}"))?,
            None => DEFAULT_TIMEOUT_MS,
        };
        let addr = lookup("BIDWIN_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = addr
            .trim()
            .parse()
            .with_context(|| format!("BIDWIN_ADDR is not a socket address: {addr:?}"))?;
        Ok(Config {
            timeout: Duration::from_millis(timeout_ms),
            addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.timeout, Duration::from_millis(100));
        assert_eq!(config.addr, "0.0.0.0:8081".parse().unwrap());
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BIDWIN_TIMEOUT_MS", "250"),
            ("BIDWIN_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let err = Config::from_lookup(lookup(&[("BIDWIN_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("BIDWIN_TIMEOUT_MS"));
        let err = Config::from_lookup(lookup(&[("BIDWIN_ADDR", ":8081")])).unwrap_err();
        assert!(err.to_string().contains("BIDWIN_ADDR"));
    }
}
