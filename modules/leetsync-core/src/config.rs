use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use leetcode_client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Upstream
    pub leetcode_base_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub recent_limit: u32,

    // Web server
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    /// Load configuration from environment variables. Every variable has a default;
    /// malformed numbers are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = parse_or(&lookup, "LEETCODE_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            bail!("LEETCODE_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            leetcode_base_url: lookup("LEETCODE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: lookup("LEETCODE_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            recent_limit: parse_or(&lookup, "RECENT_SUBMISSIONS_LIMIT", 20)?,
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: parse_or(&lookup, "API_PORT", 3000)?,
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.leetcode_base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.request_timeout,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.leetcode_base_url, "https://leetcode.com");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.recent_limit, 20);
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("LEETCODE_BASE_URL", "http://127.0.0.1:9999"),
            ("LEETCODE_TIMEOUT_SECS", "5"),
            ("RECENT_SUBMISSIONS_LIMIT", "15"),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.client_options().base_url, "http://127.0.0.1:9999");
        assert_eq!(config.client_options().timeout, Duration::from_secs(5));
        assert_eq!(config.recent_limit, 15);
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("API_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("LEETCODE_TIMEOUT_SECS", "0")])).is_err());
    }
}
