use std::env;
use std::str::FromStr;
use std::time::Duration;
use std::num::NonZeroU32;
use governor::Quota;
use log::warn;
use crate::storage::memory::MergePolicy;

#[derive(Clone, Debug)]
pub struct Config {
    // HTTP front
    pub bind_address: String,
    pub port: u16,
    pub web_root: String,
    pub trust_forwarded_for: bool,

    // Rate limiting configs
    pub server_list_period_secs: u64,
    pub server_list_burst_limit: u32,

    // Polling
    pub listing_url: String,
    pub listing_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub report_timeout_secs: u64,
    pub report_port_offset: u16,
    pub merge_policy: MergePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8081,
            web_root: "web".to_string(),
            trust_forwarded_for: false,
            server_list_period_secs: 5,
            server_list_burst_limit: 120,
            listing_url: "http://64.225.54.237:8080/servers".to_string(),
            listing_timeout_secs: 10,
            poll_interval_secs: 30,
            report_timeout_secs: 5,
            report_port_offset: 1000,
            merge_policy: MergePolicy::RetainFirst,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<&str>, default: T) -> T {
    match raw.map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            warn!("Ignoring unparseable {}={:?}, using default", key, raw.unwrap_or_default());
            default
        }
        None => default,
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(key, env::var(key).ok().as_deref(), default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: env_or("PORT", defaults.port),
            web_root: env::var("WEB_ROOT").unwrap_or(defaults.web_root),
            trust_forwarded_for: env_or("TRUST_FORWARDED_FOR", defaults.trust_forwarded_for),

            server_list_period_secs: env_or("SERVER_LIST_PERIOD_SECS", defaults.server_list_period_secs),
            server_list_burst_limit: env_or("SERVER_LIST_BURST_LIMIT", defaults.server_list_burst_limit),

            listing_url: env::var("LISTING_URL").unwrap_or(defaults.listing_url),
            listing_timeout_secs: env_or("LISTING_TIMEOUT_SECS", defaults.listing_timeout_secs),
            poll_interval_secs: env_or("POLL_INTERVAL_SECS", defaults.poll_interval_secs),
            report_timeout_secs: env_or("REPORT_TIMEOUT_SECS", defaults.report_timeout_secs),
            report_port_offset: env_or("REPORT_PORT_OFFSET", defaults.report_port_offset),
            merge_policy: env_or("MERGE_POLICY", defaults.merge_policy),
        }
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_secs)
    }

    pub fn server_list_quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.server_list_burst_limit).unwrap_or(NonZeroU32::MIN);
        Quota::with_period(Duration::from_secs(self.server_list_period_secs))
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst)
    }
}
