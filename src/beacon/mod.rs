// src/beacon/mod.rs
pub mod report;
pub mod udp;

use std::time::Duration;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("beacon socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no beacon reply within {0:?}")]
    Timeout(Duration),

    #[error("malformed beacon report: {0}")]
    Malformed(String),
}

/// Raw status report as a game server's beacon describes itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerReport {
    pub server_name: String,
    pub num_players: i32,
    pub max_players: i32,
    pub ip_address: String,
    pub port: u16,
    pub current_map: String,
    pub current_mode: String,
    pub motd: String,

    pub player_names: Vec<String>,
    pub player_kills: Vec<i32>,
    pub player_times: Vec<String>,

    pub map_rotation: Vec<String>,
    pub mode_rotation: Vec<String>,

    pub auto_team_balance: bool,
    pub bomb_timer: i32,
    pub friendly_fire: bool,
    pub rounds_per_match: i32,
    pub time_per_round: i32,
    pub time_between_rounds: i32,
    pub ai_backup: bool,
    pub num_terrorists: i32,
    pub rotate_map_on_success: bool,
}

/// Anything able to answer a status query for `host:report_port`.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn query(&self, host: &str, report_port: u16, timeout: Duration) -> Result<ServerReport, BeaconError>;
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::collections::HashMap;
    use parking_lot::Mutex;

    /// Scripted status source keyed by `(host, report_port)`. Unknown
    /// addresses behave like an offline server.
    #[derive(Default)]
    pub struct FakeBeacon {
        reports: Mutex<HashMap<(String, u16), ServerReport>>,
        delay: Option<Duration>,
        panic_on: Option<(String, u16)>,
    }

    impl FakeBeacon {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn panicking_on(mut self, host: &str, report_port: u16) -> Self {
            self.panic_on = Some((host.to_string(), report_port));
            self
        }

        pub fn set(&self, host: &str, report_port: u16, report: ServerReport) {
            self.reports.lock().insert((host.to_string(), report_port), report);
        }
    }

    #[async_trait]
    impl StatusSource for FakeBeacon {
        async fn query(&self, host: &str, report_port: u16, timeout: Duration) -> Result<ServerReport, BeaconError> {
            let key = (host.to_string(), report_port);
            if self.panic_on.as_ref() == Some(&key) {
                panic!("beacon blew up for {}:{}", host, report_port);
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let found = self.reports.lock().get(&key).cloned();
            found.ok_or(BeaconError::Timeout(timeout))
        }
    }
}
