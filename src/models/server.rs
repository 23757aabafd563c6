// src/models/server.rs
use serde::Serialize;

/// Identity of a stored server: the address it reports from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerKey {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    pub kills: i32,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotationEntry {
    pub name: String,
    pub mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompetitiveSettings {
    pub auto_team_balance: bool,
    pub bomb_timer: i32,
    pub friendly_fire: bool,
    pub rounds_per_match: i32,
    pub time_per_round: i32,
    pub time_between_rounds: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CooperativeSettings {
    pub ai_backup: bool,
    pub friendly_fire: bool,
    pub terrorist_count: i32,
    pub rotate_map_on_success: bool,
    pub rounds_per_match: i32,
    pub time_per_round: i32,
    pub time_between_rounds: i32,
}

/// Settings for the mode a server is currently running. Flattened into the
/// snapshot so only the populated shape shows up in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ModeSettings {
    #[serde(rename = "pvp_settings")]
    Competitive(CompetitiveSettings),
    #[serde(rename = "coop_settings")]
    Cooperative(CooperativeSettings),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerSnapshot {
    pub server_name: String,
    pub current_players: i32,
    pub max_players: i32,
    #[serde(rename = "ip_address")]
    pub host: String,
    pub port: u16,
    pub current_map: String,
    pub game_mode: String,
    pub motd: String,
    pub players: Vec<Player>,
    pub maps: Vec<RotationEntry>,
    #[serde(flatten)]
    pub settings: ModeSettings,
}

impl ServerSnapshot {
    pub fn key(&self) -> ServerKey {
        ServerKey {
            host: self.host.clone(),
            port: self.port,
        }
    }

    pub fn is_populated(&self) -> bool {
        self.current_players > 0
    }
}
