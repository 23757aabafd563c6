// src/poller/fetcher.rs
use std::sync::Arc;
use std::time::Duration;
use log::warn;
use thiserror::Error;
use crate::beacon::{BeaconError, ServerReport, StatusSource};
use crate::models::mode::{self, ModeKind, BOMB_MODE};
use crate::models::server::{
    CompetitiveSettings, CooperativeSettings, ModeSettings, Player, RotationEntry, ServerSnapshot,
};
use super::discovery::Target;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("report port for {host}:{port} overflows with offset {offset}")]
    PortOverflow { host: String, port: u16, offset: u16 },

    #[error("status query timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Beacon(#[from] BeaconError),
}

/// Queries one target's beacon and turns the reply into a snapshot.
#[derive(Clone)]
pub struct StatusFetcher {
    source: Arc<dyn StatusSource>,
    timeout: Duration,
    port_offset: u16,
}

impl StatusFetcher {
    pub fn new(source: Arc<dyn StatusSource>, timeout: Duration, port_offset: u16) -> Self {
        Self {
            source,
            timeout,
            port_offset,
        }
    }

    pub async fn fetch(&self, target: &Target) -> Result<ServerSnapshot, FetchError> {
        let result = self.query(target).await;
        if let Err(e) = &result {
            warn!("Status query for {}:{} failed: {}", target.host, target.port, e);
        }
        result.map(|report| snapshot_from_report(target, report))
    }

    async fn query(&self, target: &Target) -> Result<ServerReport, FetchError> {
        let report_port = target
            .port
            .checked_add(self.port_offset)
            .ok_or_else(|| FetchError::PortOverflow {
                host: target.host.clone(),
                port: target.port,
                offset: self.port_offset,
            })?;

        // The source gets the same bound; this outer one also covers sources
        // that ignore it.
        match tokio::time::timeout(self.timeout, self.source.query(&target.host, report_port, self.timeout)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }
}

pub fn snapshot_from_report(target: &Target, report: ServerReport) -> ServerSnapshot {
    let players = report
        .player_names
        .iter()
        .enumerate()
        .map(|(i, name)| Player {
            name: name.clone(),
            kills: report.player_kills.get(i).copied().unwrap_or(0),
            time: report.player_times.get(i).cloned().unwrap_or_default(),
        })
        .collect();

    // zip stops at the shorter rotation list
    let maps = report
        .map_rotation
        .iter()
        .zip(report.mode_rotation.iter())
        .map(|(map, mode_id)| RotationEntry {
            name: map.clone(),
            mode: mode::display_name(mode_id).to_string(),
        })
        .collect();

    let settings = match mode::classify(&report.current_mode) {
        ModeKind::Competitive => ModeSettings::Competitive(CompetitiveSettings {
            auto_team_balance: report.auto_team_balance,
            bomb_timer: if report.current_mode == BOMB_MODE { report.bomb_timer } else { 0 },
            friendly_fire: report.friendly_fire,
            rounds_per_match: report.rounds_per_match,
            time_per_round: report.time_per_round,
            time_between_rounds: report.time_between_rounds,
        }),
        ModeKind::Cooperative => ModeSettings::Cooperative(CooperativeSettings {
            ai_backup: report.ai_backup,
            friendly_fire: report.friendly_fire,
            terrorist_count: report.num_terrorists,
            rotate_map_on_success: report.rotate_map_on_success,
            rounds_per_match: report.rounds_per_match,
            time_per_round: report.time_per_round,
            time_between_rounds: report.time_between_rounds,
        }),
    };

    ServerSnapshot {
        server_name: report.server_name,
        current_players: report.num_players,
        max_players: report.max_players,
        host: if report.ip_address.is_empty() { target.host.clone() } else { report.ip_address },
        port: if report.port == 0 { target.port } else { report.port },
        current_map: report.current_map,
        game_mode: mode::display_name(&report.current_mode).to_string(),
        motd: report.motd,
        players,
        maps,
        settings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beacon::fake::FakeBeacon;

    fn target() -> Target {
        Target {
            host: "10.0.0.1".to_string(),
            port: 7777,
        }
    }

    fn report(mode: &str) -> ServerReport {
        ServerReport {
            server_name: "Raven Den".to_string(),
            num_players: 2,
            max_players: 8,
            current_map: "Peaks".to_string(),
            current_mode: mode.to_string(),
            player_names: vec!["Ding".to_string(), "Chavez".to_string()],
            player_kills: vec![3, 5],
            player_times: vec!["1:00".to_string(), "2:00".to_string()],
            map_rotation: vec!["Peaks".to_string(), "Bank".to_string(), "Mountain".to_string()],
            mode_rotation: vec!["RGM_BombAdvMode".to_string(), "RGM_MissionMode".to_string()],
            auto_team_balance: true,
            bomb_timer: 45,
            friendly_fire: true,
            rounds_per_match: 5,
            time_per_round: 300,
            time_between_rounds: 15,
            ai_backup: true,
            num_terrorists: 30,
            rotate_map_on_success: true,
            ..Default::default()
        }
    }

    #[test]
    fn competitive_mode_fills_only_pvp_settings() {
        let snapshot = snapshot_from_report(&target(), report("RGM_TeamDeathmatchMode"));
        assert_eq!(snapshot.game_mode, "Team Survival");
        match snapshot.settings {
            ModeSettings::Competitive(pvp) => {
                assert!(pvp.auto_team_balance);
                assert_eq!(pvp.bomb_timer, 0);
                assert_eq!(pvp.rounds_per_match, 5);
            }
            other => panic!("expected competitive settings, got {:?}", other),
        }
    }

    #[test]
    fn bomb_mode_keeps_bomb_timer() {
        let snapshot = snapshot_from_report(&target(), report(BOMB_MODE));
        assert_eq!(
            snapshot.settings,
            ModeSettings::Competitive(CompetitiveSettings {
                auto_team_balance: true,
                bomb_timer: 45,
                friendly_fire: true,
                rounds_per_match: 5,
                time_per_round: 300,
                time_between_rounds: 15,
            })
        );
    }

    #[test]
    fn cooperative_mode_fills_only_coop_settings() {
        let snapshot = snapshot_from_report(&target(), report("RGM_TerroristHuntCoopMode"));
        match snapshot.settings {
            ModeSettings::Cooperative(coop) => {
                assert!(coop.ai_backup);
                assert_eq!(coop.terrorist_count, 30);
                assert!(coop.rotate_map_on_success);
            }
            other => panic!("expected cooperative settings, got {:?}", other),
        }
    }

    #[test]
    fn rotation_is_truncated_to_shorter_list() {
        let snapshot = snapshot_from_report(&target(), report("RGM_MissionMode"));
        assert_eq!(
            snapshot.maps,
            vec![
                RotationEntry { name: "Peaks".to_string(), mode: "Bomb".to_string() },
                RotationEntry { name: "Bank".to_string(), mode: "Mission".to_string() },
            ]
        );
    }

    #[test]
    fn players_are_paired_positionally() {
        let mut r = report("RGM_MissionMode");
        r.player_kills.truncate(1);
        let snapshot = snapshot_from_report(&target(), r);
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[0], Player { name: "Ding".to_string(), kills: 3, time: "1:00".to_string() });
        assert_eq!(snapshot.players[1].kills, 0);
        assert_eq!(snapshot.players[1].time, "2:00");
    }

    #[test]
    fn falls_back_to_target_address() {
        let snapshot = snapshot_from_report(&target(), report("RGM_MissionMode"));
        assert_eq!(snapshot.host, "10.0.0.1");
        assert_eq!(snapshot.port, 7777);
    }

    #[tokio::test]
    async fn queries_the_offset_report_port() {
        let beacon = Arc::new(FakeBeacon::new());
        beacon.set("10.0.0.1", 8777, report("RGM_MissionMode"));
        let fetcher = StatusFetcher::new(beacon, Duration::from_secs(5), 1000);

        let snapshot = fetcher.fetch(&target()).await.unwrap();
        assert_eq!(snapshot.server_name, "Raven Den");
    }

    #[tokio::test]
    async fn offline_target_is_an_error() {
        let fetcher = StatusFetcher::new(Arc::new(FakeBeacon::new()), Duration::from_secs(5), 1000);
        assert!(matches!(fetcher.fetch(&target()).await, Err(FetchError::Beacon(BeaconError::Timeout(_)))));
    }

    #[tokio::test]
    async fn slow_source_is_cut_off() {
        let beacon = Arc::new(FakeBeacon::new().with_delay(Duration::from_secs(10)));
        beacon.set("10.0.0.1", 8777, report("RGM_MissionMode"));
        let fetcher = StatusFetcher::new(beacon, Duration::from_millis(50), 1000);
        assert!(matches!(fetcher.fetch(&target()).await, Err(FetchError::Timeout(_))));
    }

    #[tokio::test]
    async fn report_port_overflow_is_an_error() {
        let fetcher = StatusFetcher::new(Arc::new(FakeBeacon::new()), Duration::from_secs(5), 1000);
        let high = Target { host: "10.0.0.1".to_string(), port: 65000 };
        assert!(matches!(fetcher.fetch(&high).await, Err(FetchError::PortOverflow { .. })));
    }
}
