// src/beacon/report.rs
//
// Beacon replies are Latin-1 text made of segments separated by the pilcrow
// byte (0xB6). Each segment is `KEY value`; list values look like `/a/b/c`.
use super::{BeaconError, ServerReport};

const SEGMENT_SEPARATOR: u8 = 0xB6;

/// Decode Latin-1, where every byte maps to the code point of the same value.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Only ASCII whitespace is padding; Latin-1 0xA0 and 0x85 belong to the text.
fn trim_ascii(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

fn parse_int(key: &str, value: &str) -> Result<i32, BeaconError> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| BeaconError::Malformed(format!("{} is not a number: {:?}", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, BeaconError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(BeaconError::Malformed(format!("{} is not a boolean: {:?}", key, value))),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    let value = value.strip_prefix('/').unwrap_or(value);
    if value.is_empty() {
        return Vec::new();
    }
    value.split('/').map(str::to_string).collect()
}

fn parse_int_list(key: &str, value: &str) -> Result<Vec<i32>, BeaconError> {
    parse_list(value).iter().map(|v| parse_int(key, trim_ascii(v))).collect()
}

pub fn parse_report(bytes: &[u8]) -> Result<ServerReport, BeaconError> {
    let mut report = ServerReport::default();
    let mut recognised = 0usize;

    for segment in bytes.split(|&b| b == SEGMENT_SEPARATOR) {
        let segment = latin1(segment);
        let segment = trim_ascii(&segment);
        if segment.is_empty() {
            continue;
        }
        let (key, value) = match segment.split_once(' ') {
            Some((k, v)) => (k, trim_ascii(v)),
            None => (segment, ""),
        };

        match key {
            "I1" => report.server_name = value.to_string(),
            "B1" => report.num_players = parse_int(key, value)?,
            "A1" => report.max_players = parse_int(key, value)?,
            "P1" => {
                report.port = value
                    .parse()
                    .map_err(|_| BeaconError::Malformed(format!("P1 is not a port: {:?}", value)))?
            }
            "E1" => report.current_map = value.to_string(),
            "F1" => report.current_mode = value.to_string(),
            "K2" => report.motd = value.to_string(),
            "L1" => report.player_names = parse_list(value),
            "O1" => report.player_kills = parse_int_list(key, value)?,
            "M1" => report.player_times = parse_list(value),
            "J1" => report.map_rotation = parse_list(value),
            "K1" => report.mode_rotation = parse_list(value),
            "Q1" => report.rounds_per_match = parse_int(key, value)?,
            "R1" => report.time_per_round = parse_int(key, value)?,
            "S1" => report.time_between_rounds = parse_int(key, value)?,
            "T1" => report.bomb_timer = parse_int(key, value)?,
            "Y1" => report.friendly_fire = parse_bool(key, value)?,
            "Z1" => report.auto_team_balance = parse_bool(key, value)?,
            "H2" => report.ai_backup = parse_bool(key, value)?,
            "G2" => report.num_terrorists = parse_int(key, value)?,
            "I2" => report.rotate_map_on_success = parse_bool(key, value)?,
            _ => continue,
        }
        recognised += 1;
    }

    if recognised == 0 {
        return Err(BeaconError::Malformed("no recognised fields".to_string()));
    }
    Ok(report)
}
