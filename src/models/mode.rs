// src/models/mode.rs
use std::collections::{HashMap, HashSet};
use lazy_static::lazy_static;

pub const BOMB_MODE: &str = "RGM_BombAdvMode";

lazy_static! {
    static ref DISPLAY_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        ("RGM_BombAdvMode", "Bomb"),
        ("RGM_DeathmatchMode", "Survival"),
        ("RGM_EscortAdvMode", "Escort the Pilot"),
        ("RGM_HostageRescueAdvMode", "Hostage"),
        ("RGM_HostageRescueCoopMode", "Hostage Rescue"),
        ("RGM_MissionMode", "Mission"),
        ("RGM_TeamDeathmatchMode", "Team Survival"),
        ("RGM_TerroristHuntCoopMode", "Terrorist Hunt"),
    ]);

    static ref COMPETITIVE_MODES: HashSet<&'static str> = HashSet::from([
        "RGM_BombAdvMode",
        "RGM_DeathmatchMode",
        "RGM_EscortAdvMode",
        "RGM_HostageRescueAdvMode",
        "RGM_TeamDeathmatchMode",
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Competitive,
    Cooperative,
}

/// Human readable name for a raw mode identifier; empty when unknown.
pub fn display_name(mode: &str) -> &'static str {
    DISPLAY_NAMES.get(mode).copied().unwrap_or("")
}

/// Anything not known to be adversarial is treated as cooperative.
pub fn classify(mode: &str) -> ModeKind {
    if COMPETITIVE_MODES.contains(mode) {
        ModeKind::Competitive
    } else {
        ModeKind::Cooperative
    }
}
