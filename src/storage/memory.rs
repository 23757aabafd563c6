// src/storage/memory.rs
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::str::FromStr;
use parking_lot::RwLock;
use crate::models::server::{ServerKey, ServerSnapshot};

/// What happens when a report arrives for a server that is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Keep the first snapshot ever seen and drop later ones.
    RetainFirst,
    /// Overwrite the stored snapshot with the fresh one.
    Replace,
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "retain-first" | "retain_first" | "retain" => Ok(Self::RetainFirst),
            "replace" => Ok(Self::Replace),
            other => Err(format!("unknown merge policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Replaced,
    Discarded,
}

pub struct ServerStore {
    servers: RwLock<HashMap<ServerKey, ServerSnapshot>>,
    policy: MergePolicy,
}

impl ServerStore {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            servers: RwLock::new(HashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Membership check and write happen under one write guard, so two
    /// concurrent merges for the same key can never both insert.
    pub fn merge(&self, snapshot: ServerSnapshot) -> MergeOutcome {
        let mut servers = self.servers.write();
        match servers.entry(snapshot.key()) {
            Entry::Vacant(slot) => {
                slot.insert(snapshot);
                MergeOutcome::Inserted
            }
            Entry::Occupied(mut slot) => match self.policy {
                MergePolicy::RetainFirst => MergeOutcome::Discarded,
                MergePolicy::Replace => {
                    slot.insert(snapshot);
                    MergeOutcome::Replaced
                }
            },
        }
    }

    /// Point-in-time copy of every stored snapshot.
    pub fn get_servers(&self) -> Vec<ServerSnapshot> {
        self.servers.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.servers.read().len()
    }
}
