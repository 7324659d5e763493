// File: src/rollover/conditions.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition that gates a rollover
///
/// Conditions are evaluated by whoever schedules rollover. The rollover step
/// itself never sends any; they only appear in rollover history snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RolloverCondition {
    /// Index age in milliseconds
    MaxAge(u64),
    MaxDocs(u64),
    /// Total primary store size in bytes
    MaxSize(u64),
    /// Largest primary shard size in bytes
    MaxPrimaryShardSize(u64),
    MaxPrimaryShardDocs(u64),
    MinDocs(u64),
}

impl RolloverCondition {
    pub fn name(&self) -> &'static str {
        match self {
            RolloverCondition::MaxAge(_) => "max_age",
            RolloverCondition::MaxDocs(_) => "max_docs",
            RolloverCondition::MaxSize(_) => "max_size",
            RolloverCondition::MaxPrimaryShardSize(_) => "max_primary_shard_size",
            RolloverCondition::MaxPrimaryShardDocs(_) => "max_primary_shard_docs",
            RolloverCondition::MinDocs(_) => "min_docs",
        }
    }

    pub fn value(&self) -> u64 {
        match *self {
            RolloverCondition::MaxAge(v)
            | RolloverCondition::MaxDocs(v)
            | RolloverCondition::MaxSize(v)
            | RolloverCondition::MaxPrimaryShardSize(v)
            | RolloverCondition::MaxPrimaryShardDocs(v)
            | RolloverCondition::MinDocs(v) => v,
        }
    }
}

impl fmt::Display for RolloverCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.name(), self.value())
    }
}
