// File: src/rollover/target.rs

use serde::Serialize;
use std::fmt;

use super::request::{combine_selector, IndexComponentSelector};
use crate::error::EligibilityError;
use crate::metadata::{IndexMetadata, ProjectMetadata};

/// What a rollover is issued against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RolloverTarget {
    /// Standalone index rolled over through its configured alias
    Alias { alias: String },

    /// Data stream, on its backing side or its failure store
    DataStream { name: String, failure_store: bool },
}

impl RolloverTarget {
    /// Expression sent in the rollover request
    pub fn expression(&self) -> String {
        match self {
            RolloverTarget::Alias { alias } => alias.clone(),
            RolloverTarget::DataStream {
                name,
                failure_store: true,
            } => combine_selector(name, IndexComponentSelector::Failures),
            RolloverTarget::DataStream { name, .. } => name.clone(),
        }
    }

    /// Key under which a completed rollover is recorded on the old index
    pub fn history_key(&self) -> &str {
        match self {
            RolloverTarget::Alias { alias } => alias,
            RolloverTarget::DataStream { name, .. } => name,
        }
    }
}

impl fmt::Display for RolloverTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

/// Why an index needs no rollover
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// `index.lifecycle.indexing_complete` is set
    IndexingComplete,

    /// A newer generation already took over writes
    NotWriteIndex {
        data_stream: String,
        failure_store: bool,
    },

    /// Rollover history already records the target
    AlreadyRolledOver { target: String },
}

/// Result of checking an index for rollover
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloverDecision {
    Skip(SkipReason),
    Rollover(RolloverTarget),
}

/// Decide whether `index` must be rolled over and against which target
///
/// Pure function of its inputs. Guards run in order:
/// 1. indexing complete
/// 2. data stream side and write index (stream members only)
/// 3. rollover alias setting, rollover history, alias membership (standalone only)
/// 4. rollover history (stream members only)
pub fn decide(
    index: &IndexMetadata,
    project: &ProjectMetadata,
) -> Result<RolloverDecision, EligibilityError> {
    if index.indexing_complete()? {
        return Ok(RolloverDecision::Skip(SkipReason::IndexingComplete));
    }

    let target = match project.data_stream_for_index(&index.name) {
        Some(data_stream) => {
            let failure_store = data_stream.is_failure_store_index(&index.name);
            let write_index = if failure_store {
                data_stream.failure_store_write_index()
            } else {
                data_stream.write_index()
            };

            if write_index != Some(index.name.as_str()) {
                return Ok(RolloverDecision::Skip(SkipReason::NotWriteIndex {
                    data_stream: data_stream.name.clone(),
                    failure_store,
                }));
            }

            if index.rollover_info(&data_stream.name).is_some() {
                return Ok(RolloverDecision::Skip(SkipReason::AlreadyRolledOver {
                    target: data_stream.name.clone(),
                }));
            }

            RolloverTarget::DataStream {
                name: data_stream.name.clone(),
                failure_store,
            }
        }
        None => {
            let alias = match index.rollover_alias() {
                Some(alias) if !alias.trim().is_empty() => alias,
                _ => return Err(EligibilityError::alias_setting_missing(&index.name)),
            };

            // History wins over membership: an alias may already have been
            // moved away from an index that was rolled over.
            if index.rollover_info(alias).is_some() {
                return Ok(RolloverDecision::Skip(SkipReason::AlreadyRolledOver {
                    target: alias.to_string(),
                }));
            }

            if !index.has_alias(alias) {
                return Err(EligibilityError::alias_does_not_point_to_index(
                    alias,
                    &index.name,
                ));
            }

            RolloverTarget::Alias {
                alias: alias.to_string(),
            }
        }
    };

    Ok(RolloverDecision::Rollover(target))
}
