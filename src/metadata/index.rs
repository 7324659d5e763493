// File: src/metadata/index.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EligibilityError;
use crate::rollover::conditions::RolloverCondition;

/// Setting naming the alias a standalone index is rolled over through
pub const LIFECYCLE_ROLLOVER_ALIAS: &str = "index.lifecycle.rollover_alias";

/// Setting marking an index as finished; such indices are never rolled over
pub const LIFECYCLE_INDEXING_COMPLETE: &str = "index.lifecycle.indexing_complete";

/// Alias attached to an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasMetadata {
    pub alias: String,

    /// Explicit write flag. `None` means the alias has a single index which
    /// implicitly receives writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_write_index: Option<bool>,
}

impl AliasMetadata {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            is_write_index: None,
        }
    }

    pub fn write_index(mut self, is_write_index: bool) -> Self {
        self.is_write_index = Some(is_write_index);
        self
    }
}

/// Record of a completed rollover, stored on the index that was rolled over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverInfo {
    /// Alias or data stream name the rollover was issued against
    pub alias: String,

    /// Conditions that were met when the rollover happened
    #[serde(default)]
    pub met_conditions: Vec<RolloverCondition>,

    /// Unix epoch milliseconds
    pub time: i64,
}

impl RolloverInfo {
    pub fn new(alias: impl Into<String>, met_conditions: Vec<RolloverCondition>, time: i64) -> Self {
        Self {
            alias: alias.into(),
            met_conditions,
            time,
        }
    }
}

/// Metadata of a single index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub name: String,

    #[serde(default)]
    pub settings: BTreeMap<String, String>,

    #[serde(default)]
    pub aliases: BTreeMap<String, AliasMetadata>,

    /// Rollover history keyed by alias / data stream name
    #[serde(default)]
    pub rollover_infos: BTreeMap<String, RolloverInfo>,
}

impl IndexMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: BTreeMap::new(),
            aliases: BTreeMap::new(),
            rollover_infos: BTreeMap::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn with_alias(mut self, alias: AliasMetadata) -> Self {
        self.aliases.insert(alias.alias.clone(), alias);
        self
    }

    pub fn with_rollover_info(mut self, info: RolloverInfo) -> Self {
        self.rollover_infos.insert(info.alias.clone(), info);
        self
    }

    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Raw value of `index.lifecycle.rollover_alias`
    pub fn rollover_alias(&self) -> Option<&str> {
        self.setting(LIFECYCLE_ROLLOVER_ALIAS)
    }

    /// Value of `index.lifecycle.indexing_complete`, `false` when unset
    ///
    /// Only the exact strings `true` and `false` are accepted.
    pub fn indexing_complete(&self) -> Result<bool, EligibilityError> {
        match self.setting(LIFECYCLE_INDEXING_COMPLETE) {
            None | Some("false") => Ok(false),
            Some("true") => Ok(true),
            Some(other) => Err(EligibilityError::invalid_boolean_setting(
                LIFECYCLE_INDEXING_COMPLETE,
                other,
                self.name.clone(),
            )),
        }
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    pub fn rollover_info(&self, alias: &str) -> Option<&RolloverInfo> {
        self.rollover_infos.get(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollover_alias_setting() {
        let index = IndexMetadata::new("logs-000001").with_setting(LIFECYCLE_ROLLOVER_ALIAS, "logs");
        assert_eq!(index.rollover_alias(), Some("logs"));
        assert_eq!(IndexMetadata::new("other").rollover_alias(), None);
    }

    #[test]
    fn test_indexing_complete() {
        let base = IndexMetadata::new("idx");
        assert_eq!(base.indexing_complete(), Ok(false));
        assert_eq!(
            base.clone()
                .with_setting(LIFECYCLE_INDEXING_COMPLETE, "true")
                .indexing_complete(),
            Ok(true)
        );
        assert_eq!(
            base.clone()
                .with_setting(LIFECYCLE_INDEXING_COMPLETE, "false")
                .indexing_complete(),
            Ok(false)
        );
    }

    #[test]
    fn test_indexing_complete_rejects_non_boolean() {
        for value in ["yes", " TRUE ", "True", ""] {
            let index = IndexMetadata::new("idx").with_setting(LIFECYCLE_INDEXING_COMPLETE, value);
            assert_eq!(
                index.indexing_complete(),
                Err(EligibilityError::invalid_boolean_setting(
                    LIFECYCLE_INDEXING_COMPLETE,
                    value,
                    "idx"
                )),
                "value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_aliases_and_rollover_infos() {
        let index = IndexMetadata::new("idx")
            .with_alias(AliasMetadata::new("logs").write_index(true))
            .with_rollover_info(RolloverInfo::new("logs", vec![], 1));

        assert!(index.has_alias("logs"));
        assert!(!index.has_alias("metrics"));
        assert_eq!(index.aliases["logs"].is_write_index, Some(true));
        assert_eq!(index.rollover_info("logs").map(|i| i.time), Some(1));
        assert!(index.rollover_info("metrics").is_none());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let index: IndexMetadata = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(index, IndexMetadata::new("bare"));
    }
}
