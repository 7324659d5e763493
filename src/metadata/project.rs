// File: src/metadata/project.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{DataStream, IndexMetadata};
use crate::error::{StepError, StepResult};

/// Id of the project a state file without one belongs to
pub const DEFAULT_PROJECT_ID: &str = "default";

/// Indices and data streams of one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default = "default_project_id")]
    pub id: String,

    #[serde(default)]
    pub indices: BTreeMap<String, IndexMetadata>,

    #[serde(default)]
    pub data_streams: BTreeMap<String, DataStream>,
}

fn default_project_id() -> String {
    DEFAULT_PROJECT_ID.to_string()
}

impl ProjectMetadata {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_index(mut self, index: IndexMetadata) -> Self {
        self.put_index(index);
        self
    }

    pub fn with_data_stream(mut self, data_stream: DataStream) -> Self {
        self.put_data_stream(data_stream);
        self
    }

    pub fn put_index(&mut self, index: IndexMetadata) {
        self.indices.insert(index.name.clone(), index);
    }

    pub fn put_data_stream(&mut self, data_stream: DataStream) {
        self.data_streams.insert(data_stream.name.clone(), data_stream);
    }

    pub fn index(&self, name: &str) -> Option<&IndexMetadata> {
        self.indices.get(name)
    }

    pub fn index_mut(&mut self, name: &str) -> Option<&mut IndexMetadata> {
        self.indices.get_mut(name)
    }

    pub fn data_stream(&self, name: &str) -> Option<&DataStream> {
        self.data_streams.get(name)
    }

    pub fn data_stream_mut(&mut self, name: &str) -> Option<&mut DataStream> {
        self.data_streams.get_mut(name)
    }

    /// Data stream owning `index` as a backing or failure store index
    pub fn data_stream_for_index(&self, index: &str) -> Option<&DataStream> {
        self.data_streams.values().find(|ds| ds.contains(index))
    }

    /// Index receiving writes through `alias`
    ///
    /// An index flagged `is_write_index: true` wins. Without an explicit
    /// flag, an alias pointing at exactly one index writes to that index.
    pub fn alias_write_index(&self, alias: &str) -> Option<&IndexMetadata> {
        let members: Vec<&IndexMetadata> = self
            .indices
            .values()
            .filter(|index| index.has_alias(alias))
            .collect();

        if let Some(explicit) = members
            .iter()
            .find(|index| index.aliases[alias].is_write_index == Some(true))
        {
            return Some(*explicit);
        }

        match members.as_slice() {
            [only] if only.aliases[alias].is_write_index.is_none() => Some(*only),
            _ => None,
        }
    }

    /// Check structural invariants
    ///
    /// - every index belongs to at most one data stream
    /// - data stream members exist as indices
    pub fn validate(&self) -> StepResult<()> {
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

        for ds in self.data_streams.values() {
            for index in ds.indices.iter().chain(ds.failure_indices.iter()) {
                if let Some(previous) = owners.insert(index.as_str(), ds.name.as_str()) {
                    return Err(StepError::State(format!(
                        "index [{}] belongs to data streams [{}] and [{}]",
                        index, previous, ds.name
                    )));
                }
                if !self.indices.contains_key(index) {
                    return Err(StepError::State(format!(
                        "data stream [{}] references missing index [{}]",
                        ds.name, index
                    )));
                }
            }
        }

        Ok(())
    }

    /// Load and validate a project from a JSON state file
    pub fn load(path: impl AsRef<Path>) -> StepResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let project: ProjectMetadata = serde_json::from_str(&raw)?;
        project.validate()?;
        Ok(project)
    }

    /// Write the project to a JSON state file
    pub fn save(&self, path: impl AsRef<Path>) -> StepResult<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), raw)?;
        Ok(())
    }
}
