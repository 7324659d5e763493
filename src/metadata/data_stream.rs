// File: src/metadata/data_stream.rs

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Prefix of generated backing index names
pub const BACKING_INDEX_PREFIX: &str = ".ds-";

/// Prefix of generated failure store index names
pub const FAILURE_STORE_PREFIX: &str = ".fs-";

/// Data stream: an append-only sequence of backing indices under one name
///
/// The last entry of `indices` is the write index. The last entry of
/// `failure_indices` (if any) is the failure store write index. Both sides
/// share a single generation counter. A state file without `generation`
/// starts it at the number of backing indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DataStreamRecord")]
pub struct DataStream {
    pub name: String,

    #[serde(default)]
    pub indices: Vec<String>,

    #[serde(default)]
    pub failure_indices: Vec<String>,

    pub generation: u64,
}

/// On-disk form of [`DataStream`] with an optional generation
#[derive(Deserialize)]
struct DataStreamRecord {
    name: String,

    #[serde(default)]
    indices: Vec<String>,

    #[serde(default)]
    failure_indices: Vec<String>,

    #[serde(default)]
    generation: Option<u64>,
}

impl From<DataStreamRecord> for DataStream {
    fn from(record: DataStreamRecord) -> Self {
        let generation = record
            .generation
            .unwrap_or(record.indices.len() as u64);
        Self {
            name: record.name,
            indices: record.indices,
            failure_indices: record.failure_indices,
            generation,
        }
    }
}

impl DataStream {
    /// Create a data stream whose generation equals its backing index count
    pub fn new(
        name: impl Into<String>,
        indices: Vec<String>,
        failure_indices: Vec<String>,
    ) -> Self {
        let generation = indices.len() as u64;
        Self {
            name: name.into(),
            indices,
            failure_indices,
            generation,
        }
    }

    pub fn write_index(&self) -> Option<&str> {
        self.indices.last().map(String::as_str)
    }

    pub fn failure_store_write_index(&self) -> Option<&str> {
        self.failure_indices.last().map(String::as_str)
    }

    pub fn is_backing_index(&self, index: &str) -> bool {
        self.indices.iter().any(|i| i == index)
    }

    pub fn is_failure_store_index(&self, index: &str) -> bool {
        self.failure_indices.iter().any(|i| i == index)
    }

    pub fn contains(&self, index: &str) -> bool {
        self.is_backing_index(index) || self.is_failure_store_index(index)
    }

    /// Append a new write index on the chosen side and bump the generation
    pub fn roll_to(&mut self, new_index: String, failure_store: bool) {
        if failure_store {
            self.failure_indices.push(new_index);
        } else {
            self.indices.push(new_index);
        }
        self.generation += 1;
    }

    /// `.ds-<stream>-<yyyy.MM.dd>-<generation>` with a six digit generation
    pub fn default_backing_index_name(name: &str, generation: u64, epoch_millis: i64) -> String {
        generated_name(BACKING_INDEX_PREFIX, name, generation, epoch_millis)
    }

    /// `.fs-<stream>-<yyyy.MM.dd>-<generation>` with a six digit generation
    pub fn default_failure_store_name(name: &str, generation: u64, epoch_millis: i64) -> String {
        generated_name(FAILURE_STORE_PREFIX, name, generation, epoch_millis)
    }
}

fn generated_name(prefix: &str, name: &str, generation: u64, epoch_millis: i64) -> String {
    let date = DateTime::from_timestamp_millis(epoch_millis)
        .map(|ts| ts.format("%Y.%m.%d").to_string())
        .unwrap_or_else(|| "1970.01.01".to_string());
    format!("{}{}-{}-{:06}", prefix, name, date, generation)
}
