//! Test fixtures: recording client and topology builders

use async_trait::async_trait;
use ilm_rollover::error::ClientError;
use ilm_rollover::metadata::{AliasMetadata, LIFECYCLE_ROLLOVER_ALIAS};
use ilm_rollover::rollover::{RolloverRequest, RolloverResponse, ACTION_NAME};
use ilm_rollover::{DataStream, IndexMetadata, ProjectMetadata, RolloverClient, RolloverStep, StepKey};
use std::sync::{Arc, Mutex};

/// 2024-03-05T12:00:00Z
pub const TS: i64 = 1_709_640_000_000;

pub const DATA_STREAM: &str = "test-datastream";

/// Rollover client that records requests and answers with a canned outcome
pub struct RecordingClient {
    requests: Mutex<Vec<RolloverRequest>>,
    outcome: Result<RolloverResponse, ClientError>,
}

impl RecordingClient {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            outcome: Ok(RolloverResponse::rolled_over("old-index", "new-index")),
        })
    }

    pub fn failing(error: ClientError) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            outcome: Err(error),
        })
    }

    pub fn requests(&self) -> Vec<RolloverRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock poisoned").len()
    }
}

#[async_trait]
impl RolloverClient for RecordingClient {
    async fn rollover(&self, request: RolloverRequest) -> Result<RolloverResponse, ClientError> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request);
        self.outcome.clone()
    }
}

/// Rollover step in the hot phase using `client`
pub fn rollover_step(client: Arc<dyn RolloverClient>) -> RolloverStep {
    RolloverStep::new(
        StepKey::new("hot", ACTION_NAME, RolloverStep::NAME),
        StepKey::new("hot", ACTION_NAME, "wait-for-active-shards"),
        client,
    )
}

/// Standalone index carrying `alias` and pointing its rollover setting at it
pub fn aliased_index(name: &str, alias: &str) -> IndexMetadata {
    IndexMetadata::new(name)
        .with_alias(AliasMetadata::new(alias))
        .with_setting(LIFECYCLE_ROLLOVER_ALIAS, alias)
}

/// Project holding a single index
pub fn single_index_project(index: &IndexMetadata) -> ProjectMetadata {
    ProjectMetadata::new("default").with_index(index.clone())
}

/// Data stream with `generations` backing and failure store indices
///
/// Returns the project and the (backing, failure) names, oldest first.
pub fn data_stream_project(generations: u64) -> (ProjectMetadata, Vec<String>, Vec<String>) {
    let backing: Vec<String> = (1..=generations)
        .map(|g| DataStream::default_backing_index_name(DATA_STREAM, g, TS))
        .collect();
    let failures: Vec<String> = (1..=generations)
        .map(|g| DataStream::default_failure_store_name(DATA_STREAM, g, TS))
        .collect();

    let mut project = ProjectMetadata::new("default");
    for name in backing.iter().chain(failures.iter()) {
        project.put_index(IndexMetadata::new(name.clone()));
    }
    project.put_data_stream(DataStream::new(DATA_STREAM, backing.clone(), failures.clone()));

    (project, backing, failures)
}
